//! Command-line surface of the demo, declared with `argfold`.
//!
//! Global options apply to every workflow. Each command brings its own
//! options, which only become available once the command has been named.

use std::time::Duration;

use argfold::OptionParser;

use crate::error::ValidationError;

/// Environment variable consulted when `--recipient` is absent.
pub const RECIPIENT_VAR: &str = "HELLO_WORLD_RECIPIENT";

/// How the greeting is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Plain greeting.
    #[default]
    Standard,
    /// Upper-case greeting.
    Enthusiastic,
    /// Trailing-off greeting.
    Quiet,
}

/// Resolved command-line configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelloWorldCli {
    /// Recipient of the greeting.
    pub recipient: String,
    /// Words opening the greeting.
    pub salutations: Vec<String>,
    /// Shout the greeting.
    pub is_excited: bool,
    /// Whisper the greeting.
    pub is_quiet: bool,
    /// Selected workflow, if any.
    pub command: Option<Commands>,
}

/// Workflows implemented by the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Prints a greeting.
    Greet(GreetCommand),
    /// Prints a greeting followed by a farewell.
    TakeLeave(TakeLeaveCommand),
}

/// Options of the `greet` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetCommand {
    /// Line printed before the greeting.
    pub preamble: Option<String>,
    /// Punctuation closing the greeting.
    pub punctuation: String,
}

impl Default for GreetCommand {
    fn default() -> Self {
        Self {
            preamble: None,
            punctuation: "!".to_owned(),
        }
    }
}

/// Options of the `take-leave` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeLeaveCommand {
    /// Farewell phrase.
    pub parting: String,
    /// Wave while leaving.
    pub wave: bool,
    /// Gift left behind.
    pub gift: Option<String>,
    /// Delay before a reminder is sent.
    pub remind_in: Option<Duration>,
}

impl Default for TakeLeaveCommand {
    fn default() -> Self {
        Self {
            parting: "Goodbye".to_owned(),
            wave: false,
            gift: None,
            remind_in: None,
        }
    }
}

impl HelloWorldCli {
    /// Delivery mode selected by the global switches.
    #[must_use]
    pub const fn delivery_mode(&self) -> DeliveryMode {
        match (self.is_excited, self.is_quiet) {
            (true, _) => DeliveryMode::Enthusiastic,
            (false, true) => DeliveryMode::Quiet,
            (false, false) => DeliveryMode::Standard,
        }
    }

    /// Salutations with surrounding whitespace removed; `Hello` when none
    /// were given.
    #[must_use]
    pub fn trimmed_salutations(&self) -> Vec<&str> {
        if self.salutations.is_empty() {
            return vec!["Hello"];
        }
        self.salutations.iter().map(|word| word.trim()).collect()
    }

    /// Checks the combination of global options.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for conflicting delivery modes or blank
    /// salutations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_excited && self.is_quiet {
            return Err(ValidationError::ConflictingDeliveryModes);
        }
        match self.salutations.iter().position(|word| word.trim().is_empty()) {
            Some(index) => Err(ValidationError::BlankSalutation(index)),
            None => Ok(()),
        }
    }

    const fn greet_mut(&mut self) -> Option<&mut GreetCommand> {
        match &mut self.command {
            Some(Commands::Greet(greet)) => Some(greet),
            _ => None,
        }
    }

    const fn take_leave_mut(&mut self) -> Option<&mut TakeLeaveCommand> {
        match &mut self.command {
            Some(Commands::TakeLeave(leave)) => Some(leave),
            _ => None,
        }
    }
}

fn visible(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        Err("value must contain visible characters".to_owned())
    } else {
        Ok(())
    }
}

/// Builds the demo's parser.
///
/// # Examples
///
/// ```
/// use hello_world::cli::{Commands, HelloWorldCli, parser};
///
/// let cli = parser()
///     .try_parse(["greet", "--punctuation", "?", "-r", "Ada"], HelloWorldCli::default())
///     .expect("valid command line");
/// assert_eq!(cli.recipient, "Ada");
/// assert!(matches!(cli.command, Some(Commands::Greet(ref greet)) if greet.punctuation == "?"));
/// ```
#[must_use]
pub fn parser() -> OptionParser<HelloWorldCli> {
    let mut parser = OptionParser::new("hello-world");
    parser.head(["hello-world", env!("CARGO_PKG_VERSION")]);
    parser.head(["Friendly greeting demo showcasing argfold."]);
    parser.help("help").abbr("h");
    parser.version("version").abbr("V");
    parser
        .opt::<String>("recipient")
        .abbr("r")
        .value_name("NAME")
        .text("who to greet")
        .with_fallback(|| std::env::var(RECIPIENT_VAR).unwrap_or_else(|_| "World".to_owned()))
        .action(|recipient, c| HelloWorldCli { recipient, ..c });
    parser
        .opt::<Vec<String>>("salutation")
        .abbr("s")
        .value_name("WORDS")
        .unbounded()
        .text("salutation words, comma separated")
        .action(|words, mut c| {
            c.salutations.extend(words);
            c
        });
    parser
        .opt::<()>("is-excited")
        .abbr("e")
        .text("shout the greeting")
        .action(|(), c| HelloWorldCli {
            is_excited: true,
            ..c
        });
    parser
        .opt::<()>("is-quiet")
        .abbr("q")
        .text("whisper the greeting")
        .action(|(), c| HelloWorldCli { is_quiet: true, ..c });
    declare_greet(&mut parser);
    declare_take_leave(&mut parser);
    parser.check_config(|cli| cli.validate().map_err(|err| err.to_string()));
    parser
}

fn declare_greet(parser: &mut OptionParser<HelloWorldCli>) {
    parser
        .cmd("greet")
        .text("prints a greeting")
        .action(|(), c| HelloWorldCli {
            command: Some(Commands::Greet(GreetCommand::default())),
            ..c
        })
        .with_children(|p| {
            [
                p.opt::<String>("preamble")
                    .value_name("TEXT")
                    .text("line printed before the greeting")
                    .action(|preamble, mut c| {
                        if let Some(greet) = c.greet_mut() {
                            greet.preamble = Some(preamble);
                        }
                        c
                    })
                    .id(),
                p.opt::<String>("punctuation")
                    .value_name("MARK")
                    .text("punctuation closing the greeting")
                    .validate(|text: &String| visible(text))
                    .action(|punctuation, mut c| {
                        if let Some(greet) = c.greet_mut() {
                            greet.punctuation = punctuation.trim().to_owned();
                        }
                        c
                    })
                    .id(),
            ]
        });
}

fn declare_take_leave(parser: &mut OptionParser<HelloWorldCli>) {
    parser
        .cmd("take-leave")
        .text("greets, then says goodbye")
        .action(|(), c| HelloWorldCli {
            command: Some(Commands::TakeLeave(TakeLeaveCommand::default())),
            ..c
        })
        .with_children(|p| {
            [
                p.opt::<String>("parting")
                    .value_name("PHRASE")
                    .text("farewell phrase")
                    .validate(|text: &String| visible(text))
                    .action(|parting, mut c| {
                        if let Some(leave) = c.take_leave_mut() {
                            leave.parting = parting;
                        }
                        c
                    })
                    .id(),
                p.opt::<()>("wave")
                    .abbr("w")
                    .text("wave while leaving")
                    .action(|(), mut c| {
                        if let Some(leave) = c.take_leave_mut() {
                            leave.wave = true;
                        }
                        c
                    })
                    .id(),
                p.opt::<String>("gift")
                    .value_name("ITEM")
                    .text("gift to leave behind")
                    .action(|gift, mut c| {
                        if let Some(leave) = c.take_leave_mut() {
                            leave.gift = Some(gift);
                        }
                        c
                    })
                    .id(),
                p.opt::<Duration>("remind-in")
                    .value_name("DELAY")
                    .text("send a reminder after DELAY, e.g. 15m")
                    .validate(|delay| {
                        if delay.is_zero() {
                            Err("reminder delay must be greater than zero".to_owned())
                        } else {
                            Ok(())
                        }
                    })
                    .action(|delay, mut c| {
                        if let Some(leave) = c.take_leave_mut() {
                            leave.remind_in = Some(delay);
                        }
                        c
                    })
                    .id(),
            ]
        });
}
