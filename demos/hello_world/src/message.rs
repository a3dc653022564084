//! Greeting planning and rendering for the `hello_world` demo.

use std::io::{self, Write};

use crate::cli::{DeliveryMode, GreetCommand, HelloWorldCli, TakeLeaveCommand};
use crate::error::{HelloWorldError, ValidationError};

/// Computed greeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    message: String,
    preamble: Option<String>,
}

impl GreetingPlan {
    /// Returns the formatted greeting message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the optional preamble preceding the greeting.
    #[must_use]
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }
}

/// Computed farewell including the greeting that opens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeLeavePlan {
    greeting: GreetingPlan,
    farewell: String,
}

impl TakeLeavePlan {
    /// Returns the embedded greeting.
    #[must_use]
    pub const fn greeting(&self) -> &GreetingPlan {
        &self.greeting
    }

    /// Returns the farewell description.
    #[must_use]
    pub fn farewell(&self) -> &str {
        &self.farewell
    }
}

/// Builds a [`GreetingPlan`] from the resolved configuration.
///
/// # Errors
///
/// Returns a [`HelloWorldError`] when the configuration fails validation.
///
/// # Examples
///
/// ```rust
/// use hello_world::cli::{GreetCommand, HelloWorldCli};
/// use hello_world::message::build_plan;
///
/// let config = HelloWorldCli {
///     recipient: "Ada Lovelace".into(),
///     ..HelloWorldCli::default()
/// };
/// let plan = build_plan(&config, &GreetCommand::default()).expect("plan builds");
/// assert_eq!(plan.message(), "Hello, Ada Lovelace!");
/// ```
pub fn build_plan(
    config: &HelloWorldCli,
    command: &GreetCommand,
) -> Result<GreetingPlan, HelloWorldError> {
    config.validate()?;
    let base = format!("{}, {}", config.trimmed_salutations().join(" "), config.recipient);
    let message = match config.delivery_mode() {
        DeliveryMode::Standard => format!("{base}{}", command.punctuation),
        DeliveryMode::Enthusiastic => format!("{}{}", base.to_uppercase(), command.punctuation),
        DeliveryMode::Quiet => format!("{base}..."),
    };
    let preamble = command
        .preamble
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned);
    Ok(GreetingPlan { message, preamble })
}

/// Builds a [`TakeLeavePlan`]: a standard greeting followed by a farewell.
///
/// # Errors
///
/// Returns a [`HelloWorldError`] when the configuration or the farewell
/// phrase is invalid.
pub fn build_take_leave_plan(
    config: &HelloWorldCli,
    command: &TakeLeaveCommand,
) -> Result<TakeLeavePlan, HelloWorldError> {
    let parting = command.parting.trim();
    if parting.is_empty() {
        return Err(ValidationError::BlankFarewell.into());
    }
    let greeting = build_plan(config, &GreetCommand::default())?;
    let mut farewell = format!("{parting}, {}.", config.recipient);
    let fragments = farewell_fragments(command);
    if !fragments.is_empty() {
        farewell.push_str(" Then ");
        farewell.push_str(&fragments.join(" and "));
        farewell.push('.');
    }
    Ok(TakeLeavePlan { greeting, farewell })
}

fn farewell_fragments(command: &TakeLeaveCommand) -> Vec<String> {
    let mut fragments = Vec::new();
    if command.wave {
        fragments.push("waves".to_owned());
    }
    if let Some(gift) = &command.gift {
        fragments.push(format!("leaves {}", gift.trim()));
    }
    if let Some(delay) = command.remind_in {
        fragments.push(format!("sends a reminder in {delay:?}"));
    }
    fragments
}

fn write_plan_to<W: Write>(writer: &mut W, plan: &GreetingPlan) -> io::Result<()> {
    if let Some(preamble) = plan.preamble() {
        writeln!(writer, "{preamble}")?;
    }
    writeln!(writer, "{}", plan.message())
}

fn write_take_leave_to<W: Write>(writer: &mut W, plan: &TakeLeavePlan) -> io::Result<()> {
    write_plan_to(writer, plan.greeting())?;
    writeln!(writer, "{}", plan.farewell())
}

/// Prints the greeting to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_plan(plan: &GreetingPlan) -> io::Result<()> {
    write_plan_to(&mut io::stdout().lock(), plan)
}

/// Prints the greeting and farewell to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_take_leave(plan: &TakeLeavePlan) -> io::Result<()> {
    write_take_leave_to(&mut io::stdout().lock(), plan)
}
