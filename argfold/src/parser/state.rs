//! State of one parse: pending scopes, occurrence counts and diagnostics.
//!
//! The token loop runs once, left to right, without backtracking. Every
//! problem is recorded and the loop carries on, so a single pass surfaces
//! every diagnostic.

use std::collections::HashMap;

use super::OptionParser;
use super::pending::PendingSet;
use crate::definition::{Activation, Effect, Failure};
use crate::report::ExitState;
use crate::validate::validate_value;
use crate::{Arity, DefId, DefKind, Definition, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Error,
    Warning,
}

pub(crate) struct Outcome<C> {
    pub(crate) config: C,
    pub(crate) diagnostics: Vec<(Severity, ParseError)>,
}

/// How an option token matched a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit<'t> {
    Flag,
    Value { raw: &'t str, consumed: usize },
    MissingValue,
}

/// What follows a matched option name inside the token.
enum Tail<'t> {
    Exact,
    Fused(&'t str),
}

pub(crate) struct ParseState<'p, C> {
    parser: &'p OptionParser<C>,
    options: PendingSet,
    arguments: PendingSet,
    commands: PendingSet,
    occurrences: HashMap<DefId, usize>,
    diagnostics: Vec<(Severity, ParseError)>,
}

impl<'p, C> ParseState<'p, C> {
    pub(crate) fn new(parser: &'p OptionParser<C>) -> Self {
        let top_level =
            |kind| PendingSet::from_ids(parser.registry.scoped(kind, None).map(Definition::id));
        Self {
            parser,
            options: top_level(DefKind::Option),
            arguments: top_level(DefKind::Argument),
            commands: top_level(DefKind::Command),
            occurrences: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, tokens: &[&str], init: C) -> Outcome<C> {
        let mut config = init;
        let mut cursor = 0;
        while let Some(token) = tokens.get(cursor).copied() {
            let (next, consumed) = self.step(tokens, cursor, token, config);
            config = next;
            cursor += consumed;
        }
        let settled = self.apply_fallbacks(config);
        self.check_mandatory();
        self.check_config(&settled);
        Outcome {
            config: settled,
            diagnostics: self.diagnostics,
        }
    }

    /// Handles the token at `cursor`, returning the folded configuration and
    /// the number of tokens consumed.
    fn step(&mut self, tokens: &[&str], cursor: usize, token: &str, config: C) -> (C, usize) {
        let Some((def, hit)) = self.match_option(tokens, cursor) else {
            return (self.classify(token, config), 1);
        };
        self.record_occurrence(def);
        match hit {
            Hit::Flag => (self.activate(def, "", config), 1),
            Hit::Value { raw, consumed } => (self.activate(def, raw, config), consumed),
            Hit::MissingValue => {
                self.error(ParseError::MissingValue {
                    flag: token.to_owned(),
                });
                (config, 1)
            }
        }
    }

    /// First pending option, in scope order, matching the token at `cursor`.
    fn match_option<'t>(
        &self,
        tokens: &[&'t str],
        cursor: usize,
    ) -> Option<(&'p Definition<C>, Hit<'t>)> {
        let parser = self.parser;
        self.options
            .iter()
            .filter_map(|id| parser.registry.get(id))
            .find_map(|def| token_hit(def, tokens, cursor).map(|hit| (def, hit)))
    }

    /// Handles a token no pending option matched.
    fn classify(&mut self, token: &str, config: C) -> C {
        if token.starts_with("--") || token == "-" {
            self.error(ParseError::UnknownOption {
                token: token.to_owned(),
            });
            return config;
        }
        if let Some(group) = token.strip_prefix('-') {
            return self.short_group(group, config);
        }
        let parser = self.parser;
        let command = self
            .commands
            .iter()
            .filter_map(|id| parser.registry.get(id))
            .find(|cmd| cmd.name() == token);
        if let Some(cmd) = command {
            self.record_occurrence(cmd);
            return self.activate(cmd, "", config);
        }
        match self.arguments.first().and_then(|id| parser.registry.get(id)) {
            Some(arg) => {
                self.record_occurrence(arg);
                self.activate(arg, token, config)
            }
            None => {
                self.error(ParseError::UnknownArgument {
                    token: token.to_owned(),
                });
                config
            }
        }
    }

    /// Resolves bundled short flags such as `-abc`, longest prefix first.
    fn short_group(&mut self, group: &str, mut config: C) -> C {
        let mut remainder = group;
        while !remainder.is_empty() {
            let Some((def, len)) = self.longest_short_flag(remainder) else {
                self.error(ParseError::UnknownOption {
                    token: format!("-{remainder}"),
                });
                break;
            };
            tracing::trace!(flag = %def.full_name(), "resolved bundled short flag");
            self.record_occurrence(def);
            config = self.activate(def, "", config);
            remainder = remainder.get(len..).unwrap_or_default();
        }
        config
    }

    fn longest_short_flag(&self, remainder: &str) -> Option<(&'p Definition<C>, usize)> {
        let parser = self.parser;
        let mut ends: Vec<usize> = remainder
            .char_indices()
            .map(|(start, ch)| start + ch.len_utf8())
            .collect();
        ends.reverse();
        ends.into_iter().find_map(|end| {
            let prefix = remainder.get(..end)?;
            self.options
                .iter()
                .filter_map(|id| parser.registry.get(id))
                .find(|def| def.arity() == Arity::Zero && def.short() == Some(prefix))
                .map(|def| (def, end))
        })
    }

    fn occurrences_of(&self, id: DefId) -> usize {
        self.occurrences.get(&id).copied().unwrap_or(0)
    }

    /// Counts one occurrence and retires the definition once its upper
    /// bound is reached.
    fn record_occurrence(&mut self, def: &Definition<C>) {
        let count = self.occurrences.entry(def.id()).or_insert(0);
        *count += 1;
        let occurrences = *count;
        if occurrences < def.max_occurs() {
            return;
        }
        let pending = match def.kind() {
            DefKind::Option => &mut self.options,
            DefKind::Argument => &mut self.arguments,
            DefKind::Command => &mut self.commands,
            DefKind::Note | DefKind::Header | DefKind::Check => return,
        };
        if pending.remove(def.id()) {
            tracing::debug!(
                definition = %def.full_name(),
                occurrences,
                "maximum occurrences reached; definition retired"
            );
        }
    }

    fn activate(&mut self, def: &Definition<C>, raw: &str, config: C) -> C {
        let Activation { config, failures } = def.binding.activate(raw, config);
        self.settle(def, raw, failures);
        config
    }

    /// Records the failures of an activation, or applies its consequences
    /// when there were none.
    fn settle(&mut self, def: &Definition<C>, raw: &str, failures: Vec<Failure>) {
        if failures.is_empty() {
            tracing::debug!(definition = %def.full_name(), "activated");
            self.run_effect(def);
            self.enter_scope(def);
            return;
        }
        for failure in failures {
            let error = match failure {
                Failure::Decode(source) => ParseError::Decode {
                    subject: def.short_description(),
                    raw: raw.to_owned(),
                    source,
                },
                Failure::Invalid(message) => ParseError::Validation {
                    subject: def.short_description(),
                    message,
                },
            };
            self.error(error);
        }
    }

    fn run_effect(&self, def: &Definition<C>) {
        match def.effect {
            Some(Effect::ShowUsage) => {
                self.parser.show_usage();
                self.parser.terminator().terminate(ExitState::Success);
            }
            Some(Effect::ShowHeader) => {
                self.parser.reporter().display_out(&self.parser.header());
                self.parser.terminator().terminate(ExitState::Success);
            }
            None => {}
        }
    }

    /// Closes the command branch and makes the children of `def` eligible
    /// ahead of everything already pending.
    fn enter_scope(&mut self, def: &Definition<C>) {
        let registry = &self.parser.registry;
        let scope = Some(def.id());
        self.commands.clear();
        self.options
            .prepend(registry.scoped(DefKind::Option, scope).map(Definition::id));
        self.arguments
            .prepend(registry.scoped(DefKind::Argument, scope).map(Definition::id));
        self.commands
            .prepend(registry.scoped(DefKind::Command, scope).map(Definition::id));
    }

    fn apply_fallbacks(&mut self, mut config: C) -> C {
        let parser = self.parser;
        let unused: Vec<&'p Definition<C>> = self
            .options
            .iter()
            .filter_map(|id| parser.registry.get(id))
            .filter(|def| def.has_fallback() && self.occurrences_of(def.id()) == 0)
            .collect();
        for def in unused {
            tracing::debug!(definition = %def.full_name(), "applying fallback");
            self.record_occurrence(def);
            let Activation {
                config: next,
                failures,
            } = def.binding.activate_fallback(config);
            config = next;
            self.settle(def, "", failures);
        }
        config
    }

    fn check_mandatory(&mut self) {
        let parser = self.parser;
        let missing: Vec<ParseError> = self
            .options
            .iter()
            .chain(self.arguments.iter())
            .filter_map(|id| parser.registry.get(id))
            .filter(|def| self.occurrences_of(def.id()) < def.min_occurs())
            .map(|def| ParseError::MissingMandatory {
                subject: def.short_description(),
                min_occurs: def.min_occurs(),
            })
            .collect();
        for error in missing {
            self.error(error);
        }
    }

    fn check_config(&mut self, config: &C) {
        let parser = self.parser;
        for check in parser.registry.of_kind(DefKind::Check) {
            if let Err(messages) = validate_value(&check.config_validators, config) {
                for message in messages {
                    self.error(ParseError::ConfigCheck { message });
                }
            }
        }
    }

    /// Records a diagnostic. Unrecognised tokens are only warnings when the
    /// settings say so.
    fn error(&mut self, error: ParseError) {
        let severity =
            if error.is_unrecognised() && !self.parser.settings().error_on_unknown_argument {
                Severity::Warning
            } else {
                Severity::Error
            };
        tracing::trace!(%error, ?severity, "diagnostic");
        self.diagnostics.push((severity, error));
    }
}

fn strip_name<'t>(rest: &'t str, name: &str) -> Option<Tail<'t>> {
    if name.is_empty() {
        return None;
    }
    let tail = rest.strip_prefix(name)?;
    if tail.is_empty() {
        return Some(Tail::Exact);
    }
    tail.strip_prefix(':')
        .or_else(|| tail.strip_prefix('='))
        .map(Tail::Fused)
}

/// Matches the token at `cursor` against the long name, then the short flag,
/// of `def`.
fn token_hit<'t, C>(def: &Definition<C>, tokens: &[&'t str], cursor: usize) -> Option<Hit<'t>> {
    let token = *tokens.get(cursor)?;
    let long = token
        .strip_prefix("--")
        .and_then(|rest| strip_name(rest, def.name()));
    let tail = long.or_else(|| {
        let short = def.short()?;
        let rest = token.strip_prefix('-').filter(|rest| !rest.starts_with('-'))?;
        strip_name(rest, short)
    })?;
    match (tail, def.arity().takes_value()) {
        (Tail::Exact, false) => Some(Hit::Flag),
        (Tail::Exact, true) => Some(
            tokens
                .get(cursor + 1)
                .copied()
                .map_or(Hit::MissingValue, |raw| Hit::Value { raw, consumed: 2 }),
        ),
        (Tail::Fused(raw), true) => Some(Hit::Value { raw, consumed: 1 }),
        (Tail::Fused(_), false) => None,
    }
}
