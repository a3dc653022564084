//! Immutable descriptions of the nodes a parser knows about.
//!
//! A [`Definition`] is never mutated once registered. Builder calls derive a
//! modified copy which the registry substitutes under the same [`DefId`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Arity, Validator};

mod binding;

pub(crate) use binding::{Activation, Binding, Failure, TypedBinding};

/// Globally unique identity of a definition.
///
/// Identifiers are assigned from a process-wide counter when a definition is
/// constructed and survive every copy-on-write update. They are lookup keys,
/// never an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefId(u64);

impl DefId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a definition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefKind {
    /// A named option such as `--verbose` or `-f value`.
    Option,
    /// A positional argument.
    Argument,
    /// A sub-command selected by its bare name.
    Command,
    /// Free text shown among the usage rows.
    Note,
    /// Header text shown above the usage line and by `--version`.
    Header,
    /// A whole-configuration check run after all tokens are consumed.
    Check,
}

/// Side effect a built-in option triggers when it is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    ShowUsage,
    ShowHeader,
}

/// One registered option, argument, command, note, header or check.
pub struct Definition<C> {
    pub(crate) id: DefId,
    pub(crate) kind: DefKind,
    pub(crate) name: String,
    pub(crate) short: Option<String>,
    pub(crate) key_name: Option<String>,
    pub(crate) value_name: Option<String>,
    pub(crate) description: String,
    pub(crate) binding: Arc<dyn Binding<C>>,
    pub(crate) config_validators: Vec<Validator<C>>,
    pub(crate) parent: Option<DefId>,
    pub(crate) min_occurs: usize,
    pub(crate) max_occurs: usize,
    pub(crate) hidden: bool,
    pub(crate) effect: Option<Effect>,
}

impl<C> Definition<C> {
    pub(crate) fn new(kind: DefKind, name: String, binding: Arc<dyn Binding<C>>) -> Self {
        let min_occurs = usize::from(kind == DefKind::Argument);
        Self {
            id: DefId::next(),
            kind,
            name,
            short: None,
            key_name: None,
            value_name: None,
            description: String::new(),
            binding,
            config_validators: Vec::new(),
            parent: None,
            min_occurs,
            max_occurs: 1,
            hidden: false,
            effect: None,
        }
    }

    /// Copy of this definition with `change` applied.
    #[must_use]
    pub(crate) fn derive(&self, change: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        change(&mut next);
        next
    }

    /// Identity of the definition.
    #[must_use]
    pub const fn id(&self) -> DefId {
        self.id
    }

    /// What the definition describes.
    #[must_use]
    pub const fn kind(&self) -> DefKind {
        self.kind
    }

    /// Long name, argument name, command name or free text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short flag without the leading `-`.
    #[must_use]
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Placeholder used for the key of `key=value` values in usage text.
    #[must_use]
    pub fn key_name(&self) -> Option<&str> {
        self.key_name.as_deref()
    }

    /// Placeholder used for the value in usage text.
    #[must_use]
    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    /// Help text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parent established through `children`, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<DefId> {
        self.parent
    }

    /// Minimum number of occurrences for a successful parse.
    #[must_use]
    pub const fn min_occurs(&self) -> usize {
        self.min_occurs
    }

    /// Occurrences after which the definition stops matching.
    #[must_use]
    pub const fn max_occurs(&self) -> usize {
        self.max_occurs
    }

    /// Whether usage text omits the definition.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether a fallback value is supplied when the definition never matches.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.binding.has_fallback()
    }

    /// Number of value tokens the definition's decoder occupies.
    #[must_use]
    pub fn arity(&self) -> Arity {
        self.binding.arity()
    }

    /// Name as written on the command line: `--name` for options.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.kind {
            DefKind::Option => format!("--{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Phrase naming the definition in diagnostics, e.g. `option --foo`.
    #[must_use]
    pub fn short_description(&self) -> String {
        let noun = match self.kind {
            DefKind::Option => "option",
            DefKind::Argument => "argument",
            DefKind::Command => "command",
            DefKind::Note => "note",
            DefKind::Header => "header",
            DefKind::Check => "check",
        };
        format!("{noun} {}", self.full_name())
    }
}

impl<C> Clone for Definition<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            name: self.name.clone(),
            short: self.short.clone(),
            key_name: self.key_name.clone(),
            value_name: self.value_name.clone(),
            description: self.description.clone(),
            binding: Arc::clone(&self.binding),
            config_validators: self.config_validators.clone(),
            parent: self.parent,
            min_occurs: self.min_occurs,
            max_occurs: self.max_occurs,
            hidden: self.hidden,
            effect: self.effect,
        }
    }
}

impl<C> fmt::Debug for Definition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("short", &self.short)
            .field("parent", &self.parent)
            .field("min_occurs", &self.min_occurs)
            .field("max_occurs", &self.max_occurs)
            .field("hidden", &self.hidden)
            .field("arity", &self.binding.arity())
            .finish_non_exhaustive()
    }
}
