//! Builder entry points and the fluent [`DefBuilder`].
//!
//! Every mutator derives a fresh copy of the definition and substitutes it in
//! the registry under the same [`DefId`], so a builder can be dropped at any
//! point without leaving a half-configured node behind.

use std::sync::Arc;

use crate::definition::{Binding, Effect, TypedBinding};
use crate::{Decode, Decoder, DefId, DefKind, Definition, OptionParser, Validator};

/// Fluent handle on a registered definition whose values decode to `A`.
///
/// Obtained from the entry points on [`OptionParser`]. Mutators return
/// `&mut Self` for chaining; [`DefBuilder::id`] ends a chain with the
/// identity needed by [`DefBuilder::children`].
pub struct DefBuilder<'p, C, A> {
    parser: &'p mut OptionParser<C>,
    id: DefId,
    binding: TypedBinding<C, A>,
}

impl<C: 'static> OptionParser<C> {
    fn register<A: 'static>(
        &mut self,
        kind: DefKind,
        name: String,
        decoder: Decoder<A>,
    ) -> DefBuilder<'_, C, A> {
        let binding = TypedBinding::new(decoder);
        let def = Definition::new(kind, name, Arc::new(binding.clone()));
        let id = self.registry.push(def);
        tracing::trace!(%id, ?kind, "registered definition");
        DefBuilder {
            parser: self,
            id,
            binding,
        }
    }

    /// Adds a header line; the parts are joined with single spaces.
    ///
    /// Header lines open the usage text and are what a version option shows.
    pub fn head<I, S>(&mut self, parts: I) -> DefBuilder<'_, C, ()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = parts
            .into_iter()
            .map(|part| part.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        let mut builder = self.register(DefKind::Header, line.clone(), Decoder::of());
        builder.text(line);
        builder
    }

    /// Adds an option `--name` decoded with the default decoder of `A`.
    pub fn opt<A: Decode + 'static>(&mut self, name: impl Into<String>) -> DefBuilder<'_, C, A> {
        self.opt_with(name, Decoder::of())
    }

    /// Adds an option `--name` decoded with `decoder`.
    pub fn opt_with<A: 'static>(
        &mut self,
        name: impl Into<String>,
        decoder: Decoder<A>,
    ) -> DefBuilder<'_, C, A> {
        self.register(DefKind::Option, name.into(), decoder)
    }

    /// Adds a positional argument decoded with the default decoder of `A`.
    ///
    /// Arguments are required and bind a single token until told otherwise.
    pub fn arg<A: Decode + 'static>(&mut self, name: impl Into<String>) -> DefBuilder<'_, C, A> {
        self.arg_with(name, Decoder::of())
    }

    /// Adds a positional argument decoded with `decoder`.
    pub fn arg_with<A: 'static>(
        &mut self,
        name: impl Into<String>,
        decoder: Decoder<A>,
    ) -> DefBuilder<'_, C, A> {
        self.register(DefKind::Argument, name.into(), decoder)
    }

    /// Adds a command selected by its exact name.
    pub fn cmd(&mut self, name: impl Into<String>) -> DefBuilder<'_, C, ()> {
        self.register(DefKind::Command, name.into(), Decoder::of())
    }

    /// Adds a free-text line to the usage text.
    pub fn note(&mut self, text: impl Into<String>) -> DefBuilder<'_, C, ()> {
        let line = text.into();
        let mut builder = self.register(DefKind::Note, line.clone(), Decoder::of());
        builder.text(line);
        builder
    }

    /// Adds a flag that displays the usage text and then asks the terminator
    /// to end the run.
    pub fn help(&mut self, name: impl Into<String>) -> DefBuilder<'_, C, ()> {
        let mut builder = self.register(DefKind::Option, name.into(), Decoder::of());
        builder
            .update(|def| def.effect = Some(Effect::ShowUsage))
            .text("prints this usage text");
        builder.parser.help_ids.push(builder.id);
        builder
    }

    /// Adds a flag that displays the header lines and then asks the
    /// terminator to end the run.
    pub fn version(&mut self, name: impl Into<String>) -> DefBuilder<'_, C, ()> {
        let mut builder = self.register(DefKind::Option, name.into(), Decoder::of());
        builder
            .update(|def| def.effect = Some(Effect::ShowHeader))
            .text("prints the version");
        builder
    }

    /// Adds a check run against the final configuration of every parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use argfold::{NoTerminate, OptionParser};
    /// use std::sync::Arc;
    ///
    /// let mut parser = OptionParser::<u32>::new("demo")
    ///     .with_terminator(Arc::new(NoTerminate));
    /// parser.opt::<u32>("jobs").action(|jobs, _| jobs);
    /// parser.check_config(|jobs| {
    ///     if *jobs > 0 { Ok(()) } else { Err("jobs must be positive".into()) }
    /// });
    ///
    /// let errors = parser.try_parse(["--jobs", "0"], 1).unwrap_err();
    /// assert_eq!(errors.to_string(), "1: jobs must be positive");
    /// ```
    pub fn check_config<F>(&mut self, check: F) -> DefBuilder<'_, C, ()>
    where
        F: Fn(&C) -> Result<(), String> + Send + Sync + 'static,
    {
        let mut builder = self.register(DefKind::Check, String::new(), Decoder::of());
        let validator = Validator::new(check);
        builder.update(move |def| def.config_validators.push(validator));
        builder
    }
}

impl<C: 'static, A: 'static> DefBuilder<'_, C, A> {
    /// Identity of the definition being built.
    #[must_use]
    pub const fn id(&self) -> DefId {
        self.id
    }

    fn update(&mut self, change: impl FnOnce(&mut Definition<C>)) -> &mut Self {
        self.parser
            .registry
            .replace_with(self.id, |def| def.derive(change));
        self
    }

    fn rebind(&mut self) -> &mut Self {
        let binding: Arc<dyn Binding<C>> = Arc::new(self.binding.clone());
        self.update(move |def| def.binding = binding)
    }

    /// Sets the short flag, written without the leading `-`.
    pub fn abbr(&mut self, short: impl Into<String>) -> &mut Self {
        let flag = short.into();
        self.update(move |def| def.short = Some(flag))
    }

    /// Requires at least one occurrence.
    pub fn required(&mut self) -> &mut Self {
        self.update(|def| def.min_occurs = def.min_occurs.max(1))
    }

    /// Allows the definition to be absent.
    pub fn optional(&mut self) -> &mut Self {
        self.update(|def| def.min_occurs = 0)
    }

    /// Sets the minimum number of occurrences, raising the maximum to match.
    pub fn min_occurs(&mut self, count: usize) -> &mut Self {
        self.update(|def| {
            def.min_occurs = count;
            def.max_occurs = def.max_occurs.max(count);
        })
    }

    /// Sets the number of occurrences after which the definition stops
    /// matching, lowering the minimum to match.
    pub fn max_occurs(&mut self, count: usize) -> &mut Self {
        self.update(|def| {
            def.max_occurs = count;
            def.min_occurs = def.min_occurs.min(count);
        })
    }

    /// Lets the definition match any number of times.
    pub fn unbounded(&mut self) -> &mut Self {
        self.update(|def| def.max_occurs = usize::MAX)
    }

    /// Sets the description shown in usage text.
    pub fn text(&mut self, description: impl Into<String>) -> &mut Self {
        let text = description.into();
        self.update(move |def| def.description = text)
    }

    /// Sets the value placeholder shown in usage text.
    pub fn value_name(&mut self, name: impl Into<String>) -> &mut Self {
        let placeholder = name.into();
        self.update(move |def| def.value_name = Some(placeholder))
    }

    /// Sets the key placeholder shown for `key=value` values.
    pub fn key_name(&mut self, name: impl Into<String>) -> &mut Self {
        let placeholder = name.into();
        self.update(move |def| def.key_name = Some(placeholder))
    }

    /// Sets both placeholders of a `key=value` value.
    pub fn key_value_name(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key_placeholder = key.into();
        let value_placeholder = value.into();
        self.update(move |def| {
            def.key_name = Some(key_placeholder);
            def.value_name = Some(value_placeholder);
        })
    }

    /// Adds a predicate every decoded value must satisfy.
    ///
    /// All predicates run; each rejection becomes its own diagnostic.
    pub fn validate<F>(&mut self, check: F) -> &mut Self
    where
        F: Fn(&A) -> Result<(), String> + Send + Sync + 'static,
    {
        self.binding.validators.push(Validator::new(check));
        self.rebind()
    }

    /// Omits the definition from usage text.
    pub fn hidden(&mut self) -> &mut Self {
        self.update(|def| def.hidden = true)
    }

    /// Supplies the value folded in when the definition never matches.
    ///
    /// The fallback runs after all tokens are consumed and goes through the
    /// validators and action like any other value.
    pub fn with_fallback<F>(&mut self, fallback: F) -> &mut Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        self.binding.fallback = Some(Arc::new(fallback));
        self.rebind()
    }

    /// Sets how a decoded value is folded into the configuration.
    pub fn action<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn(A, C) -> C + Send + Sync + 'static,
    {
        self.binding.action = Arc::new(action);
        self.rebind()
    }

    /// Places `ids` under this definition. They become eligible only once it
    /// has been activated.
    pub fn children(&mut self, ids: impl IntoIterator<Item = DefId>) -> &mut Self {
        for child in ids {
            self.parser.registry.adopt(self.id, child);
        }
        self
    }

    /// Declares children inside `declare` and places them under this
    /// definition.
    pub fn with_children<F, I>(&mut self, declare: F) -> &mut Self
    where
        F: FnOnce(&mut OptionParser<C>) -> I,
        I: IntoIterator<Item = DefId>,
    {
        let ids: Vec<DefId> = declare(&mut *self.parser).into_iter().collect();
        self.children(ids)
    }
}
