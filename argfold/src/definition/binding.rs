//! Typed decoding, validation and folding behind a type-erased seam.
//!
//! A definition is stored without its value type. [`TypedBinding`] keeps the
//! decoder, validators, action and fallback for one value type and exposes
//! them through the object-safe [`Binding`] trait.

use std::sync::Arc;

use crate::validate::validate_value;
use crate::{Arity, DecodeError, Decoder, Validator};

type Action<A, C> = dyn Fn(A, C) -> C + Send + Sync;
type Fallback<A> = dyn Fn() -> A + Send + Sync;

/// Why an activation was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    Decode(DecodeError),
    Invalid(String),
}

/// Result of folding one value into the configuration.
///
/// When `failures` is non-empty the configuration is returned untouched.
pub(crate) struct Activation<C> {
    pub(crate) config: C,
    pub(crate) failures: Vec<Failure>,
}

impl<C> Activation<C> {
    const fn accepted(config: C) -> Self {
        Self {
            config,
            failures: Vec::new(),
        }
    }

    const fn rejected(config: C, failures: Vec<Failure>) -> Self {
        Self { config, failures }
    }
}

/// Type-erased view of a definition's value handling.
pub(crate) trait Binding<C>: Send + Sync {
    fn arity(&self) -> Arity;

    fn has_fallback(&self) -> bool;

    /// Decodes `raw`, validates the value and folds it into `config`.
    fn activate(&self, raw: &str, config: C) -> Activation<C>;

    /// Validates and folds the fallback value; a binding without one returns
    /// `config` unchanged.
    fn activate_fallback(&self, config: C) -> Activation<C>;
}

pub(crate) struct TypedBinding<C, A> {
    pub(crate) decoder: Decoder<A>,
    pub(crate) action: Arc<Action<A, C>>,
    pub(crate) validators: Vec<Validator<A>>,
    pub(crate) fallback: Option<Arc<Fallback<A>>>,
}

impl<C: 'static, A: 'static> TypedBinding<C, A> {
    pub(crate) fn new(decoder: Decoder<A>) -> Self {
        Self {
            decoder,
            action: Arc::new(|_, config| config),
            validators: Vec::new(),
            fallback: None,
        }
    }
}

impl<C, A> TypedBinding<C, A> {
    fn fold(&self, value: A, config: C) -> Activation<C> {
        match validate_value(&self.validators, &value) {
            Ok(()) => Activation::accepted((self.action)(value, config)),
            Err(messages) => Activation::rejected(
                config,
                messages.into_iter().map(Failure::Invalid).collect(),
            ),
        }
    }
}

impl<C, A> Clone for TypedBinding<C, A> {
    fn clone(&self) -> Self {
        Self {
            decoder: self.decoder.clone(),
            action: Arc::clone(&self.action),
            validators: self.validators.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<C, A> Binding<C> for TypedBinding<C, A> {
    fn arity(&self) -> Arity {
        self.decoder.arity()
    }

    fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    fn activate(&self, raw: &str, config: C) -> Activation<C> {
        match self.decoder.decode(raw) {
            Ok(value) => self.fold(value, config),
            Err(err) => Activation::rejected(config, vec![Failure::Decode(err)]),
        }
    }

    fn activate_fallback(&self, config: C) -> Activation<C> {
        match &self.fallback {
            Some(fallback) => self.fold(fallback(), config),
            None => Activation::accepted(config),
        }
    }
}
