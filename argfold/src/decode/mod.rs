//! Value decoders converting one token into a typed value.
//!
//! A decoder is resolved once, when a definition is constructed, and stored
//! alongside it. The [`Decode`] trait supplies the default decoder for a
//! type; [`Decoder::new`] wraps any closure for custom shapes.

use std::fmt;
use std::sync::Arc;

use crate::DecodeError;

mod composite;
mod duration;
mod scalar;

/// Number of value tokens a decoder occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arity {
    /// The definition is a bare flag and takes no value.
    Zero,
    /// The value is a single token, or fused as `--name=value`.
    One,
    /// The value is a `key=value` composite.
    Two,
}

impl Arity {
    /// Whether the definition consumes a value token at all.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::Zero)
    }

    /// Raises [`Arity::Zero`] to [`Arity::One`], keeping the other arities.
    #[must_use]
    pub const fn at_least_one(self) -> Self {
        match self {
            Self::Zero | Self::One => Self::One,
            Self::Two => Self::Two,
        }
    }
}

/// Types with a default token decoder.
///
/// # Examples
///
/// ```
/// use argfold::{Arity, Decode};
/// assert_eq!(<i32 as Decode>::decode("0x1F"), Ok(31));
/// assert_eq!(<(String, i32) as Decode>::ARITY, Arity::Two);
/// ```
pub trait Decode: Sized {
    /// How many tokens the value occupies.
    const ARITY: Arity = Arity::One;

    /// Converts `raw` into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when `raw` is not a valid rendering of the
    /// type.
    fn decode(raw: &str) -> Result<Self, DecodeError>;
}

type DecodeFn<A> = dyn Fn(&str) -> Result<A, DecodeError> + Send + Sync;

/// A decoding capability: an arity plus the function converting a token.
pub struct Decoder<A> {
    arity: Arity,
    decode: Arc<DecodeFn<A>>,
}

impl<A> Decoder<A> {
    /// Wraps `decode` as a decoder of the given arity.
    ///
    /// # Examples
    ///
    /// ```
    /// use argfold::{Arity, DecodeError, Decoder};
    /// let upper = Decoder::new(Arity::One, |raw: &str| {
    ///     if raw.is_empty() {
    ///         Err(DecodeError::new("a word", "empty input"))
    ///     } else {
    ///         Ok(raw.to_uppercase())
    ///     }
    /// });
    /// assert_eq!(upper.decode("abc"), Ok(String::from("ABC")));
    /// ```
    #[must_use]
    pub fn new<F>(arity: Arity, decode: F) -> Self
    where
        F: Fn(&str) -> Result<A, DecodeError> + Send + Sync + 'static,
    {
        Self {
            arity,
            decode: Arc::new(decode),
        }
    }

    /// Number of tokens the decoded value occupies.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Decodes `raw`.
    ///
    /// # Errors
    ///
    /// Propagates the failure reported by the wrapped function.
    pub fn decode(&self, raw: &str) -> Result<A, DecodeError> {
        (self.decode)(raw)
    }
}

impl<A: Decode + 'static> Decoder<A> {
    /// The decoder supplied by the type's [`Decode`] implementation.
    #[must_use]
    pub fn of() -> Self {
        Self::new(A::ARITY, A::decode)
    }
}

impl<A> Clone for Decoder<A> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<A> fmt::Debug for Decoder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("arity", &self.arity)
            .field("decode", &"<fn>")
            .finish()
    }
}

#[cfg(test)]
mod tests;
