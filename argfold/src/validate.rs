//! Validation engine shared by value validators and configuration checks.
//!
//! Every validator in a chain runs, even after an earlier one failed, so a
//! single parse surfaces every problem with a value.

use std::fmt;
use std::sync::Arc;

type Predicate<T> = dyn Fn(&T) -> Result<(), String> + Send + Sync;

/// A predicate over `T` returning a failure message when it rejects a value.
pub struct Validator<T> {
    check: Arc<Predicate<T>>,
}

impl<T> Validator<T> {
    /// Wraps `check` as a validator.
    #[must_use]
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Runs the predicate against `value`.
    ///
    /// # Errors
    ///
    /// Returns the predicate's failure message.
    pub fn check(&self, value: &T) -> Result<(), String> {
        (self.check)(value)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(<fn>)")
    }
}

/// Runs every validator against `value`, collecting all failure messages.
///
/// # Errors
///
/// Returns the messages of every failing validator, in chain order.
///
/// # Examples
///
/// ```
/// use argfold::{Validator, validate_value};
/// let checks = [
///     Validator::new(|n: &i32| if *n > 0 { Ok(()) } else { Err("must be positive".to_owned()) }),
///     Validator::new(|n: &i32| if *n % 2 == 0 { Ok(()) } else { Err("must be even".to_owned()) }),
/// ];
/// assert_eq!(validate_value(&checks, &4), Ok(()));
/// assert_eq!(
///     validate_value(&checks, &-3),
///     Err(vec!["must be positive".to_owned(), "must be even".to_owned()])
/// );
/// ```
pub fn validate_value<T>(validators: &[Validator<T>], value: &T) -> Result<(), Vec<String>> {
    let failures: Vec<String> = validators
        .iter()
        .filter_map(|validator| validator.check(value).err())
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{Validator, validate_value};

    #[test]
    fn empty_chain_accepts_everything() {
        assert_eq!(validate_value::<i32>(&[], &0), Ok(()));
    }

    #[test]
    fn chain_does_not_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let checks = vec![
            Validator::new(|_: &String| Err("first".to_owned())),
            Validator::new(move |_: &String| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("second".to_owned())
            }),
        ];
        let outcome = validate_value(&checks, &String::from("x"));
        assert_eq!(outcome, Err(vec!["first".to_owned(), "second".to_owned()]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
