//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global mutex and returns an RAII guard that
//! restores the previous state when dropped.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("ARGFOLD_DOC_KEY", "VALUE");
//! assert_eq!(std::env::var("ARGFOLD_DOC_KEY").as_deref(), Ok("VALUE"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

use parking_lot::Mutex;

static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping the guard restores the variable immediately"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let name = key.into();
    let original = with_lock(|| {
        let previous = env::var_os(&name);
        // SAFETY: every mutation in the test suite goes through `ENV_MUTEX`.
        unsafe { env::set_var(&name, value) };
        previous
    });
    EnvVarGuard {
        key: name,
        original,
    }
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    let name = key.into();
    let original = with_lock(|| {
        let previous = env::var_os(&name);
        // SAFETY: every mutation in the test suite goes through `ENV_MUTEX`.
        unsafe { env::remove_var(&name) };
        previous
    });
    EnvVarGuard {
        key: name,
        original,
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let original = self.original.take();
        with_lock(|| match original {
            // SAFETY: serialised by `ENV_MUTEX`.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: serialised by `ENV_MUTEX`.
            None => unsafe { env::remove_var(&self.key) },
        });
    }
}

fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
