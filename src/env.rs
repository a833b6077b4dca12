//! Where environment reads come from.
//!
//! Production code reads the process environment through [`SystemEnv`].
//! Tests inject [`InMemoryEnv`] (behind `#[cfg(test)]` or the `test-support`
//! feature) so they never touch process-global state.

use std::env::VarError;

/// A source of environment variables.
///
/// Does **not** require `Send + Sync`; add the bounds at the call site when
/// an accessor has to cross threads.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

impl<E: ReadEnv + ?Sized> ReadEnv for &E {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        (**self).var(key)
    }
}

/// Zero-sized; delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use mem::InMemoryEnv;

#[cfg(any(test, feature = "test-support"))]
mod mem {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::env::VarError;

    use super::ReadEnv;

    /// `RefCell<HashMap>`-backed environment. Not `Sync`.
    #[derive(Debug, Default)]
    pub struct InMemoryEnv {
        vars: RefCell<HashMap<String, String>>,
    }

    impl InMemoryEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
            self.vars.borrow_mut().insert(key.into(), value.into());
        }

        pub fn remove(&self, key: &str) {
            self.vars.borrow_mut().remove(key);
        }
    }

    impl<K, V> FromIterator<(K, V)> for InMemoryEnv
    where
        K: Into<String>,
        V: Into<String>,
    {
        fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
            let env = Self::new();
            for (k, v) in iter {
                env.set(k, v);
            }
            env
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Result<String, VarError> {
            self.vars
                .borrow()
                .get(key)
                .cloned()
                .ok_or(VarError::NotPresent)
        }
    }
}
