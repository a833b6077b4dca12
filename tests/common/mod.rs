use dbenv::DbKey;

/// Snapshots `DB_NAME`, `DB_USER` and `DB_HOST`, restores them on drop.
///
/// Tests holding one must be `#[serial]`: the process environment is shared.
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        let saved = DbKey::ALL
            .iter()
            .map(|k| (k.env_var(), std::env::var(k.env_var()).ok()))
            .collect();
        Self { saved }
    }

    /// Starts from an environment with none of the three variables.
    pub fn cleared() -> Self {
        let guard = Self::new();
        for key in DbKey::ALL {
            std::env::remove_var(key.env_var());
        }
        guard
    }

    pub fn set(&self, var: &str, value: &str) {
        std::env::set_var(var, value);
    }

    pub fn remove(&self, var: &str) {
        std::env::remove_var(var);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (var, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(var, v),
                None => std::env::remove_var(var),
            }
        }
    }
}
