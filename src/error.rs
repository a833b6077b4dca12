use thiserror::Error;

/// Errors raised while reading a database setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The key is not one of `name`, `user`, `host`.
    #[error("unknown config key: {key:?}")]
    UnknownKey { key: String },

    /// The key is known but its backing variable is unset.
    #[error("{var} is missing (needed for config key {key:?})")]
    MissingEnvironmentVariable { key: &'static str, var: &'static str },

    /// The backing variable is set but is not valid Unicode.
    #[error("{var} is not valid unicode (config key {key:?})")]
    NotUnicode { key: &'static str, var: &'static str },
}

impl ConfigError {
    pub fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingEnvironmentVariable { .. })
    }
}
