//! Database settings read live from the process environment.
//!
//! | Key    | Variable  |
//! |--------|-----------|
//! | `name` | `DB_NAME` |
//! | `user` | `DB_USER` |
//! | `host` | `DB_HOST` |
//!
//! Nothing is cached: every call re-reads the variable, so a value changed
//! between two calls shows up on the second one. There are no defaults.

use std::env::VarError;
use std::fmt;
use std::str::FromStr;

use crate::env::{ReadEnv, SystemEnv};
use crate::error::ConfigError;

/// The closed set of logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbKey {
    Name,
    User,
    Host,
}

impl DbKey {
    pub const ALL: [DbKey; 3] = [DbKey::Name, DbKey::User, DbKey::Host];

    pub fn as_str(self) -> &'static str {
        match self {
            DbKey::Name => "name",
            DbKey::User => "user",
            DbKey::Host => "host",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            DbKey::Name => "DB_NAME",
            DbKey::User => "DB_USER",
            DbKey::Host => "DB_HOST",
        }
    }
}

impl fmt::Display for DbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(DbKey::Name),
            "user" => Ok(DbKey::User),
            "host" => Ok(DbKey::Host),
            other => Err(ConfigError::UnknownKey {
                key: other.to_string(),
            }),
        }
    }
}

/// Read-only view of the database settings over an environment source.
#[derive(Debug, Clone, Copy, Default)]
pub struct DbConfig<E = SystemEnv> {
    env: E,
}

/// The process-wide accessor over the real environment.
pub const DB: DbConfig = DbConfig::new();

impl DbConfig<SystemEnv> {
    pub const fn new() -> Self {
        Self { env: SystemEnv }
    }
}

impl<E: ReadEnv> DbConfig<E> {
    /// Accessor over an injected environment source.
    pub fn with_env(env: E) -> Self {
        Self { env }
    }

    /// The source lookups go through.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Looks up a logical key (`name`, `user` or `host`).
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let key: DbKey = key.parse()?;
        self.get_key(key)
    }

    /// Reads the variable behind an already-parsed key.
    pub fn get_key(&self, key: DbKey) -> Result<String, ConfigError> {
        let var = key.env_var();
        tracing::debug!(key = key.as_str(), var, "reading database setting");

        self.env.var(var).map_err(|e| match e {
            VarError::NotPresent => ConfigError::MissingEnvironmentVariable {
                key: key.as_str(),
                var,
            },
            VarError::NotUnicode(_) => ConfigError::NotUnicode {
                key: key.as_str(),
                var,
            },
        })
    }

    /// `DB_NAME`.
    pub fn name(&self) -> Result<String, ConfigError> {
        self.get_key(DbKey::Name)
    }

    /// `DB_USER`.
    pub fn user(&self) -> Result<String, ConfigError> {
        self.get_key(DbKey::User)
    }

    /// `DB_HOST`.
    pub fn host(&self) -> Result<String, ConfigError> {
        self.get_key(DbKey::Host)
    }
}
