//! Typed access to database connection settings held in environment variables.
//!
//! ```no_run
//! use dbenv::DB;
//!
//! let host = DB.get("host")?;
//! let user = DB.user()?;
//! # Ok::<(), dbenv::ConfigError>(())
//! ```

pub mod config;
pub mod db;
pub mod env;
pub mod error;

pub use config::{DbConfig, DbKey, DB};
pub use env::{ReadEnv, SystemEnv};
pub use error::ConfigError;

#[cfg(any(test, feature = "test-support"))]
pub use env::InMemoryEnv;
