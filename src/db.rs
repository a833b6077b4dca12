use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

use anyhow::Context;

use crate::config::DbConfig;
use crate::env::ReadEnv;
use crate::error::ConfigError;

/// Postgres connect options from the current `DB_HOST`, `DB_USER` and `DB_NAME`.
///
/// Port, password and TLS fall through to sqlx's libpq-style defaults
/// (`PGPORT`, `PGPASSWORD`, `PGSSLMODE`, ...).
pub fn connect_options<E: ReadEnv>(cfg: &DbConfig<E>) -> Result<PgConnectOptions, ConfigError> {
    let host = cfg.host()?;
    let user = cfg.user()?;
    let name = cfg.name()?;

    Ok(PgConnectOptions::new()
        .host(&host)
        .username(&user)
        .database(&name))
}

/// `user@host:port/database`, safe to log.
pub fn describe(opts: &PgConnectOptions) -> String {
    format!(
        "{}@{}:{}/{}",
        opts.get_username(),
        opts.get_host(),
        opts.get_port(),
        opts.get_database().unwrap_or("")
    )
}

fn env_clamped<E: ReadEnv, T>(env: &E, key: &str, default: T, min: T, max: T) -> T
where
    T: std::str::FromStr + Ord,
{
    env.var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

pub(crate) struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl PoolSettings {
    pub(crate) fn from_env<E: ReadEnv>(env: &E) -> Self {
        let max_connections = env_clamped(env, "DBENV_DB_MAX_CONNECTIONS", 4u32, 1, 32);
        let acquire_timeout_secs = env_clamped(env, "DBENV_DB_ACQUIRE_TIMEOUT_SECS", 10u64, 1, 60);

        Self {
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }
    }
}

pub async fn make_pool<E: ReadEnv>(cfg: &DbConfig<E>) -> anyhow::Result<PgPool> {
    let opts = connect_options(cfg)?;
    let settings = PoolSettings::from_env(cfg.env());

    tracing::info!(
        db = %describe(&opts),
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout.as_secs(),
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(opts)
        .await
        .context("failed to connect to postgres")?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::InMemoryEnv;

    fn env_with_db() -> InMemoryEnv {
        [
            ("DB_NAME", "orders"),
            ("DB_USER", "svc"),
            ("DB_HOST", "db.internal"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn connect_options_use_accessor_values() {
        let cfg = DbConfig::with_env(env_with_db());
        let opts = connect_options(&cfg).unwrap();

        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_username(), "svc");
        assert_eq!(opts.get_database(), Some("orders"));
    }

    #[test]
    fn connect_options_fail_on_first_missing_variable() {
        let env = env_with_db();
        env.remove("DB_USER");
        let cfg = DbConfig::with_env(env);

        let err = connect_options(&cfg).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvironmentVariable {
                key: "user",
                var: "DB_USER"
            }
        );
    }

    #[test]
    fn describe_has_no_password() {
        let cfg = DbConfig::with_env(env_with_db());
        let opts = connect_options(&cfg).unwrap().password("hunter2");

        let line = describe(&opts);
        assert!(line.starts_with("svc@db.internal:"), "{line}");
        assert!(line.ends_with("/orders"), "{line}");
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn describe_includes_port() {
        let cfg = DbConfig::with_env(env_with_db());
        let opts = connect_options(&cfg).unwrap().port(5433);

        assert_eq!(describe(&opts), "svc@db.internal:5433/orders");
    }

    #[test]
    fn pool_settings_default_and_clamp() {
        let env = InMemoryEnv::new();
        let s = PoolSettings::from_env(&env);
        assert_eq!(s.max_connections, 4);
        assert_eq!(s.acquire_timeout, Duration::from_secs(10));

        env.set("DBENV_DB_MAX_CONNECTIONS", "500");
        env.set("DBENV_DB_ACQUIRE_TIMEOUT_SECS", "0");
        let s = PoolSettings::from_env(&env);
        assert_eq!(s.max_connections, 32);
        assert_eq!(s.acquire_timeout, Duration::from_secs(1));

        env.set("DBENV_DB_MAX_CONNECTIONS", "not-a-number");
        let s = PoolSettings::from_env(&env);
        assert_eq!(s.max_connections, 4);
    }
}
