//! Source error types.

use thiserror::Error;

/// Errors raised while loading configuration or talking to a database.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file could not be read.
    #[error("config i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config is well-formed TOML but semantically invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Table spec validation failed.
    #[error(transparent)]
    Spec(#[from] maskdb_core::Error),

    /// Database driver error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    /// Whether retrying can plausibly succeed.
    ///
    /// Network-level failures and pool exhaustion are worth another attempt;
    /// auth failures, unknown databases, and bad queries are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Database(sqlx::Error::Io(_)) | Error::Database(sqlx::Error::PoolTimedOut)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_and_pool_timeouts_are_transient() {
        let reset = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
        assert!(Error::Database(sqlx::Error::Io(reset)).is_transient());
        assert!(Error::Database(sqlx::Error::PoolTimedOut).is_transient());
    }

    #[test]
    fn test_config_and_query_errors_are_fatal() {
        assert!(!Error::Config("no tables configured".into()).is_transient());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_transient());
        assert!(!Error::Spec(maskdb_core::Error::EmptyColumnSet("t".into())).is_transient());
    }
}
