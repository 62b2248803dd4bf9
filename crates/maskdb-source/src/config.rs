//! Run configuration.
//!
//! A run is described by one TOML file: two connection descriptors, the
//! masking policy, and the table → columns map. The file is parsed and
//! fully validated before any row is read, so a bad config never produces
//! a partial run.

use maskdb_core::{MaskPolicy, TableSpec};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::Error;

/// Default per-table row cap. Sampling, not a systemic limit.
pub const DEFAULT_SAMPLE_ROWS: u32 = 50;

/// Default MySQL port.
pub const DEFAULT_PORT: u16 = 3306;

/// One database endpoint.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Host name or address.
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user.
    pub username: String,

    /// Login password.
    #[serde(default)]
    pub password: String,

    /// Database (schema) name.
    pub database: String,
}

// Keeps the password out of logs and error chains.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Masking policy selection and sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MaskingConfig {
    /// Strategy applied to every designated value.
    pub policy: MaskPolicy,

    /// Per-table row cap.
    pub sample_rows: u32,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            policy: MaskPolicy::default(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// Per-table selection: which columns to mask, and optionally which key
/// column to target partial updates at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Designated columns, in rendering order.
    pub columns: Vec<String>,

    /// Key column; present → UPDATE statements, absent → REPLACE.
    #[serde(default)]
    pub key: Option<String>,
}

/// Fully validated run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where rows are read from.
    pub source: ConnectionConfig,

    /// Where statements are replayed, for runs that execute instead of
    /// printing.
    #[serde(default)]
    pub target: Option<ConnectionConfig>,

    /// Policy and sampling settings.
    #[serde(default)]
    pub masking: MaskingConfig,

    /// Table name → column selection. A `BTreeMap` so runs process tables
    /// in a deterministic order.
    pub tables: BTreeMap<String, TableConfig>,
}

impl Config {
    /// Load and validate a config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate config text.
    pub fn from_toml_str(raw: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(raw)?;
        config.table_specs()?;
        Ok(config)
    }

    /// Build the validated table specs, in table-name order.
    pub fn table_specs(&self) -> Result<Vec<TableSpec>, Error> {
        if self.tables.is_empty() {
            return Err(Error::Config("no tables configured".into()));
        }

        let mut specs = Vec::with_capacity(self.tables.len());
        for (table, selection) in &self.tables {
            let mut spec = TableSpec::new(table.clone(), selection.columns.clone())?;
            if let Some(key) = &selection.key {
                spec = spec.with_key(key.clone())?;
            }
            specs.push(spec);
        }
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
        [source]
        host = "127.0.0.1"
        username = "app"
        password = "secret"
        database = "prod"

        [target]
        host = "staging.internal"
        port = 3307
        username = "app"
        password = "other"
        database = "staging"

        [masking]
        policy = "length_tiered"
        sample_rows = 25

        [tables.customer]
        columns = ["email", "phone"]
        key = "id"

        [tables.audit_log]
        columns = ["actor_email"]
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(EXAMPLE).unwrap();

        assert_eq!(config.source.port, DEFAULT_PORT);
        assert_eq!(config.target.as_ref().unwrap().port, 3307);
        assert_eq!(config.masking.policy, MaskPolicy::LengthTiered);
        assert_eq!(config.masking.sample_rows, 25);

        let specs = config.table_specs().unwrap();
        // BTreeMap order: audit_log before customer.
        assert_eq!(specs[0].table(), "audit_log");
        assert_eq!(specs[0].key(), None);
        assert_eq!(specs[1].table(), "customer");
        assert_eq!(specs[1].key(), Some("id"));
        assert_eq!(specs[1].columns(), ["email", "phone"]);
    }

    #[test]
    fn test_defaults_apply_when_sections_are_omitted() {
        let config = Config::from_toml_str(
            r#"
            [source]
            host = "localhost"
            username = "app"
            database = "prod"

            [tables.customer]
            columns = ["email"]
            "#,
        )
        .unwrap();

        assert_eq!(config.masking, MaskingConfig::default());
        assert_eq!(config.masking.sample_rows, DEFAULT_SAMPLE_ROWS);
        assert!(config.target.is_none());
        assert_eq!(config.source.password, "");
    }

    #[test]
    fn test_no_tables_rejected() {
        let err = Config::from_toml_str(
            r#"
            [source]
            host = "localhost"
            username = "app"
            database = "prod"

            [tables]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_identifier_rejected_at_load() {
        let err = Config::from_toml_str(
            r#"
            [source]
            host = "localhost"
            username = "app"
            database = "prod"

            [tables.customer]
            columns = ["email; drop table x"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Spec(maskdb_core::Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = Config::from_toml_str(
            r#"
            [source]
            host = "localhost"
            username = "app"
            database = "prod"

            [masking]
            policy = "rot13"

            [tables.customer]
            columns = ["email"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::from_toml_str(EXAMPLE).unwrap();
        let printed = format!("{:?}", config.source);

        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
