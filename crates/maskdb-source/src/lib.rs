//! Maskdb Source - configuration loading and MySQL row supply.
//!
//! Everything the pure core treats as a collaborator lives here: the TOML
//! run configuration (which tables, which columns, which endpoints) and the
//! `sqlx`-backed row source that samples a bounded number of rows per table.

pub mod config;
pub mod db;
pub mod error;

pub use config::{Config, ConnectionConfig, MaskingConfig, TableConfig};
pub use db::{Database, RowSource};
pub use error::Error;
