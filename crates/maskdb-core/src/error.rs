//! Core error types.

use thiserror::Error;

/// Specification validation errors.
///
/// Masking and row transformation are total and cannot fail; everything that
/// can go wrong in this crate is caught while validating a [`TableSpec`]
/// before any row is processed.
///
/// [`TableSpec`]: crate::spec::TableSpec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Identifier cannot be safely embedded in rendered SQL.
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    /// Table spec with an empty designated-column list.
    #[error("table {0} has no columns to mask")]
    EmptyColumnSet(String),

    /// The same column is designated more than once.
    #[error("table {table} lists column {column} more than once")]
    DuplicateColumn {
        /// Table being validated.
        table: String,
        /// Offending column name.
        column: String,
    },

    /// The key column is also designated for masking.
    #[error("table {table}: key column {column} cannot also be masked")]
    MaskedKey {
        /// Table being validated.
        table: String,
        /// Offending column name.
        column: String,
    },
}
