//! Table specifications.

use crate::error::Error;

/// A table name plus the ordered set of columns to obfuscate.
///
/// Column order matters only for deterministic statement rendering, not for
/// correctness. Identifiers are validated on construction so a hostile or
/// mistyped configuration cannot produce malformed SQL later; rendering
/// never re-checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    table: String,
    columns: Vec<String>,
    key: Option<String>,
}

impl TableSpec {
    /// Create a validated spec from a table name and designated columns.
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Result<Self, Error> {
        let table = table.into();
        validate_identifier(&table)?;

        if columns.is_empty() {
            return Err(Error::EmptyColumnSet(table));
        }
        for (i, column) in columns.iter().enumerate() {
            validate_identifier(column)?;
            if columns[..i].contains(column) {
                return Err(Error::DuplicateColumn {
                    table,
                    column: column.clone(),
                });
            }
        }

        Ok(Self {
            table,
            columns,
            key: None,
        })
    }

    /// Set the key column used to target partial updates.
    ///
    /// The key is fetched alongside the designated columns but never masked,
    /// so it cannot itself be in the designated set.
    pub fn with_key(mut self, key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into();
        validate_identifier(&key)?;
        if self.columns.contains(&key) {
            return Err(Error::MaskedKey {
                table: self.table,
                column: key,
            });
        }
        self.key = Some(key);
        Ok(self)
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Designated columns, in rendering order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Key column, if partial updates were requested.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// All columns the row source must select: designated plus key.
    pub fn select_columns(&self) -> Vec<&str> {
        let mut selected: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        if let Some(key) = self.key.as_deref() {
            selected.push(key);
        }
        selected
    }
}

/// Accepts the unquoted-identifier alphabet: `[A-Za-z0-9_$]`, not starting
/// with a digit. Anything else would need quoting in rendered SQL.
fn validate_identifier(ident: &str) -> Result<(), Error> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(ident.to_string()))
    }
}
