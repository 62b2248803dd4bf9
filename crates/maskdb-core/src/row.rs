//! Row model.
//!
//! Columns are kept as an ordered list of `(name, value)` pairs rather than
//! a hash map: result sets are small, select order is meaningful for
//! deterministic output, and lookups scan a handful of entries.

/// One result-set row: ordered column name → nullable text value.
///
/// `None` represents SQL NULL. Column names are unique within a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Option<String>)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column with a non-NULL value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, Some(value.into()));
        self
    }

    /// Append a column holding SQL NULL.
    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.push(name, None);
        self
    }

    /// Append a column with an already-nullable value.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.columns.push((name.into(), value));
    }

    /// Whether the row carries the named column (NULL or not).
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// The non-NULL value of the named column.
    ///
    /// Returns `None` both for a missing column and for a NULL value; use
    /// [`Row::contains`] to tell the two apart.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Replace the value of an existing column.
    ///
    /// Returns false (and changes nothing) if the column is absent.
    pub fn set(&mut self, name: &str, value: Option<String>) -> bool {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in select order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}
