//! SQL statement rendering.
//!
//! One rendered statement overwrites one row, restricted to the designated
//! columns. Tables without a key column get `REPLACE INTO`; tables with one
//! get a partial `UPDATE` targeted at that key. Identifiers were validated
//! when the [`TableSpec`] was built; values are escaped here, in exactly one
//! place.
//!
//! [`TableSpec`]: crate::spec::TableSpec

use crate::row::Row;
use crate::spec::TableSpec;
use std::fmt;

/// A rendered overwrite statement for one row.
///
/// Constructed per row and emitted immediately; the text is final and
/// newline-free. Emitters append the terminating newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
}

impl Statement {
    /// Statement text, `;`-terminated.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume into the underlying text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render `REPLACE INTO <table> (<cols>) VALUES (<vals>);`.
pub(crate) fn render_replace(spec: &TableSpec, row: &Row) -> Statement {
    let columns = spec.columns().join(",");
    let values: Vec<String> = spec
        .columns()
        .iter()
        .map(|column| literal(row.value(column)))
        .collect();

    Statement {
        text: format!(
            "REPLACE INTO {} ({}) VALUES ({});",
            spec.table(),
            columns,
            values.join(",")
        ),
    }
}

/// Render `UPDATE <table> SET <col>=<val>,... WHERE <key>=<val>;`.
///
/// The key value is read from the row as-is; a NULL key degrades to
/// `IS NULL` so the statement stays well-formed.
pub(crate) fn render_update(spec: &TableSpec, row: &Row, key: &str) -> Statement {
    let assignments: Vec<String> = spec
        .columns()
        .iter()
        .map(|column| format!("{}={}", column, literal(row.value(column))))
        .collect();

    let predicate = match row.value(key) {
        Some(value) => format!("{}={}", key, literal(Some(value))),
        None => format!("{} IS NULL", key),
    };

    Statement {
        text: format!(
            "UPDATE {} SET {} WHERE {};",
            spec.table(),
            assignments.join(","),
            predicate
        ),
    }
}

/// Quote a nullable value as a SQL literal.
fn literal(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{}'", escape(value)),
        None => "NULL".to_string(),
    }
}

/// Escape backslashes and single quotes. Backslashes first, or the escapes
/// themselves would be re-escaped.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(columns: &[&str]) -> TableSpec {
        TableSpec::new("customer", columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_replace_statement_shape() {
        let row = Row::new()
            .with_value("email", "a**@*.com")
            .with_value("phone", "0**-**9");
        let statement = render_replace(&spec(&["email", "phone"]), &row);

        assert_eq!(
            statement.as_str(),
            "REPLACE INTO customer (email,phone) VALUES ('a**@*.com','0**-**9');"
        );
    }

    #[test]
    fn test_replace_column_order_follows_spec() {
        let row = Row::new().with_value("email", "e").with_value("phone", "p");
        let statement = render_replace(&spec(&["phone", "email"]), &row);

        assert_eq!(
            statement.as_str(),
            "REPLACE INTO customer (phone,email) VALUES ('p','e');"
        );
    }

    #[test]
    fn test_missing_and_null_values_render_null() {
        let row = Row::new().with_null("email");
        let statement = render_replace(&spec(&["email", "phone"]), &row);

        assert_eq!(
            statement.as_str(),
            "REPLACE INTO customer (email,phone) VALUES (NULL,NULL);"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let row = Row::new().with_value("email", r"o'bri\an");
        let statement = render_replace(&spec(&["email"]), &row);

        assert_eq!(
            statement.as_str(),
            r"REPLACE INTO customer (email) VALUES ('o\'bri\\an');"
        );
    }

    #[test]
    fn test_update_statement_shape() {
        let spec = spec(&["email"]).with_key("id").unwrap();
        let row = Row::new().with_value("email", "a**@*.com").with_value("id", "7");
        let statement = render_update(&spec, &row, "id");

        assert_eq!(
            statement.as_str(),
            "UPDATE customer SET email='a**@*.com' WHERE id='7';"
        );
    }

    #[test]
    fn test_update_with_null_key_uses_is_null() {
        let spec = spec(&["email"]).with_key("id").unwrap();
        let row = Row::new().with_value("email", "a**@*.com").with_null("id");
        let statement = render_update(&spec, &row, "id");

        assert_eq!(
            statement.as_str(),
            "UPDATE customer SET email='a**@*.com' WHERE id IS NULL;"
        );
    }

    #[test]
    fn test_escape_order() {
        assert_eq!(escape(r"\'"), r"\\\'");
        assert_eq!(escape("plain"), "plain");
    }
}
