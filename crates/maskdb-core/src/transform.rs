//! Row transformation.
//!
//! The transformer is the seam between the masking engine and statement
//! rendering: it masks the designated columns of one row and renders the
//! overwrite statement for it. One row in, one row and one statement out;
//! no cross-row state.

use crate::policy::MaskPolicy;
use crate::row::Row;
use crate::spec::TableSpec;
use crate::statement::{self, Statement};

/// Applies a [`MaskPolicy`] to rows and renders their overwrite statements.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    policy: MaskPolicy,
}

impl Transformer {
    /// Create a transformer for the given policy.
    pub fn new(policy: MaskPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> MaskPolicy {
        self.policy
    }

    /// Mask the designated columns of `row` and render its statement.
    ///
    /// Designated columns absent from the row are skipped, as are NULL
    /// values. Columns outside the designated set pass through untouched.
    /// This cannot fail: the spec was validated on construction and masking
    /// is total.
    pub fn transform(&self, spec: &TableSpec, mut row: Row) -> (Row, Statement) {
        let mut masked = 0usize;
        for column in spec.columns() {
            let replacement = row.value(column).map(|value| self.policy.mask(value));
            if let Some(replacement) = replacement {
                row.set(column, Some(replacement));
                masked += 1;
            }
        }
        tracing::trace!(table = spec.table(), masked, "row masked");

        let statement = match spec.key() {
            Some(key) => statement::render_update(spec, &row, key),
            None => statement::render_replace(spec, &row),
        };

        (row, statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(columns: &[&str]) -> TableSpec {
        TableSpec::new("users", columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_masks_only_designated_columns() {
        let transformer = Transformer::new(MaskPolicy::LengthTiered);
        let row = Row::new()
            .with_value("email", "alice@example.com")
            .with_value("id", "7");

        let (masked, statement) = transformer.transform(&spec(&["email"]), row);

        assert_eq!(masked.value("email"), Some("ali**@*******.com"));
        assert_eq!(masked.value("id"), Some("7"));
        assert_eq!(
            statement.as_str(),
            "REPLACE INTO users (email) VALUES ('ali**@*******.com');"
        );
    }

    #[test]
    fn test_absent_designated_column_is_skipped() {
        let transformer = Transformer::new(MaskPolicy::LengthTiered);
        let row = Row::new().with_value("name", "somebody");

        let (masked, statement) = transformer.transform(&spec(&["email", "name"]), row);

        assert!(!masked.contains("email"));
        assert_eq!(masked.value("name"), Some("som**ody"));
        assert_eq!(
            statement.as_str(),
            "REPLACE INTO users (email,name) VALUES (NULL,'som**ody');"
        );
    }

    #[test]
    fn test_null_values_stay_null() {
        let transformer = Transformer::new(MaskPolicy::LengthTiered);
        let row = Row::new().with_null("email");

        let (masked, statement) = transformer.transform(&spec(&["email"]), row);

        assert!(masked.contains("email"));
        assert_eq!(masked.value("email"), None);
        assert_eq!(statement.as_str(), "REPLACE INTO users (email) VALUES (NULL);");
    }

    #[test]
    fn test_key_column_is_never_masked() {
        let transformer = Transformer::new(MaskPolicy::LengthTiered);
        let spec = spec(&["email"]).with_key("id").unwrap();
        let row = Row::new()
            .with_value("email", "john@x.io")
            .with_value("id", "customer-42");

        let (masked, statement) = transformer.transform(&spec, row);

        assert_eq!(masked.value("id"), Some("customer-42"));
        assert_eq!(
            statement.as_str(),
            "UPDATE users SET email='joh*@*.io' WHERE id='customer-42';"
        );
    }

    #[test]
    fn test_fixed_affix_policy_flows_through() {
        let transformer = Transformer::new(MaskPolicy::FixedAffix);
        let row = Row::new().with_value("email", "john@x.io");

        let (masked, _) = transformer.transform(&spec(&["email"]), row);
        assert_eq!(masked.value("email"), Some("johxxx.io"));
    }
}
