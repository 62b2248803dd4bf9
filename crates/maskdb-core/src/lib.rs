//! Maskdb Core - masking engine, row model, and statement rendering.
//!
//! This crate holds the pure part of the pipeline: given a table
//! specification and a row of text values, mask the designated columns and
//! render the SQL statement that overwrites the original data. There is no
//! I/O here; connectivity and configuration live in `maskdb-source`.

pub mod error;
pub mod policy;
pub mod row;
pub mod spec;
pub mod statement;
pub mod transform;

pub use error::Error;
pub use policy::MaskPolicy;
pub use row::Row;
pub use spec::TableSpec;
pub use statement::Statement;
pub use transform::Transformer;
