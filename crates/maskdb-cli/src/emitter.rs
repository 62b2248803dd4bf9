//! Output emission for masked rows.
//!
//! Statements go to a stream (stdout or a file) or straight to the target
//! database. The JSON format emits the whole masked row, one object per
//! line, for piping into other tooling; it cannot be replayed with
//! `--execute`.

use clap::ValueEnum;
use maskdb_core::{Row, Statement};
use maskdb_source::Database;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for masked rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Overwrite statements, one per line
    Sql,
    /// Masked rows as JSON objects, one per line
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Sql => write!(f, "sql"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Emission errors.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Output stream could not be written.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// Statement execution against the target failed.
    #[error(transparent)]
    Database(#[from] maskdb_source::Error),
}

/// Where each masked row ends up.
pub enum Emitter {
    /// Render to a stream.
    Writer {
        format: OutputFormat,
        out: Box<dyn Write + Send>,
    },
    /// Execute each statement against the target connection.
    Execute(Database),
}

impl Emitter {
    /// Emit to stdout.
    pub fn stdout(format: OutputFormat) -> Self {
        Emitter::Writer {
            format,
            out: Box::new(std::io::stdout()),
        }
    }

    /// Emit to a file, truncating it.
    pub fn file(format: OutputFormat, path: impl AsRef<Path>) -> Result<Self, EmitError> {
        let file = File::create(path)?;
        Ok(Emitter::Writer {
            format,
            out: Box::new(BufWriter::new(file)),
        })
    }

    /// Replay statements against the target database.
    pub fn execute(target: Database) -> Self {
        Emitter::Execute(target)
    }

    /// Emit one transformed row.
    pub async fn emit(
        &mut self,
        table: &str,
        row: &Row,
        statement: &Statement,
    ) -> Result<(), EmitError> {
        match self {
            Emitter::Writer { format, out } => {
                writeln!(out, "{}", render_line(*format, table, row, statement))?;
            }
            Emitter::Execute(target) => {
                let affected = target.execute(statement.as_str()).await?;
                tracing::debug!(table, affected, "statement executed");
            }
        }
        Ok(())
    }

    /// Flush any buffered output.
    pub fn flush(&mut self) -> Result<(), EmitError> {
        if let Emitter::Writer { out, .. } = self {
            out.flush()?;
        }
        Ok(())
    }
}

/// Render one output line for a stream emitter.
fn render_line(format: OutputFormat, table: &str, row: &Row, statement: &Statement) -> String {
    match format {
        OutputFormat::Sql => statement.as_str().to_string(),
        OutputFormat::Json => {
            let mut columns = serde_json::Map::new();
            for (name, value) in row.iter() {
                let value = match value {
                    Some(text) => serde_json::Value::String(text.to_string()),
                    None => serde_json::Value::Null,
                };
                columns.insert(name.to_string(), value);
            }

            let mut object = serde_json::Map::new();
            object.insert("table".into(), serde_json::Value::String(table.into()));
            object.insert("columns".into(), serde_json::Value::Object(columns));
            serde_json::Value::Object(object).to_string()
        }
    }
}
