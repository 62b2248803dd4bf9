//! Per-table orchestration.
//!
//! One table at a time, one row at a time: fetch the bounded sample,
//! transform each row, hand it to the emitter. A fatal error aborts the
//! remaining run; statements already emitted stay valid on their own.

use maskdb_core::{TableSpec, Transformer};
use maskdb_source::RowSource;

use crate::emitter::{EmitError, Emitter};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Tables processed.
    pub tables: usize,
    /// Rows read from the source.
    pub rows: usize,
    /// Statements (or JSON lines) emitted.
    pub statements: usize,
}

/// Pipeline failure, either side of the emitter seam.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Row fetching failed.
    #[error(transparent)]
    Source(#[from] maskdb_source::Error),

    /// Emission failed.
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Run the fetch → transform → emit loop over every table spec.
pub async fn run<S: RowSource>(
    source: &S,
    transformer: &Transformer,
    specs: &[TableSpec],
    limit: u32,
    emitter: &mut Emitter,
) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary::default();

    for spec in specs {
        tracing::info!(table = spec.table(), limit, "processing table");
        if spec.key().is_none() {
            // REPLACE writes only the masked columns; on tables with other
            // NOT NULL columns the replayed statement can be rejected.
            tracing::warn!(
                table = spec.table(),
                "no key column configured; REPLACE statements cover only the masked columns"
            );
        }

        let rows = source.fetch_rows(spec, limit).await?;
        summary.tables += 1;

        for row in rows {
            let (masked, statement) = transformer.transform(spec, row);
            emitter.emit(spec.table(), &masked, &statement).await?;
            summary.rows += 1;
            summary.statements += 1;
        }
    }

    emitter.flush()?;
    Ok(summary)
}
