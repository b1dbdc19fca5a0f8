use std::path::PathBuf;

use crate::app::{AppContext, Result};

/// How a run ended. Only export failures are errors.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The sitemap failed to load or yielded no candidates
    NoCandidates,
    /// Every candidate was dropped
    NoRecords { attempted: usize },
    Written {
        path: PathBuf,
        rows: usize,
        failed: usize,
    },
}

/// Harvest, scrape, export.
pub async fn run(ctx: &AppContext) -> Result<RunOutcome> {
    let candidates = match ctx.harvester.harvest().await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Error fetching sitemap: {}", e);
            return Ok(RunOutcome::NoCandidates);
        }
    };

    if candidates.is_empty() {
        return Ok(RunOutcome::NoCandidates);
    }

    let attempted = candidates.len();
    tracing::info!("Starting extraction for {} items", attempted);

    let outcome = ctx.pool.run_all(candidates).await;
    if outcome.records.is_empty() {
        return Ok(RunOutcome::NoRecords { attempted });
    }

    let path = ctx.config.report.output_path.clone();
    tracing::info!("Exporting {} items to {}", outcome.records.len(), path.display());
    let rows = ctx.report.write(&outcome.records, &path)?;

    Ok(RunOutcome::Written {
        path,
        rows,
        failed: outcome.failed,
    })
}
