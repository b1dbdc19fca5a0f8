use std::path::Path;

use crate::app::{pipeline, AppContext, Result, RunOutcome};
use crate::config::Config;

pub async fn run(ctx: &AppContext) -> Result<()> {
    match pipeline::run(ctx).await? {
        RunOutcome::NoCandidates => {
            println!("No URLs found. Exiting.");
        }
        RunOutcome::NoRecords { attempted } => {
            println!(
                "No results extracted from {} pages. Check that the pages are reachable.",
                attempted
            );
        }
        RunOutcome::Written { path, rows, failed } => {
            println!(
                "Done! Saved {} items to {} ({} pages dropped)",
                rows,
                path.display(),
                failed
            );
        }
    }

    Ok(())
}

pub async fn harvest(ctx: &AppContext) -> Result<()> {
    let candidates = ctx.harvester.harvest().await?;

    if candidates.is_empty() {
        println!("No URLs found");
        return Ok(());
    }

    for candidate in &candidates {
        println!("{}", candidate);
    }
    eprintln!("{} candidates", candidates.len());

    Ok(())
}

pub fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    Config::write_default(&path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
