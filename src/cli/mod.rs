pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "sitemill")]
#[command(about = "Harvest product pages from a sitemap into a spreadsheet", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/sitemill/config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers for scraping pages
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Spreadsheet to write
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Maximum number of pages to scrape
    #[arg(long, global = true)]
    pub max_urls: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest, scrape and export (default)
    Run,
    /// Print the candidate URLs without scraping them
    Harvest,
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.pool.workers = workers;
        }
        if let Some(ref output) = self.output {
            config.report.output_path = output.clone();
        }
        if let Some(max_urls) = self.max_urls {
            config.harvest.max_urls = max_urls;
        }
    }
}
