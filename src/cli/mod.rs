//! Command line interface
//!
//! - `serve`: run the HTTP API
//! - `generate`: run the pipeline once and print the result
//! - `templates`: list known template ids
//! - `cache purge`: drop expired cache entries

pub mod cache;
pub mod generate;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Lorekeeper - AI descriptions for tabletop role-playing sessions
#[derive(Debug, Parser)]
#[command(name = "lorekeeper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Generate one description and print it as JSON
    Generate(generate::GenerateArgs),

    /// List available template ids
    Templates,

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        command: cache::CacheCommand,
    },
}

/// Prints the template ids known to the configured catalog
pub fn list_templates(config: &AppConfig) {
    for id in config.prompt_catalog().template_ids() {
        println!("{}", id);
    }
}
