pub mod format;
pub mod toml_config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lintpatch",
    about = "Auto-remediate unused declarations, unused parameters and require() imports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run ESLint, remove unused declarations, convert require() imports, then re-check
    Lint {
        /// Path to lintpatch.toml config file (optional)
        #[arg(short, long, default_value = "lintpatch.toml")]
        config: PathBuf,

        /// Source directory to lint, overriding the config file
        #[arg(short, long)]
        source_dir: Option<String>,
    },

    /// Read `tsc` output from stdin and prefix unused parameters with an underscore
    Params,
}
