use clap::Parser;
use lintpatch::cli::toml_config;
use lintpatch::cli::{Cli, Commands};
use lintpatch::diagnostics::eslint::EslintSource;
use lintpatch::run::{self, RunError};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command) {
        eprintln!("\x1b[31merror\x1b[0m: {}", e);
        process::exit(2);
    }
}

fn dispatch(command: Commands) -> Result<(), RunError> {
    let mut stdout = io::stdout();

    match command {
        Commands::Lint { config, source_dir } => {
            let mut fix_config = toml_config::load(&config)?;
            if let Some(dir) = source_dir {
                fix_config.source_dir = dir;
            }

            let source = EslintSource::new(&fix_config);
            run::run_lint_fix(&fix_config, &source, &mut stdout)?;
        }

        Commands::Params => {
            let stdin = io::stdin();
            run::run_param_fix(stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}
