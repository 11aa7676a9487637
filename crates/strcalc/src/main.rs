//! strcalc CLI
#![deny(unsafe_code)]

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use strcalc::{Cli, Commands, commands};
use strcalc_core::config::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // arg_required_else_help guarantees a subcommand from here on
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }
    let (config, sources) =
        load_config(cli.config.clone()).context("failed to load configuration")?;

    let log_dir = config.log_dir.clone().map(Utf8PathBuf::into_std_path_buf);
    let _guard = observability::init_observability(
        &observability::ObservabilityConfig::from_env_with_overrides(log_dir),
        observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str()),
    )
    .context("failed to initialize logging/tracing")?;
    debug!(json = cli.json, sources = sources.files.len(), "CLI initialized");

    let result = match command {
        Commands::Add(args) => commands::add::cmd_add(args, cli.json, config.input_limit()),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &sources),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Discover config from the working directory, plus `--config` if given.
fn load_config(explicit: Option<std::path::PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8_path(cwd, "current directory")?;

    let mut loader = ConfigLoader::new().search_from(&cwd);
    if let Some(path) = explicit {
        let path = utf8_path(path, "config path")?;
        anyhow::ensure!(path.is_file(), "config file not found: {path}");
        loader = loader.explicit(path);
    }
    Ok(loader.load()?)
}

fn utf8_path(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}
