//! Development tasks: man page and shell completion generation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::{Shell, generate_to};

const BIN_NAME: &str = "strcalc";

#[derive(Parser)]
#[command(name = "xtask", about = "strcalc development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render the man page
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { out_dir } => completions(&out_dir),
    }
}

fn create_out_dir(out_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    create_out_dir(out_dir)?;
    let mut buffer = Vec::new();
    clap_mangen::Man::new(strcalc::command())
        .render(&mut buffer)
        .context("failed to render man page")?;
    let path = out_dir.join(format!("{BIN_NAME}.1"));
    std::fs::write(&path, buffer)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn completions(out_dir: &Path) -> anyhow::Result<()> {
    create_out_dir(out_dir)?;
    let mut cmd = strcalc::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = generate_to(shell, &mut cmd, BIN_NAME, out_dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
