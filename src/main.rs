//! cachebust command-line entry point.

use anyhow::Result;
use cachebust::cli::{self, Cli, Commands};
use clap::{ColorChoice, Parser};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Init { name, dry } => {
            let cwd = std::env::current_dir()?;
            let root = name.as_ref().map_or_else(|| cwd.clone(), |name| cwd.join(name));
            cli::init::init_project(&root, &cli.config, *dry)
        }
        Commands::Build { build_args } => cli::build::run_build(&cli.config, build_args).map(|_| ()),
        Commands::Lookup { key, manifest } => {
            cli::lookup::run_lookup(&cli.config, key, manifest.as_deref())
        }
    }
}
