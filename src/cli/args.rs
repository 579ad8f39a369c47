//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CONFIG_FILE, Overrides};

/// Combine, minify and content-hash CSS/JS bundles
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cachebust.toml)
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default cachebust.toml and source skeleton
    #[command(visible_alias = "i")]
    Init {
        /// Project directory (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Build all bundles and write the manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the emitted path for a logical asset key
    #[command(visible_alias = "l")]
    Lookup {
        /// Logical asset key, e.g. `css/main.css`
        key: String,

        /// Manifest file (default: from config)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        manifest: Option<PathBuf>,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Source directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Minify bundles
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            output: self.output.clone(),
            minify: self.minify,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cachebust").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_build_flags() {
        let cli = parse(&["build", "--minify", "false", "-o", "public/assets", "-V"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.minify, Some(false));
        assert!(build_args.verbose);

        let overrides = build_args.overrides();
        assert_eq!(overrides.output, Some(PathBuf::from("public/assets")));
        assert_eq!(overrides.source, None);
    }

    #[test]
    fn test_bare_minify_flag_means_true() {
        let cli = parse(&["b", "-m"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.minify, Some(true));
    }

    #[test]
    fn test_global_config_and_lookup() {
        let cli = parse(&["lookup", "css/main.css", "-C", "site/cachebust.toml"]);
        assert_eq!(cli.config, PathBuf::from("site/cachebust.toml"));
        assert!(matches!(
            cli.command,
            Commands::Lookup { ref key, manifest: None } if key == "css/main.css"
        ));
    }

    #[test]
    fn test_default_config_name() {
        let cli = parse(&["init"]);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
        assert!(matches!(cli.command, Commands::Init { name: None, dry: false }));
    }
}
