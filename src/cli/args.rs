//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Assemble hierarchical LaTeX documents from TOML manifests
#[derive(Parser, Debug)]
#[command(name = "texdocs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding the local .texdocs.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a manifest to LaTeX source
    Build {
        /// Document manifest
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
        /// Output .tex file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Render and compile a manifest to PDF
    Compile {
        /// Document manifest
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
        /// Output file stem (default: manifest file stem)
        #[arg(short, long)]
        output: Option<String>,
        /// LaTeX compiler (overrides config)
        #[arg(long, env = "TEXDOCS_COMPILER")]
        compiler: Option<String>,
        /// Keep .aux, .log and other intermediate files
        #[arg(long)]
        keep_intermediate: bool,
        /// Remove the generated .tex source after compiling
        #[arg(long)]
        clean_tex: bool,
    },

    /// Show the section tree of a manifest
    Outline {
        /// Document manifest
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
