//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Genealogy trees from line-oriented text: generic node names, MRCA queries
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging. Multiple `-d` options increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version information
    #[arg(long)]
    pub info: bool,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the indented tree dump
    Show {
        /// Tree file (bare names are resolved against the data directory)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Render only the subtree below this node
        #[arg(short, long)]
        under: Option<String>,

        /// Use a box-drawing rendering instead of plain indentation
        #[arg(short, long)]
        fancy: bool,
    },

    /// Most recent common ancestor of two nodes
    Mrca {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// First node name
        name1: String,

        /// Second node name
        name2: String,
    },

    /// List leaf nodes, one per line
    Leaves {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show node count, depth and root
    Stats {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print a template config file
    Template,
    /// Print the global config file path
    Path,
}
