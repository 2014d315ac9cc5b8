//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Text-grid block diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a configuration file (JSON). Defaults to the user config
    /// directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print a diagram file
    Show {
        input: PathBuf,
        /// Style the output for an ANSI terminal
        #[arg(long)]
        ansi: bool,
    },
    /// Re-encode a diagram; each file's extension picks its format
    Convert { input: PathBuf, output: PathBuf },
    /// Feed a gesture script through a canvas
    Replay {
        script: PathBuf,
        /// Diagram to start from instead of a blank canvas
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Save the result here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Style the printed output for an ANSI terminal
        #[arg(long)]
        ansi: bool,
    },
    /// List the available line styles
    Styles,
}
