//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "honyaku",
    version,
    about = "Translate text files with LLM providers, falling back across models on quota and content errors"
)]
pub struct Args {
    /// Files to translate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Source language code (e.g. ja, ko); overrides auto-detection
    /// together with --target
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target language code; overrides auto-detection together with
    /// --source
    #[arg(short, long)]
    pub target: Option<String>,
}

impl Args {
    /// Fixed direction requested on the command line, if both ends were
    /// given
    pub fn fixed_direction(&self) -> Option<(&str, &str)> {
        match (self.source.as_deref(), self.target.as_deref()) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }
}
