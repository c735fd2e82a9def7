use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::DEFAULT_SCRIPT;

/// Parallel media conversion dispatcher.
#[derive(Clone, Parser)]
#[command(name = "convoy")]
#[command(about = "Convert every supported media file in a directory through an external script.")]
pub struct Cli {
    /// Directory containing the media files to convert. Only the top level
    /// is scanned.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Conversion program, run once per file with the file path as its only
    /// argument. Default: `lib/convert.sh` under the working directory.
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Worker thread count. Default: available CPUs, capped at 8.
    #[arg(long, short)]
    pub workers: Option<usize>,

    /// Verbose output.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Conversion program path, defaulting to the documented location
    /// relative to the process working directory.
    pub fn script_path(&self) -> PathBuf {
        self.script
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT))
    }
}
