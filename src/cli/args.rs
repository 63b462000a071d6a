//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the process command
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of clips to generate (1-10, default from config)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=10))]
    pub clips: Option<u64>,

    /// Do not burn subtitles into the clips
    #[arg(long)]
    pub no_subtitles: bool,

    /// Directory that receives the per-job output directory
    #[arg(long, env = "CLIPFORGE_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Zip the output directory once the job completes
    #[arg(long)]
    pub bundle: bool,

    /// Emit progress and results as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the bundle command
#[derive(Args, Debug)]
pub struct BundleArgs {
    /// Output directory produced by a previous run
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
