use std::path::PathBuf;

use clap::Parser;

macro_rules! arg_env {
    ($v:literal) => {
        concat!("CLIPMILL_", $v)
    };
}

/// Harvest videos from a file-hosting page with a driven browser,
/// then mill each one into random-length clips filed per video.
#[derive(Parser, Debug)]
pub struct Args {
    /// The page URLs to download videos from
    #[clap(required_unless_present = "skip_download")]
    pub urls: Vec<String>,

    /// The path to an optional TOML configuration file.
    ///
    /// Every key can also be set through a `CLIPMILL_`-prefixed
    /// environment variable, which wins over the file.
    #[clap(long, env = arg_env!("CONFIG"))]
    pub config: Option<PathBuf>,

    /// Skip the browser phase and only trim the videos already present
    /// in the download directory
    #[clap(long, env = arg_env!("SKIP_DOWNLOAD"))]
    pub skip_download: bool,

    /// Log debug details in addition to the regular progress lines
    #[clap(short, long)]
    pub verbose: bool,
}
