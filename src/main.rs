mod actors;
mod batch;
mod cli;
mod downloader;
mod io;
mod logging;
mod organizer;
mod outside;
mod planner;
mod result;
mod settings;
mod trigger;
mod types;
mod watcher;

use clap::Parser;
use tracing::{debug, info, Level};

use crate::{
    cli::Args,
    io::ensure_dir,
    logging::init_logging,
    outside::{Chrome, Ffmpeg},
    settings::Settings,
};

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_logging(level)?;

    let settings = Settings::load(args.config.as_deref())?;
    debug!("Resolved configuration: {settings:?}");

    ensure_dir(&settings.download_dir)?;

    // Probing the ffmpeg binaries takes a moment, overlap it with the
    // browser phase instead of paying for it up front
    let ffmpeg_thread = std::thread::spawn(Ffmpeg::new);

    if !args.skip_download {
        let chrome = Chrome::launch(&settings.download_dir, settings.control_wait())?;
        let confirmed = downloader::run_downloads(&chrome, &args.urls, &settings)?;
        info!(
            "Closing the browser session after {confirmed}/{} confirmed download(s)",
            args.urls.len()
        );
        // Dropping the handle closes the session, failed URLs included
        drop(chrome);
    }

    let ffmpeg = ffmpeg_thread.join().expect("Could not join thread")?;

    info!("Starting video trimming process");
    let outcomes = batch::process_all_videos(&ffmpeg, &settings)?;

    let segments: usize = outcomes.iter().map(|outcome| outcome.segments_filed).sum();
    info!(
        "All tasks completed: {} video(s) trimmed, {segments} segment(s) filed under '{}'",
        outcomes.len(),
        settings.final_trim_dir.display()
    );

    Ok(())
}
