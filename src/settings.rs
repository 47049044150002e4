use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use miette::{Context, IntoDiagnostic};
use serde::Deserialize;

use crate::result::{bail, Result};

/// Runtime configuration, resolved once at startup and passed explicitly to
/// the orchestrator.
///
/// Values are layered: built-in defaults, then an optional TOML file, then
/// `CLIPMILL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory the browser saves downloads into
    pub download_dir: std::path::PathBuf,
    /// Staging root for freshly cut segments, one subfolder per video
    pub temp_trim_dir: std::path::PathBuf,
    /// Final root the organized per-video folders live under
    pub final_trim_dir: std::path::PathBuf,

    /// How long to wait for a triggered download to complete
    pub download_timeout_secs: u64,
    /// Delay between two listings of the download directory
    pub poll_interval_secs: u64,
    /// Pause after a confirmed download before the next URL
    pub settle_delay_secs: u64,

    /// CSS selector matching the candidate download controls of the page
    pub control_selector: String,
    /// Pattern the visible text of the wanted control must match
    pub control_pattern: String,
    /// How long to wait for the candidate controls to appear
    pub control_wait_secs: u64,

    /// Number of segments to cut out of each video
    pub clips_per_video: usize,
    /// Shortest allowed segment, in seconds
    pub min_clip_secs: u64,
    /// Longest allowed segment, in seconds
    pub max_clip_secs: u64,
    /// Portion of a video eligible for segmentation, in seconds
    pub max_span_secs: u64,
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let settings: Settings = Self::build(file)
            .and_then(Config::try_deserialize)
            .into_diagnostic()
            .wrap_err("Could not load configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    fn build(file: Option<&Path>) -> std::result::Result<Config, ConfigError> {
        let mut builder = Config::builder()
            .set_default("download_dir", "downloads")?
            .set_default("temp_trim_dir", "temp_trim")?
            .set_default("final_trim_dir", "trimmed_videos")?
            .set_default("download_timeout_secs", 60)?
            .set_default("poll_interval_secs", 2)?
            .set_default("settle_delay_secs", 1)?
            .set_default("control_selector", ".item_open.font-semibold.text-sm.text-white")?
            .set_default("control_pattern", r"720\.mp4")?
            .set_default("control_wait_secs", 10)?
            .set_default("clips_per_video", 4)?
            .set_default("min_clip_secs", 3 * 60)?
            .set_default("max_clip_secs", 5 * 60)?
            .set_default("max_span_secs", 24 * 60)?;

        if let Some(file) = file {
            builder = builder.add_source(File::from(file.to_path_buf()));
        }

        // try_parsing so numeric keys can be overridden from the environment
        builder
            .add_source(Environment::with_prefix("CLIPMILL").try_parsing(true))
            .build()
    }

    fn validate(&self) -> Result<()> {
        if self.clips_per_video == 0 {
            return bail("clips_per_video must be at least 1");
        }
        if self.min_clip_secs == 0 || self.min_clip_secs > self.max_clip_secs {
            return bail("clip length range is empty");
        }
        if self.max_span_secs == 0 {
            return bail("max_span_secs must be positive");
        }
        if self.poll_interval_secs == 0 {
            return bail("poll_interval_secs must be positive");
        }
        Ok(())
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn control_wait(&self) -> Duration {
        Duration::from_secs(self.control_wait_secs)
    }
}
