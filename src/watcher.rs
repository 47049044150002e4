use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::{
    io::snapshot_dir,
    result::{Error, Result},
};

/// Filename suffixes the browser gives to files still being written.
/// Such files are never reported as completed downloads.
const PARTIAL_SUFFIXES: [&str; 2] = [".crdownload", ".tmp"];

/// Polls a download directory until a new, fully written file shows up.
#[derive(Debug, Clone, Copy)]
pub struct DownloadWatcher {
    poll_interval: Duration,
    timeout: Duration,
}

impl DownloadWatcher {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Wait until a file that was not part of `baseline` has fully arrived
    /// in `dir`, and return its path.
    ///
    /// The directory is re-listed every poll interval and diffed against the
    /// baseline snapshot taken before the download was triggered. Among
    /// several simultaneous arrivals the lexicographically first one wins,
    /// an arbitrary but stable choice.
    ///
    /// Fails with [`Error::DownloadTimeout`] when nothing qualifies in time.
    pub fn wait_for_completion(&self, dir: &Path, baseline: &BTreeSet<String>) -> Result<PathBuf> {
        info!("Waiting for a download to complete in '{}'", dir.display());
        let deadline = Instant::now() + self.timeout;

        loop {
            let files = snapshot_dir(dir)?;
            let completed = files
                .difference(baseline)
                .find(|name| !Self::is_partial(name));

            if let Some(name) = completed {
                info!("File '{name}' downloaded successfully");
                return Ok(dir.join(name));
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(Error::DownloadTimeout {
                    dir: dir.to_path_buf(),
                    timeout: self.timeout,
                });
            }

            debug!("No completed download yet, polling again");
            thread::sleep(self.poll_interval.min(deadline - now));
        }
    }

    fn is_partial(name: &str) -> bool {
        PARTIAL_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
    }
}
