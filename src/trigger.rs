use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::info;

use crate::{io::snapshot_dir, outside::PageDriver, result::Result, watcher::DownloadWatcher};

/// Activates the wanted download control in the rendered page and confirms
/// the resulting download.
pub struct DownloadTrigger<'a> {
    driver: &'a dyn PageDriver,
    watcher: DownloadWatcher,
    selector: &'a str,
    pattern: &'a Regex,
}

impl<'a> DownloadTrigger<'a> {
    pub fn new(
        driver: &'a dyn PageDriver,
        watcher: DownloadWatcher,
        selector: &'a str,
        pattern: &'a Regex,
    ) -> Self {
        Self {
            driver,
            watcher,
            selector,
            pattern,
        }
    }

    /// Trigger the download on the current page and wait for the file to
    /// fully arrive in `download_dir`, returning its path.
    ///
    /// The directory is snapshot immediately before activating the control,
    /// so only the file this activation produces can qualify.
    pub fn download(&self, download_dir: &Path) -> Result<PathBuf> {
        let baseline = snapshot_dir(download_dir)?;

        self.driver.activate_control(self.selector, self.pattern)?;
        info!("Download triggered, watching '{}'", download_dir.display());

        self.watcher.wait_for_completion(download_dir, &baseline)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

    use tempfile::TempDir;

    use crate::result::Error;

    use super::*;

    /// A page with a fixed set of control labels. Activating a matching
    /// control drops the associated file into the download directory.
    struct FakePage {
        controls: Vec<(String, PathBuf)>,
        activated: Mutex<Vec<String>>,
    }

    impl PageDriver for FakePage {
        fn navigate(&self, _url: &str) -> Result<()> {
            Ok(())
        }

        fn activate_control(&self, _selector: &str, pattern: &Regex) -> Result<()> {
            for (label, file) in &self.controls {
                if pattern.is_match(label) {
                    File::create(file).unwrap();
                    self.activated.lock().unwrap().push(label.clone());
                    return Ok(());
                }
            }
            Err(Error::ControlNotFound {
                pattern: pattern.to_string(),
            })
        }
    }

    fn watcher() -> DownloadWatcher {
        DownloadWatcher::new(Duration::from_millis(10), Duration::from_millis(200))
    }

    #[test]
    fn activates_the_matching_control_and_returns_the_download() {
        let dir = TempDir::new().unwrap();
        let page = FakePage {
            controls: vec![
                ("video_1080.mp4".into(), dir.path().join("video_1080.mp4")),
                ("video_720.mp4".into(), dir.path().join("video_720.mp4")),
            ],
            activated: Mutex::new(vec![]),
        };
        let pattern = Regex::new(r"720\.mp4").unwrap();
        let trigger = DownloadTrigger::new(&page, watcher(), ".controls", &pattern);

        let downloaded = trigger.download(dir.path()).unwrap();
        assert_eq!(downloaded, dir.path().join("video_720.mp4"));
        assert_eq!(*page.activated.lock().unwrap(), vec!["video_720.mp4"]);
    }

    #[test]
    fn missing_control_is_reported_without_watching() {
        let dir = TempDir::new().unwrap();
        let page = FakePage {
            controls: vec![("video_480.mp4".into(), dir.path().join("video_480.mp4"))],
            activated: Mutex::new(vec![]),
        };
        let pattern = Regex::new(r"720\.mp4").unwrap();
        let trigger = DownloadTrigger::new(&page, watcher(), ".controls", &pattern);

        let err = trigger.download(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ControlNotFound { .. }));
        assert!(page.activated.lock().unwrap().is_empty());
    }
}
