use std::thread;

use regex::Regex;
use tracing::{error, info};

use crate::{
    outside::PageDriver,
    result::{err_msg, Result},
    settings::Settings,
    trigger::DownloadTrigger,
    watcher::DownloadWatcher,
};

/// Walk the URLs one by one in a single browser session: navigate, trigger
/// the download, wait for the file to fully arrive, settle, move on.
///
/// A URL whose download control cannot be found or whose download never
/// completes is logged and skipped; the remaining URLs are still visited.
/// Returns the number of confirmed downloads.
pub fn run_downloads(
    driver: &dyn PageDriver,
    urls: &[String],
    settings: &Settings,
) -> Result<usize> {
    let pattern = Regex::new(&settings.control_pattern)
        .map_err(|err| err_msg(format!("Invalid control pattern: {err}")))?;
    let watcher = DownloadWatcher::new(settings.poll_interval(), settings.download_timeout());
    let trigger = DownloadTrigger::new(driver, watcher, &settings.control_selector, &pattern);

    let mut confirmed = 0;
    for url in urls {
        info!("Navigating to URL: {url}");
        if let Err(err) = driver.navigate(url) {
            error!("Skipping '{url}': {err}");
            continue;
        }

        match trigger.download(&settings.download_dir) {
            Ok(path) => {
                info!("Downloaded file detected: {}", path.display());
                confirmed += 1;
            }
            Err(err) => error!("Skipping '{url}': {err}"),
        }

        thread::sleep(settings.settle_delay());
    }

    Ok(confirmed)
}
