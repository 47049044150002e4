use std::{path::Path, sync::Arc, time::Duration};

use headless_chrome::{protocol::cdp::Page, Browser, LaunchOptions, Tab};
use regex::Regex;
use tracing::{debug, info};

use crate::result::{err_msg, Error, Result};

/// Interface for driving a rendered page: the orchestrator only ever
/// navigates and activates a download control matched by its visible text.
pub trait PageDriver {
    /// Navigate the session to the given URL and wait for the page to settle.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Wait for the candidate controls selected by `selector` to be present,
    /// then activate the first one whose visible text matches `pattern`.
    ///
    /// Fails with [`Error::ControlNotFound`] when no control matches within
    /// the bounded wait. No retry is attempted.
    fn activate_control(&self, selector: &str, pattern: &Regex) -> Result<()>;
}

/// A Chrome session driven over the DevTools protocol.
///
/// The session is configured to save downloads into the wanted directory
/// without prompting. Dropping the handle closes the browser.
pub struct Chrome {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl Chrome {
    /// Launch the browser and point its downloads at `download_dir`.
    ///
    /// `control_wait` bounds how long [`PageDriver::activate_control`] will
    /// wait for candidate controls to appear.
    pub fn launch(download_dir: &Path, control_wait: Duration) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .window_size(Some((1280, 910)))
            .build()
            .map_err(|err| err_msg(format!("Could not build browser launch options: {err}")))?;

        let browser = Browser::new(options)
            .map_err(|err| err_msg(format!("Could not launch the browser: {err}")))?;
        let tab = browser
            .new_tab()
            .map_err(|err| err_msg(format!("Could not open a browser tab: {err}")))?;

        tab.set_default_timeout(control_wait);
        tab.call_method(Page::SetDownloadBehavior {
            behavior: Page::SetDownloadBehaviorBehaviorOption::Allow,
            download_path: Some(download_dir.display().to_string()),
        })
        .map_err(|err| err_msg(format!("Could not set the browser download directory: {err}")))?;

        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl PageDriver for Chrome {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| err_msg(format!("Could not navigate to '{url}': {err}")))?;

        Ok(())
    }

    fn activate_control(&self, selector: &str, pattern: &Regex) -> Result<()> {
        let not_found = || Error::ControlNotFound {
            pattern: pattern.to_string(),
        };

        let controls = self.tab.wait_for_elements(selector).map_err(|err| {
            debug!("No candidate control appeared: {err}");
            not_found()
        })?;
        debug!("{} candidate controls in the page", controls.len());

        for control in controls {
            // A control whose text cannot be read is skipped, not fatal
            let Ok(text) = control.get_inner_text() else {
                continue;
            };

            if pattern.is_match(text.trim()) {
                info!("Found the download control labeled '{}'", text.trim());
                control
                    .click()
                    .map_err(|err| err_msg(format!("Could not activate the control: {err}")))?;
                return Ok(());
            }
        }

        Err(not_found())
    }
}
