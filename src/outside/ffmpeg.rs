use std::{ffi::OsStr, fmt::Debug, fs, path::Path};

use miette::{Context, IntoDiagnostic};

use crate::{
    result::{Error, Result},
    types::TrimWindow,
};

use super::command::{
    assert_success_command, run_command, Capture, FFMPEG, FFPROBE, FFXXX_DEFAULT_ARGS,
};

/// Interface for probing a video file and extracting sub-ranges of it.
pub trait ClipExtractor: Sync + Debug {
    /// Probe the total stream duration, in seconds.
    ///
    /// Fails with [`Error::ProbeFailure`] if the file cannot be read as a
    /// video or reports a non-positive duration.
    fn probe_duration(&self, input: &Path) -> Result<f64>;

    /// Extract the data inside `window` from `input` into a new file at
    /// `output`. The source file is never modified.
    ///
    /// Fails with [`Error::TrimFailure`] on an empty window or when no valid
    /// output file was produced. No partial output file is left behind on
    /// failure.
    fn extract_clip(&self, input: &Path, output: &Path, window: &TrimWindow) -> Result<()>;
}

/// Interface for the [ffmpeg](https://ffmpeg.org) and `ffprobe` programs
#[derive(Debug)]
pub struct Ffmpeg;

impl Ffmpeg {
    /// Verify that the `ffmpeg` and `ffprobe` binaries are reachable
    pub fn new() -> Result<Self> {
        assert_success_command(FFMPEG, |cmd| cmd.arg("-version"))?;
        assert_success_command(FFPROBE, |cmd| cmd.arg("-version"))?;

        Ok(Self)
    }
}

impl ClipExtractor for Ffmpeg {
    fn probe_duration(&self, input: &Path) -> Result<f64> {
        let res = run_command(
            FFPROBE,
            |cmd| {
                cmd.args(FFXXX_DEFAULT_ARGS)
                    .args(["-of", "json"])
                    .arg("-show_format")
                    .arg(input.as_os_str())
            },
            Capture::STDOUT,
        )?;

        if !res.status.success() {
            return Err(Error::ProbeFailure {
                path: input.to_path_buf(),
            });
        }

        let output = String::from_utf8_lossy(&res.stdout);
        let json = serde_json::from_str::<serde_json::Value>(&output)
            .into_diagnostic()
            .wrap_err("Could not parse ffprobe JSON output")?;

        // ffprobe reports the duration as a decimal string under "format"
        let duration = json
            .get("format")
            .and_then(|format| format.get("duration"))
            .and_then(|duration| duration.as_str())
            .and_then(|duration| duration.parse::<f64>().ok())
            .ok_or_else(|| Error::ProbeFailure {
                path: input.to_path_buf(),
            })?;

        if duration > 0.0 {
            Ok(duration)
        } else {
            Err(Error::ProbeFailure {
                path: input.to_path_buf(),
            })
        }
    }

    fn extract_clip(&self, input: &Path, output: &Path, window: &TrimWindow) -> Result<()> {
        let trim_failure = || Error::TrimFailure {
            output: output.to_path_buf(),
        };

        if window.is_empty() {
            return Err(trim_failure());
        }

        let res = run_command(
            FFMPEG,
            |cmd| {
                cmd.args(FFXXX_DEFAULT_ARGS)
                    .arg("-y")
                    .args([OsStr::new("-i"), input.as_os_str()])
                    .args(["-ss", &window.start.to_string()])
                    .args(["-to", &window.end.to_string()])
                    .args(["-c", "copy"])
                    .arg("--")
                    .arg(output)
            },
            Capture::empty(),
        )?;

        // Do not trust the status code alone, the output file is the
        // deliverable. An aborted run may still leave a partial file around.
        let produced_valid_output =
            res.status.success() && fs::metadata(output).map(|m| m.len() > 0).unwrap_or(false);

        if produced_valid_output {
            Ok(())
        } else {
            if output.exists() {
                let _ = fs::remove_file(output);
            }
            Err(trim_failure())
        }
    }
}
