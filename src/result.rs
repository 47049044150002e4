use std::{fmt::Display, path::PathBuf, time::Duration};

use miette::miette;

#[derive(Debug)]
pub enum Error {
    /// No control in the rendered page matched the wanted label pattern
    ControlNotFound { pattern: String },

    /// No completed download appeared in the directory before the timeout
    DownloadTimeout { dir: PathBuf, timeout: Duration },

    /// The source video could not be opened or reported a non-positive duration
    ProbeFailure { path: PathBuf },

    /// Extracting a segment did not produce a valid output file
    TrimFailure { output: PathBuf },

    /// A produced segment could not be moved into its destination folder
    MoveFailure {
        from: PathBuf,
        to: PathBuf,
        cause: std::io::Error,
    },

    Miette(miette::Report),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ControlNotFound { pattern } => {
                write!(f, "no download control matching '{pattern}' found in the page")
            }
            Error::DownloadTimeout { dir, timeout } => write!(
                f,
                "no completed download appeared in '{}' within {}s",
                dir.display(),
                timeout.as_secs()
            ),
            Error::ProbeFailure { path } => write!(
                f,
                "could not probe a positive duration out of '{}'",
                path.display()
            ),
            Error::TrimFailure { output } => {
                write!(f, "segment extraction did not produce '{}'", output.display())
            }
            Error::MoveFailure { from, to, cause } => write!(
                f,
                "could not move '{}' to '{}': {cause}",
                from.display(),
                to.display()
            ),
            Error::Miette(report) => write!(f, "{report}"),
        }
    }
}

impl From<miette::Report> for Error {
    fn from(err: miette::Report) -> Self {
        Error::Miette(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Miette(miette::Report::msg(err))
    }
}

impl From<Error> for miette::Report {
    fn from(err: Error) -> Self {
        match err {
            Error::Miette(report) => report,
            err => miette!("{err}"),
        }
    }
}

impl Error {
    pub fn wrap_err_with<D, F>(self, f: F) -> Error
    where
        D: Display + Send + Sync + 'static,
        F: FnOnce() -> D,
    {
        match self {
            Error::Miette(report) => Error::Miette(report.wrap_err(f())),
            err => err,
        }
    }
}

/// Build an [`Error`] out of a plain message
pub fn err_msg<D: Display>(msg: D) -> Error {
    Error::Miette(miette!("{msg}"))
}

/// Shortcut for returning a plain-message error
pub fn bail<T, D: Display>(msg: D) -> Result<T> {
    Err(err_msg(msg))
}

pub type Result<T> = std::result::Result<T, Error>;
