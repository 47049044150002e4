use std::{fmt::Display, ops::Add};

/// A position inside a video stream, in whole seconds.
///
/// Displays as `HH:MM:SS`, the form the ffmpeg `-ss`/`-to` options expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl Add<u64> for Timestamp {
    type Output = Timestamp;

    fn add(self, secs: u64) -> Self::Output {
        Timestamp(self.0 + secs)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (mins, secs) = (self.0 / 60, self.0 % 60);
        let (hours, mins) = (mins / 60, mins % 60);
        write!(f, "{hours:02}:{mins:02}:{secs:02}")
    }
}
