use tracing::debug;

use crate::types::{Timestamp, TrimWindow};

/// Plans the trim windows of a source video.
///
/// Window lengths are drawn uniformly from the configured range, so two runs
/// over the same video differ unless the caller seeds the random source.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPlanner {
    clips_per_video: usize,
    min_clip_secs: u64,
    max_clip_secs: u64,
    max_span_secs: u64,
}

impl SegmentPlanner {
    pub fn new(
        clips_per_video: usize,
        min_clip_secs: u64,
        max_clip_secs: u64,
        max_span_secs: u64,
    ) -> Self {
        Self {
            clips_per_video,
            min_clip_secs,
            max_clip_secs,
            max_span_secs,
        }
    }

    /// Compute an ordered, non-overlapping sequence of windows covering the
    /// start of the video.
    ///
    /// The working span is the duration, capped at the configured maximum.
    /// Each window gets a random length and is clamped at the span end;
    /// planning stops early once a window would be empty. A non-positive
    /// duration therefore yields no windows at all.
    pub fn plan(&self, rng: &mut fastrand::Rng, duration_secs: u64) -> Vec<TrimWindow> {
        let working_span = duration_secs.min(self.max_span_secs);
        let mut windows = Vec::with_capacity(self.clips_per_video);
        let mut cursor = 0;

        for _ in 0..self.clips_per_video {
            let length = rng.u64(self.min_clip_secs..=self.max_clip_secs);
            let end = (cursor + length).min(working_span);
            if end <= cursor {
                break;
            }

            windows.push(TrimWindow::new(
                Timestamp::from_secs(cursor),
                Timestamp::from_secs(end),
            ));
            cursor = end;
        }

        debug!(
            "Planned {} window(s) over a {working_span}s working span",
            windows.len()
        );
        windows
    }
}
