use std::path::Path;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::{
    io::ensure_dir,
    organizer::TrimmedFileOrganizer,
    outside::ClipExtractor,
    planner::SegmentPlanner,
    result::{err_msg, Result},
    types::{SourceVideo, TrimWindow},
};

use super::{Actor, VideoOutcome};

/// Worker owning the whole trimming pipeline of its assigned videos:
/// probe, plan, extract each window, file each segment.
///
/// Segments of one video are produced and filed in increasing window order.
/// A failed segment or a failed video is logged and skipped, it never stops
/// the actor.
#[derive(Debug)]
pub struct TrimActor<'a> {
    id: usize,
    extractor: &'a dyn ClipExtractor,
    planner: SegmentPlanner,
    organizer: TrimmedFileOrganizer,
    temp_root: &'a Path,
    rng: fastrand::Rng,

    receive_channel: Option<Receiver<SourceVideo>>,
    send_channel: Option<Sender<VideoOutcome>>,
}

impl Actor<SourceVideo, VideoOutcome> for TrimActor<'_> {
    fn set_receive_channel(&mut self, channel: Receiver<SourceVideo>) {
        self.receive_channel = Some(channel);
    }

    fn set_send_channel(&mut self, channel: Sender<VideoOutcome>) {
        self.send_channel = Some(channel);
    }

    fn run(mut self) -> Result<()> {
        let receive_channel = self
            .receive_channel
            .take()
            .ok_or_else(|| err_msg("Receive channel not set"))?;

        let send_channel = self
            .send_channel
            .take()
            .ok_or_else(|| err_msg("Send channel not set"))?;

        debug!("Actor {} started, waiting for a video", self.id);

        for video in receive_channel {
            match self.process_video(&video) {
                Ok(outcome) => {
                    info!(
                        "Completed processing video '{}' ({}/{} segment(s) filed)",
                        video.base_name, outcome.segments_filed, outcome.windows_planned
                    );
                    send_channel
                        .send(outcome)
                        .map_err(|_| err_msg("Could not send the video outcome"))?;
                }
                Err(err) => {
                    error!("Skipping '{}': {err}", video.base_name);
                }
            }

            debug!("Iteration completed. Waiting for next video");
        }

        debug!("All iterations completed. Stopping the actor.");
        Ok(())
    }
}

impl<'a> TrimActor<'a> {
    pub fn new(
        id: usize,
        extractor: &'a dyn ClipExtractor,
        planner: SegmentPlanner,
        temp_root: &'a Path,
        final_root: &Path,
    ) -> Self {
        Self {
            id,
            extractor,
            planner,
            organizer: TrimmedFileOrganizer::new(final_root.to_path_buf()),
            temp_root,
            rng: fastrand::Rng::new(),
            receive_channel: None,
            send_channel: None,
        }
    }

    /// Cut the planned windows out of the video and file every produced
    /// segment. Only a probe failure aborts the whole video.
    fn process_video(&mut self, video: &SourceVideo) -> Result<VideoOutcome> {
        let duration = self.extractor.probe_duration(&video.path)?;
        info!(
            "Processing video '{}' (duration: {}s)",
            video.base_name, duration as u64
        );

        let windows = self.planner.plan(&mut self.rng, duration as u64);

        let staging = self.temp_root.join(&video.base_name);
        ensure_dir(&staging)?;

        let mut segments_filed = 0;
        for (idx, window) in windows.iter().enumerate() {
            let segment_name = format!(
                "{}_trim{}.{}",
                video.base_name,
                idx + 1,
                video.extension.as_str()
            );
            let temp_output = staging.join(&segment_name);

            info!(
                "Trimming segment {} for '{}': {window} ({}s)",
                idx + 1,
                video.base_name,
                window.len_secs()
            );

            match self.extract_and_file(video, window, &temp_output) {
                Ok(()) => segments_filed += 1,
                // A bad segment must not abort the rest of the video
                Err(err) => warn!("Segment '{segment_name}' failed: {err}"),
            }
        }

        Ok(VideoOutcome {
            base_name: video.base_name.clone(),
            windows_planned: windows.len(),
            segments_filed,
        })
    }

    fn extract_and_file(
        &self,
        video: &SourceVideo,
        window: &TrimWindow,
        temp_output: &Path,
    ) -> Result<()> {
        self.extractor
            .extract_clip(&video.path, temp_output, window)?;
        self.organizer.file(temp_output, &video.base_name)?;

        Ok(())
    }
}
