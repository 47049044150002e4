use std::{path::Path, thread};

use crossbeam_channel::{bounded, unbounded};
use tracing::info;

use crate::{
    actors::{Actor, TrimActor, VideoOutcome},
    io::{discover_videos, ensure_dir},
    outside::ClipExtractor,
    planner::SegmentPlanner,
    result::Result,
    settings::Settings,
    types::SourceVideo,
};

/// Discover the downloaded videos and trim them all concurrently,
/// one worker per video, capped at the available parallelism.
pub fn process_all_videos(
    extractor: &dyn ClipExtractor,
    settings: &Settings,
) -> Result<Vec<VideoOutcome>> {
    ensure_dir(&settings.temp_trim_dir)?;
    ensure_dir(&settings.final_trim_dir)?;

    let videos = discover_videos(&settings.download_dir)
        .map_err(|err| err.wrap_err_with(|| "Could not discover the downloaded videos"))?;
    if videos.is_empty() {
        info!(
            "No video files found in '{}' for trimming",
            settings.download_dir.display()
        );
        return Ok(Vec::new());
    }

    let workers = thread::available_parallelism()?.get().min(videos.len());
    info!(
        "Starting processing of {} video(s) on {workers} worker(s)",
        videos.len()
    );

    let planner = SegmentPlanner::new(
        settings.clips_per_video,
        settings.min_clip_secs,
        settings.max_clip_secs,
        settings.max_span_secs,
    );

    let outcomes = run_batch(
        extractor,
        planner,
        videos,
        workers,
        &settings.temp_trim_dir,
        &settings.final_trim_dir,
    )?;

    info!("Completed processing all videos for trimming");
    Ok(outcomes)
}

/// Fan the videos out to `workers` trim actors and collect their outcomes.
///
/// Each video is handled entirely by one actor; temp and destination
/// folders are keyed by the video base name, so the workers never touch
/// the same path. Completion order across videos is unspecified.
fn run_batch(
    extractor: &dyn ClipExtractor,
    planner: SegmentPlanner,
    videos: Vec<SourceVideo>,
    workers: usize,
    temp_root: &Path,
    final_root: &Path,
) -> Result<Vec<VideoOutcome>> {
    thread::scope(|scope| {
        let (input, receive) = bounded(workers);
        let (send, output) = unbounded();

        for id in 0..workers {
            let mut actor = TrimActor::new(id, extractor, planner, temp_root, final_root);
            actor.set_receive_channel(receive.clone());
            actor.set_send_channel(send.clone());

            thread::Builder::new()
                .name(format!("trim-{id}"))
                .spawn_scoped(scope, move || actor.run().unwrap())?;
        }

        // Only the actors may hold channel ends now, so that closing the
        // input cascades down to the output
        drop(receive);
        drop(send);

        for video in videos {
            input.send(video).unwrap();
        }
        drop(input);

        Ok(output.iter().collect())
    })
}

#[cfg(test)]
mod tests {
    use std::{
        fs::{self, File},
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use tempfile::TempDir;

    use crate::{
        result::Error,
        types::{SourceVideo, TrimWindow},
    };

    use super::*;

    /// Stand-in extractor that writes a marker file per segment and tracks
    /// how many extractions run at the same time.
    #[derive(Debug, Default)]
    struct FakeExtractor {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ClipExtractor for FakeExtractor {
        fn probe_duration(&self, input: &Path) -> Result<f64> {
            let name = input.file_name().unwrap().to_string_lossy();
            if name.starts_with("broken") {
                return Err(Error::ProbeFailure {
                    path: input.to_path_buf(),
                });
            }
            Ok(1000.0)
        }

        fn extract_clip(&self, _input: &Path, output: &Path, _window: &TrimWindow) -> Result<()> {
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(active, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            fs::write(output, b"segment").unwrap();
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn make_videos(dir: &Path, names: &[&str]) -> Vec<SourceVideo> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(format!("{name}.mp4"));
                File::create(&path).unwrap();
                SourceVideo::from_path(path).unwrap()
            })
            .collect()
    }

    fn planner() -> SegmentPlanner {
        SegmentPlanner::new(4, 180, 300, 24 * 60)
    }

    #[test]
    fn workers_are_capped_and_videos_never_mix() {
        let download = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let finals = TempDir::new().unwrap();
        let videos = make_videos(download.path(), &["a", "b", "c", "d", "e"]);
        let extractor = FakeExtractor::default();

        let outcomes =
            run_batch(&extractor, planner(), videos, 3, temp.path(), finals.path()).unwrap();

        assert_eq!(outcomes.len(), 5);
        assert!(extractor.peak.load(Ordering::SeqCst) <= 3);

        // A 1000s video always fits the full 4 windows, and every segment
        // must land under its own video's folder
        for name in ["a", "b", "c", "d", "e"] {
            let mut segments: Vec<_> = fs::read_dir(finals.path().join(name))
                .unwrap()
                .map(|entry| entry.unwrap().file_name().into_string().unwrap())
                .collect();
            segments.sort();

            let expected: Vec<_> = (1..=4).map(|n| format!("{name}_trim{n}.mp4")).collect();
            assert_eq!(segments, expected);
        }
    }

    #[test]
    fn a_bad_video_does_not_abort_the_batch() {
        let download = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let finals = TempDir::new().unwrap();
        let videos = make_videos(download.path(), &["broken", "fine"]);
        let extractor = FakeExtractor::default();

        let outcomes =
            run_batch(&extractor, planner(), videos, 2, temp.path(), finals.path()).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].base_name, "fine");
        assert_eq!(outcomes[0].segments_filed, 4);
        assert!(!finals.path().join("broken").exists());
    }

    #[test]
    fn empty_download_directory_yields_no_outcomes() {
        let download = TempDir::new().unwrap();
        let temp = TempDir::new().unwrap();
        let finals = TempDir::new().unwrap();

        let settings = Settings {
            download_dir: download.path().to_path_buf(),
            temp_trim_dir: temp.path().join("staging"),
            final_trim_dir: finals.path().join("library"),
            download_timeout_secs: 60,
            poll_interval_secs: 2,
            settle_delay_secs: 1,
            control_selector: ".controls".into(),
            control_pattern: r"720\.mp4".into(),
            control_wait_secs: 10,
            clips_per_video: 4,
            min_clip_secs: 180,
            max_clip_secs: 300,
            max_span_secs: 1440,
        };

        let outcomes = process_all_videos(&FakeExtractor::default(), &settings).unwrap();
        assert!(outcomes.is_empty());
        // The staging and final roots are still created on demand
        assert!(settings.temp_trim_dir.is_dir());
        assert!(settings.final_trim_dir.is_dir());
    }
}
