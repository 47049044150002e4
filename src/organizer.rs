use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    io::ensure_dir,
    result::{err_msg, Error, Result},
};

/// Files produced segments into per-video folders under the final root.
///
/// The destination folder is named after the source video's base name,
/// supplied explicitly by the caller. Segments are moved, never copied.
#[derive(Debug, Clone)]
pub struct TrimmedFileOrganizer {
    final_root: PathBuf,
}

impl TrimmedFileOrganizer {
    pub fn new(final_root: PathBuf) -> Self {
        Self { final_root }
    }

    /// Move `segment` under `<final_root>/<video_base>/`, creating the
    /// folder if absent, and return the final path.
    ///
    /// On a failed move (missing source, permissions, cross-device rename)
    /// the segment is left where it was and [`Error::MoveFailure`] carries
    /// the underlying cause.
    pub fn file(&self, segment: &Path, video_base: &str) -> Result<PathBuf> {
        let destination_folder = self.final_root.join(video_base);
        ensure_dir(&destination_folder)?;

        let file_name = segment
            .file_name()
            .ok_or_else(|| err_msg(format!("'{}' has no file name", segment.display())))?;
        let destination = destination_folder.join(file_name);

        fs::rename(segment, &destination).map_err(|cause| Error::MoveFailure {
            from: segment.to_path_buf(),
            to: destination.clone(),
            cause,
        })?;

        info!(
            "Moved '{}' to '{}'",
            segment.display(),
            destination.display()
        );
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn moves_the_segment_under_the_video_folder() {
        let staging = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let segment = staging.path().join("holiday_trim1.mp4");
        File::create(&segment).unwrap();

        let organizer = TrimmedFileOrganizer::new(root.path().to_path_buf());
        let moved = organizer.file(&segment, "holiday").unwrap();

        assert_eq!(moved, root.path().join("holiday/holiday_trim1.mp4"));
        assert!(moved.is_file());
        assert!(!segment.exists());
    }

    #[test]
    fn folder_creation_is_idempotent() {
        let staging = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let organizer = TrimmedFileOrganizer::new(root.path().to_path_buf());

        for n in 1..=2 {
            let segment = staging.path().join(format!("holiday_trim{n}.mp4"));
            File::create(&segment).unwrap();
            organizer.file(&segment, "holiday").unwrap();
        }

        assert!(root.path().join("holiday/holiday_trim1.mp4").is_file());
        assert!(root.path().join("holiday/holiday_trim2.mp4").is_file());
    }

    #[test]
    fn missing_source_reports_a_move_failure() {
        let root = TempDir::new().unwrap();
        let organizer = TrimmedFileOrganizer::new(root.path().to_path_buf());

        let err = organizer
            .file(Path::new("/nonexistent/holiday_trim1.mp4"), "holiday")
            .unwrap_err();
        assert!(matches!(err, Error::MoveFailure { .. }));
    }
}
