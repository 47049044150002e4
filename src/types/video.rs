use std::path::{Path, PathBuf};

use super::VideoExtension;

/// A fully downloaded video eligible for trimming.
///
/// Read-only once constructed. The base name keys both the temporary
/// per-video staging folder and the final destination folder, so two
/// sources with the same base name would collide; the download directory
/// gives us unique filenames by construction.
#[derive(Debug, Clone)]
pub struct SourceVideo {
    pub path: PathBuf,
    pub base_name: String,
    pub extension: VideoExtension,
}

impl SourceVideo {
    /// Build from a filesystem path.
    /// Return None if the extension is not in the allow-list or the
    /// filename has no stem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let extension = VideoExtension::from_path(path)?;
        let base_name = path.file_stem()?.to_str()?.to_owned();

        Some(Self {
            path: path.to_path_buf(),
            base_name,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_base_name_and_extension() {
        let video = SourceVideo::from_path("downloads/holiday_720.mp4").unwrap();
        assert_eq!(video.base_name, "holiday_720");
        assert_eq!(video.extension, VideoExtension::Mp4);
    }

    #[test]
    fn refuses_unknown_extensions() {
        assert!(SourceVideo::from_path("downloads/holiday_720.crdownload").is_none());
        assert!(SourceVideo::from_path("downloads/notes.txt").is_none());
    }
}
