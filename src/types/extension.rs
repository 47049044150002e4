use std::path::Path;

/// The video container formats eligible for trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoExtension {
    Mp4,
    Avi,
    Mov,
    Mkv,
}

impl VideoExtension {
    /// Return the extension without the leading dot.
    /// e.g. "mp4"
    pub fn as_str(self) -> &'static str {
        match self {
            VideoExtension::Mp4 => "mp4",
            VideoExtension::Avi => "avi",
            VideoExtension::Mov => "mov",
            VideoExtension::Mkv => "mkv",
        }
    }

    /// Parse the path file extension, case-insensitively.
    /// Return None in case of no or unrecognized extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "mp4" => Some(Self::Mp4),
                "avi" => Some(Self::Avi),
                "mov" => Some(Self::Mov),
                "mkv" => Some(Self::Mkv),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_allowed_extensions() {
        assert_eq!(VideoExtension::from_path("a/b/clip.mp4"), Some(VideoExtension::Mp4));
        assert_eq!(VideoExtension::from_path("clip.MKV"), Some(VideoExtension::Mkv));
        assert_eq!(VideoExtension::from_path("clip.mov"), Some(VideoExtension::Mov));
        assert_eq!(VideoExtension::from_path("clip.avi"), Some(VideoExtension::Avi));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(VideoExtension::from_path("notes.txt"), None);
        assert_eq!(VideoExtension::from_path("archive.crdownload"), None);
        assert_eq!(VideoExtension::from_path("no_extension"), None);
    }
}
