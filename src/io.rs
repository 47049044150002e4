use std::{collections::BTreeSet, fs, path::Path};

use miette::{Context, IntoDiagnostic};
use tracing::debug;

use crate::{result::Result, types::SourceVideo};

/// Create the directory and its parents if missing. Idempotent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not create directory '{}'", dir.display()))?;

    Ok(())
}

/// List the filenames currently present in the directory.
///
/// Used as a before/after diff to identify newly arrived downloads,
/// never persisted.
pub fn snapshot_dir(dir: &Path) -> Result<BTreeSet<String>> {
    let entries = dir
        .read_dir()
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read directory '{}'", dir.display()))?;

    Ok(entries
        .flatten()
        .flat_map(|entry| entry.file_name().into_string())
        .collect())
}

/// Discover the videos eligible for trimming in the directory,
/// filtered by the container extension allow-list.
pub fn discover_videos(dir: &Path) -> Result<Vec<SourceVideo>> {
    let entries = dir
        .read_dir()
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read directory '{}'", dir.display()))?;

    let mut videos: Vec<SourceVideo> = entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .flat_map(|entry| SourceVideo::from_path(entry.path()))
        .collect();

    // Directory order is platform-dependent, keep the batch deterministic
    videos.sort_by(|a, b| a.path.cmp(&b.path));

    debug!("{} video(s) discovered in '{}'", videos.len(), dir.display());
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn snapshot_lists_filenames() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("b.tmp")).unwrap();

        let snapshot = snapshot_dir(dir.path()).unwrap();
        assert_eq!(
            snapshot.into_iter().collect::<Vec<_>>(),
            vec!["a.mp4".to_string(), "b.tmp".to_string()]
        );
    }

    #[test]
    fn discovery_applies_the_allow_list() {
        let dir = TempDir::new().unwrap();
        for name in ["one.mp4", "two.mkv", "three.avi", "four.mov"] {
            File::create(dir.path().join(name)).unwrap();
        }
        File::create(dir.path().join("ignored.txt")).unwrap();
        File::create(dir.path().join("partial.crdownload")).unwrap();
        fs::create_dir(dir.path().join("subdir.mp4")).unwrap();

        let videos = discover_videos(dir.path()).unwrap();
        let names: Vec<_> = videos.iter().map(|v| v.base_name.as_str()).collect();
        assert_eq!(names, vec!["four", "one", "three", "two"]);
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
