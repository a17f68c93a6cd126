//! Folder conventions: resolving one run's inputs and output path

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{HudError, HudResult};

/// Resolved paths for one processing run. Built once, immutable thereafter.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Folder the user selected
    pub folder: PathBuf,
    /// The transport-stream recording
    pub video_source: PathBuf,
    /// The telemetry log
    pub metadata: PathBuf,
    /// Timestamp-qualified output path, unique per run
    pub output: PathBuf,
}

impl RunConfig {
    /// Scan `folder` (top level only) for exactly one `.ts` recording and
    /// one `*Metadata.json` log. Unrelated files are ignored; if several
    /// candidates match, the lexicographically first wins and the rest are
    /// reported and skipped.
    pub fn resolve(folder: &Path) -> HudResult<Self> {
        let mut videos: Vec<PathBuf> = Vec::new();
        let mut logs: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(folder)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.ends_with(".ts") {
                videos.push(entry.path().to_path_buf());
            } else if name.ends_with("metadata.json") {
                logs.push(entry.path().to_path_buf());
            }
        }
        videos.sort();
        logs.sort();

        if videos.len() > 1 {
            warn!(extra = videos.len() - 1, "multiple recordings found, using the first");
        }
        if logs.len() > 1 {
            warn!(extra = logs.len() - 1, "multiple telemetry logs found, using the first");
        }

        let video_source = videos.into_iter().next().ok_or(HudError::MissingInput {
            folder: folder.to_path_buf(),
            what: "transport-stream recording (*.ts)",
        })?;
        let metadata = logs.into_iter().next().ok_or(HudError::MissingInput {
            folder: folder.to_path_buf(),
            what: "telemetry log (*Metadata.json)",
        })?;

        let output = folder.join(format!(
            "overlay-{}.mp4",
            Local::now().format("%Y%m%d-%H%M%S")
        ));

        debug!(
            video = %video_source.display(),
            metadata = %metadata.display(),
            output = %output.display(),
            "sources resolved"
        );

        Ok(Self {
            folder: folder.to_path_buf(),
            video_source,
            metadata,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolves_recording_and_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("trip.ts"), b"ts").unwrap();
        fs::write(dir.path().join("TripMetadata.json"), b"[]").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let config = RunConfig::resolve(dir.path()).unwrap();
        assert_eq!(config.video_source, dir.path().join("trip.ts"));
        assert_eq!(config.metadata, dir.path().join("TripMetadata.json"));
        let name = config.output.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("overlay-") && name.ends_with(".mp4"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TRIP.TS"), b"ts").unwrap();
        fs::write(dir.path().join("tripmetadata.json"), b"[]").unwrap();

        let config = RunConfig::resolve(dir.path()).unwrap();
        assert_eq!(config.video_source, dir.path().join("TRIP.TS"));
    }

    #[test]
    fn missing_recording_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TripMetadata.json"), b"[]").unwrap();

        let err = RunConfig::resolve(dir.path()).unwrap_err();
        assert!(matches!(err, HudError::MissingInput { what, .. } if what.contains("recording")));
    }

    #[test]
    fn missing_log_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("trip.ts"), b"ts").unwrap();

        let err = RunConfig::resolve(dir.path()).unwrap_err();
        assert!(matches!(err, HudError::MissingInput { what, .. } if what.contains("telemetry")));
    }

    #[test]
    fn nested_folders_are_not_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("trip.ts"), b"ts").unwrap();
        fs::write(dir.path().join("TripMetadata.json"), b"[]").unwrap();

        assert!(RunConfig::resolve(dir.path()).is_err());
    }
}
