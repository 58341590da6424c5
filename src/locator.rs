use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Files smaller than this are assumed to be corrupt or incomplete
/// downloads rather than real tracks.
const MIN_AUDIO_BYTES: u64 = 100_000;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no .{ext} file found in {}", .dir.display())]
    NotFound { dir: PathBuf, ext: String },
    #[error("{} is only {size} bytes, looks like an incomplete download", .path.display())]
    TooSmall { path: PathBuf, size: u64 },
    #[error("could not read {}: {source}", .dir.display())]
    Io {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pick the most recently modified file with the given extension.
///
/// yt-dlp's reported path is not always reliable across post-processing
/// steps, so this scan is the fallback: greatest mtime wins, ties resolve
/// in whatever order the directory iterates. Racy with concurrent writers,
/// which we don't have.
pub fn newest_audio_file(dir: &Path, ext: &str) -> Result<PathBuf, LocateError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LocateError::Io {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut newest: Option<(SystemTime, PathBuf, u64)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        let matches_ext = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        if !meta.is_file() {
            continue;
        }
        let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if newest.as_ref().map(|(t, _, _)| mtime > *t).unwrap_or(true) {
            newest = Some((mtime, path, meta.len()));
        }
    }

    match newest {
        None => Err(LocateError::NotFound {
            dir: dir.to_path_buf(),
            ext: ext.to_string(),
        }),
        Some((_, path, size)) if size < MIN_AUDIO_BYTES => {
            Err(LocateError::TooSmall { path, size })
        }
        Some((_, path, _)) => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::tempdir;

    fn write_mp3(dir: &Path, name: &str, bytes: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; bytes]).unwrap();
        path
    }

    #[test]
    fn picks_newest_by_mtime() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "old.mp3", 200_000);
        sleep(Duration::from_millis(30));
        write_mp3(dir.path(), "middle.mp3", 200_000);
        sleep(Duration::from_millis(30));
        let newest = write_mp3(dir.path(), "newest.mp3", 200_000);

        assert_eq!(newest_audio_file(dir.path(), "mp3").unwrap(), newest);
    }

    #[test]
    fn extension_match_is_case_insensitive_and_exclusive() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "video.mp4", 200_000);
        sleep(Duration::from_millis(30));
        let upper = write_mp3(dir.path(), "track.MP3", 200_000);

        assert_eq!(newest_audio_file(dir.path(), "mp3").unwrap(), upper);
    }

    #[test]
    fn empty_directory_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            newest_audio_file(dir.path(), "mp3"),
            Err(LocateError::NotFound { .. })
        ));
    }

    #[test]
    fn undersized_file_is_rejected() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "stub.mp3", 10);
        assert!(matches!(
            newest_audio_file(dir.path(), "mp3"),
            Err(LocateError::TooSmall { size: 10, .. })
        ));
    }

    #[test]
    fn newest_wins_even_if_older_file_is_larger() {
        let dir = tempdir().unwrap();
        write_mp3(dir.path(), "big-old.mp3", 500_000);
        sleep(Duration::from_millis(30));
        let newest = write_mp3(dir.path(), "small-new.mp3", 150_000);

        assert_eq!(newest_audio_file(dir.path(), "mp3").unwrap(), newest);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            newest_audio_file(&gone, "mp3"),
            Err(LocateError::Io { .. })
        ));
    }
}
