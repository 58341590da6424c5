use crate::artwork;
use crate::config::Config;
use crate::extractor::{ExtractError, YtDlp};
use crate::locator::{self, LocateError};
use crate::metadata;
use crate::tags;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("download failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("could not locate the downloaded file: {0}")]
    Locate(#[from] LocateError),
    #[error("could not write tags to {}: {source}", .path.display())]
    TagWrite {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },
    #[error("could not move file into {}: {source} (file remains at {})", .target.display(), .path.display())]
    Relocate {
        path: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One URL in, one tagged file in the auto-import folder out.
pub struct Pipeline {
    config: Config,
    backend: YtDlp,
    client: reqwest::Client,
}

impl Pipeline {
    pub fn new(config: Config, backend: YtDlp) -> Self {
        Self {
            config,
            backend,
            client: reqwest::Client::new(),
        }
    }

    /// Run the full download → tag → artwork → relocate sequence for one
    /// URL. Artwork problems are reported but never abort the run; every
    /// other stage error does.
    pub async fn process(&self, url: &str) -> Result<PathBuf, PipelineError> {
        println!("Downloading audio...");
        let info = self.backend.extract(url, &self.config).await?;

        let meta = metadata::resolve(&info, &self.config.album);
        println!("  Artist: {}", meta.artist);
        println!("  Title:  {}", meta.title);

        let mp3_path = self.locate_output(&info.output_path)?;
        if let Some(name) = mp3_path.file_name() {
            println!("File: {}", name.to_string_lossy());
        }

        tags::write_tags(&mp3_path, &meta).map_err(|source| PipelineError::TagWrite {
            path: mp3_path.clone(),
            source,
        })?;
        println!("Metadata tags updated.");

        if let Some(thumbnail) = info.thumbnail.as_deref() {
            println!("Adding album artwork...");
            match artwork::embed_thumbnail(&self.client, &mp3_path, thumbnail).await {
                Ok(()) => println!("Album artwork embedded."),
                Err(e) => println!("Could not add artwork: {}", e),
            }
        }

        self.relocate(&mp3_path)
    }

    /// Prefer the path yt-dlp reported; fall back to scanning the download
    /// directory for the newest MP3.
    fn locate_output(&self, reported: &Option<PathBuf>) -> Result<PathBuf, LocateError> {
        if let Some(path) = reported {
            if path.is_file() {
                return Ok(path.clone());
            }
        }
        locator::newest_audio_file(&self.config.download_dir, "mp3")
    }

    /// Rename into the auto-import folder under the same basename. On
    /// failure the file stays put and the error says where.
    fn relocate(&self, path: &Path) -> Result<PathBuf, PipelineError> {
        let file_name = path.file_name().map(PathBuf::from).unwrap_or_default();
        let target = self.config.auto_import_dir.join(file_name);
        std::fs::rename(path, &target).map_err(|source| PipelineError::Relocate {
            path: path.to_path_buf(),
            target: self.config.auto_import_dir.clone(),
            source,
        })?;
        Ok(target)
    }
}
