use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("yt-dlp not found on PATH (install it with `pip install yt-dlp` or your package manager)")]
    MissingBackend,
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),
    #[error("failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("yt-dlp failed: {0}")]
    Backend(String),
    #[error("could not parse yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What we keep from a completed extraction: enough to tag the file and
/// find it again.
#[derive(Debug, Clone)]
pub struct MediaInfo {
    pub title: String,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    pub thumbnail: Option<String>,
    /// Output path as reported by yt-dlp, when it reports one. The
    /// directory scan is only the fallback.
    pub output_path: Option<PathBuf>,
}

/// The slice of yt-dlp's info JSON we care about.
#[derive(Debug, Deserialize)]
pub(super) struct YtDlpInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub requested_downloads: Vec<RequestedDownload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RequestedDownload {
    #[serde(default)]
    pub filepath: Option<PathBuf>,
}

impl From<YtDlpInfo> for MediaInfo {
    fn from(info: YtDlpInfo) -> Self {
        let output_path = info
            .requested_downloads
            .into_iter()
            .find_map(|d| d.filepath);
        MediaInfo {
            title: info.title.unwrap_or_else(|| "Unknown Title".to_string()),
            uploader: info.uploader,
            channel: info.channel,
            thumbnail: info.thumbnail,
            output_path,
        }
    }
}
