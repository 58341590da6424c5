use super::types::*;
use crate::config::Config;
use std::path::PathBuf;
use tokio::process::Command;

/// yt-dlp backend: best audio stream, extracted to MP3 at the configured
/// bitrate, written into the download directory as "<uploader> - <title>.mp3".
pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    /// Locate yt-dlp on PATH.
    pub fn locate() -> Result<Self, ExtractError> {
        let binary = which::which("yt-dlp").map_err(|_| ExtractError::MissingBackend)?;
        Ok(Self { binary })
    }

    /// Use an explicit binary path instead of the PATH lookup.
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Download and transcode one URL, returning the parsed info record.
    pub async fn extract(&self, url: &str, config: &Config) -> Result<MediaInfo, ExtractError> {
        let args = build_args(url, config);

        let output = Command::new(&self.binary).args(&args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Backend(
                stderr.trim().lines().last().unwrap_or("unknown error").to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        // --print-json emits one JSON object on the last non-empty line
        let json_line = stdout
            .lines()
            .rev()
            .find(|l| l.trim_start().starts_with('{'))
            .ok_or_else(|| ExtractError::Backend("no info JSON in yt-dlp output".to_string()))?;

        let info: YtDlpInfo = serde_json::from_str(json_line)?;
        let mut media: MediaInfo = info.into();

        // The filepath in the info JSON predates the extract-audio
        // post-processor, so point it at the .mp3 sibling.
        if let Some(path) = media.output_path.take() {
            media.output_path = Some(path.with_extension("mp3"));
        }

        Ok(media)
    }
}

fn build_args(url: &str, config: &Config) -> Vec<String> {
    let template = config
        .download_dir
        .join("%(uploader)s - %(title)s.%(ext)s")
        .to_string_lossy()
        .to_string();

    vec![
        "-f".to_string(),
        "bestaudio/best".to_string(),
        "--extract-audio".to_string(),
        "--audio-format".to_string(),
        "mp3".to_string(),
        "--audio-quality".to_string(),
        format!("{}K", config.quality),
        "--continue".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--print-json".to_string(),
        "-o".to_string(),
        template,
        url.to_string(),
    ]
}
