use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Runtime configuration for the pipeline. Built once at startup and passed
/// in explicitly; nothing reads it through globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where yt-dlp writes the extracted audio. Created if missing.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Auto-import folder watched by the media library. Must already exist;
    /// it belongs to the library, not to us.
    #[serde(default = "default_auto_import_dir")]
    pub auto_import_dir: PathBuf,
    /// Album tag written to every track.
    #[serde(default = "default_album")]
    pub album: String,
    /// MP3 bitrate preset passed to yt-dlp (128, 192, 256, 320).
    #[serde(default = "default_quality")]
    pub quality: String,
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ConvertedAudio")
}

fn default_auto_import_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Music")
        .join("iTunes")
        .join("iTunes Media")
        .join("Automatically Add to iTunes")
}

fn default_album() -> String {
    "YouTube Singles".to_string()
}

fn default_quality() -> String {
    "192".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            auto_import_dir: default_auto_import_dir(),
            album: default_album(),
            quality: default_quality(),
        }
    }
}

fn config_path() -> PathBuf {
    // ~/.config/tunedrop/config.yml on every platform, so the file is easy
    // to find and edit by hand
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tunedrop")
        .join("config.yml")
}

/// Load the config file if one exists, otherwise fall back to defaults.
pub fn get_config() -> Result<Config, Box<dyn std::error::Error>> {
    let path = config_path();
    if path.exists() {
        let contents = fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}
