mod types;
mod ytdlp;

pub use types::{ExtractError, MediaInfo};
pub use ytdlp::YtDlp;

/// Superficial URL check: is this a link to the supported platform?
/// A substring test only, not a validator — yt-dlp does the real parsing.
pub fn is_supported_url(input: &str) -> bool {
    input.contains("youtube.com") || input.contains("youtu.be")
}
