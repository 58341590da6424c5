use crate::extractor::MediaInfo;

/// Artist/title splits are only believed when the left segment is shorter
/// than this; longer prefixes are almost never an artist name.
const MAX_ARTIST_SPLIT_LEN: usize = 40;

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Tag fields for one track, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: String,
    pub title: String,
    pub album: String,
}

/// Derive (artist, title) from the extraction record.
///
/// Artist falls back uploader → channel → "Unknown Artist". If the title
/// looks like "Artist - Title" (first " - " occurrence, left segment under
/// 40 chars and non-blank), the split overrides the uploader-derived
/// artist. Best effort only; anything else keeps the title unchanged.
pub fn resolve(info: &MediaInfo, album: &str) -> TrackMetadata {
    let mut artist = [info.uploader.as_deref(), info.channel.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string();
    let mut title = info.title.clone();

    if let Some((left, right)) = info.title.split_once(" - ") {
        if left.chars().count() < MAX_ARTIST_SPLIT_LEN && !left.trim().is_empty() {
            artist = left.trim().to_string();
            title = right.trim().to_string();
        }
    }

    TrackMetadata {
        artist,
        title,
        album: album.to_string(),
    }
}
