use crate::metadata::TrackMetadata;
use id3::{Tag, TagLike, Version};
use std::path::Path;

/// Write title/artist/album into the file's ID3 container as v2.3.
pub fn write_tags(path: &Path, meta: &TrackMetadata) -> Result<(), id3::Error> {
    let mut tag = read_or_init(path)?;
    tag.set_title(&meta.title);
    tag.set_artist(&meta.artist);
    tag.set_album(&meta.album);
    tag.write_to_path(path, Version::Id3v23)
}

/// A file with no tag header is expected on a fresh transcode, so start
/// from an empty tag. Any other read failure is a real error.
pub(crate) fn read_or_init(path: &Path) -> Result<Tag, id3::Error> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => Ok(Tag::new()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn meta() -> TrackMetadata {
        TrackMetadata {
            artist: "Artist Name".to_string(),
            title: "Song Title".to_string(),
            album: "YouTube Singles".to_string(),
        }
    }

    #[test]
    fn tagging_a_headerless_file_succeeds_and_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        // Raw audio-ish bytes with no ID3 header at all
        fs::write(&path, [0xffu8, 0xfb, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();

        write_tags(&path, &meta()).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.title(), Some("Song Title"));
        assert_eq!(tag.artist(), Some("Artist Name"));
        assert_eq!(tag.album(), Some("YouTube Singles"));
    }

    #[test]
    fn rewriting_tags_overwrites_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        fs::write(&path, [0xffu8, 0xfb, 0x90, 0x00]).unwrap();

        write_tags(&path, &meta()).unwrap();
        let second = TrackMetadata {
            artist: "Other".to_string(),
            title: "Renamed".to_string(),
            album: "Rips".to_string(),
        };
        write_tags(&path, &second).unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.artist(), Some("Other"));
        assert_eq!(tag.title(), Some("Renamed"));
        assert_eq!(tag.album(), Some("Rips"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.mp3");
        assert!(write_tags(&path, &meta()).is_err());
    }
}
