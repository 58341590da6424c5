use id3::frame::{Picture, PictureType};
use id3::{TagLike, Version};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("thumbnail fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("thumbnail fetch returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode thumbnail: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not write cover art: {0}")]
    Tag(#[from] id3::Error),
}

/// Fetch the thumbnail, re-encode it as RGB JPEG, and embed it as the
/// front-cover picture frame. Callers treat every error here as non-fatal;
/// a track without artwork is still a track.
pub async fn embed_thumbnail(
    client: &reqwest::Client,
    path: &Path,
    url: &str,
) -> Result<(), ArtworkError> {
    let response = client.get(url).timeout(FETCH_TIMEOUT).send().await?;
    if !response.status().is_success() {
        return Err(ArtworkError::Status(response.status()));
    }
    let bytes = response.bytes().await?;

    let cover = reencode_jpeg(&bytes)?;
    attach_front_cover(path, cover)?;
    Ok(())
}

/// Thumbnails arrive as webp/png/jpeg; normalize to RGB JPEG so the
/// embedded picture is something every player renders.
fn reencode_jpeg(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let mut buf = Cursor::new(Vec::new());
    img.to_rgb8().write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}

fn attach_front_cover(path: &Path, data: Vec<u8>) -> Result<(), id3::Error> {
    let mut tag = crate::tags::read_or_init(path)?;
    tag.add_frame(Picture {
        mime_type: "image/jpeg".to_string(),
        picture_type: PictureType::CoverFront,
        description: "Cover".to_string(),
        data,
    });
    tag.write_to_path(path, Version::Id3v23)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 40, 40, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn reencode_produces_jpeg() {
        let jpeg = reencode_jpeg(&png_bytes()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn reencode_rejects_garbage() {
        assert!(reencode_jpeg(b"definitely not an image").is_err());
    }

    #[test]
    fn cover_frame_lands_in_the_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("track.mp3");
        fs::write(&path, [0xffu8, 0xfb, 0x90, 0x00]).unwrap();

        let jpeg = reencode_jpeg(&png_bytes()).unwrap();
        attach_front_cover(&path, jpeg).unwrap();

        let tag = id3::Tag::read_from_path(&path).unwrap();
        let pictures: Vec<_> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
        assert_eq!(pictures[0].mime_type, "image/jpeg");
        assert_eq!(pictures[0].description, "Cover");
    }
}
