//! Steganography adapters for hiding data in media carriers.
//!
//! Supports:
//! - Image LSB steganography (PNG, BMP)
//! - Audio LSB steganography (WAV, 16-bit PCM)
//! - Video LSB steganography (Y4M), chunked across frames
//!
//! The file-level operations in this module pick the adapter from the
//! carrier's file extension. With a password, image and audio payloads are
//! wrapped through [`crate::crypto`] here; the video adapter applies the
//! password itself, inside its chunking pipeline.

pub mod audio;
pub mod image;
pub mod video;

pub use audio::AudioStego;
pub use image::ImageStego;
pub use video::VideoStego;

use std::path::Path;

use tracing::info;

use crate::crypto;
use crate::error::StegoError;

/// Carrier family, resolved from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierKind {
    Image,
    Audio,
    Video,
}

impl CarrierKind {
    /// Resolves the carrier kind for a path, by extension.
    pub fn from_path(path: &Path) -> Result<Self, StegoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" | "bmp" => Ok(Self::Image),
            "wav" => Ok(Self::Audio),
            "y4m" => Ok(Self::Video),
            _ => Err(StegoError::UnsupportedFormat(format!(
                "unrecognized carrier extension for '{}'",
                path.display()
            ))),
        }
    }
}

/// Hides `data` from a cover file into `output`, optionally encrypting it
/// with `password` first.
pub fn hide_in_file(
    cover: &Path,
    data: &[u8],
    output: &Path,
    password: Option<&str>,
) -> Result<(), StegoError> {
    match CarrierKind::from_path(cover)? {
        CarrierKind::Image => {
            let payload = wrap_payload(data, password)?;
            let stego = ImageStego::from_file(cover)?;
            ImageStego::from_image(stego.hide(&payload)?).save(output)?;
        }
        CarrierKind::Audio => {
            let payload = wrap_payload(data, password)?;
            AudioStego::from_file(cover)?.hide(&payload)?.save(output)?;
        }
        CarrierKind::Video => {
            VideoStego::from_file(cover)?.hide(data, password)?.save(output)?;
        }
    }

    info!(
        cover = %cover.display(),
        output = %output.display(),
        bytes = data.len(),
        encrypted = password.is_some(),
        "data hidden in carrier"
    );
    Ok(())
}

/// Extracts hidden data from a carrier file, optionally decrypting it.
pub fn extract_from_file(input: &Path, password: Option<&str>) -> Result<Vec<u8>, StegoError> {
    let data = match CarrierKind::from_path(input)? {
        CarrierKind::Image => {
            unwrap_payload(ImageStego::from_file(input)?.extract()?, password)?
        }
        CarrierKind::Audio => {
            unwrap_payload(AudioStego::from_file(input)?.extract()?, password)?
        }
        CarrierKind::Video => VideoStego::from_file(input)?.extract(password)?,
    };

    info!(input = %input.display(), bytes = data.len(), "data extracted from carrier");
    Ok(data)
}

/// Reports whether a carrier file's LSB plane looks tampered with.
pub fn detect_in_file(path: &Path) -> Result<bool, StegoError> {
    let anomalous = match CarrierKind::from_path(path)? {
        CarrierKind::Image => ImageStego::from_file(path)?.detect_anomalies(),
        CarrierKind::Audio => AudioStego::from_file(path)?.detect_anomalies(),
        CarrierKind::Video => VideoStego::from_file(path)?.detect_anomalies(),
    };

    info!(path = %path.display(), anomalous, "carrier inspected");
    Ok(anomalous)
}

fn wrap_payload(data: &[u8], password: Option<&str>) -> Result<Vec<u8>, StegoError> {
    match password {
        Some(password) => Ok(crypto::encrypt(password, data)?),
        None => Ok(data.to_vec()),
    }
}

fn unwrap_payload(payload: Vec<u8>, password: Option<&str>) -> Result<Vec<u8>, StegoError> {
    match password {
        Some(password) => Ok(crypto::decrypt(password, &payload)?),
        None => Ok(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_kind_from_extension() {
        assert_eq!(CarrierKind::from_path(Path::new("a.png")).unwrap(), CarrierKind::Image);
        assert_eq!(CarrierKind::from_path(Path::new("a.BMP")).unwrap(), CarrierKind::Image);
        assert_eq!(CarrierKind::from_path(Path::new("a.wav")).unwrap(), CarrierKind::Audio);
        assert_eq!(CarrierKind::from_path(Path::new("a.y4m")).unwrap(), CarrierKind::Video);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = CarrierKind::from_path(Path::new("movie.mp4"));
        assert!(matches!(result, Err(StegoError::UnsupportedFormat(_))));

        let result = CarrierKind::from_path(Path::new("no_extension"));
        assert!(matches!(result, Err(StegoError::UnsupportedFormat(_))));
    }
}
