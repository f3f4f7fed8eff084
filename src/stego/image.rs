//! LSB steganography for images.
//!
//! Hides data in the least significant bits of RGB channel values, in
//! raster order (row-major pixels, channels R, G, B per pixel).
//! Supports PNG and BMP images (lossless formats only).
//!
//! Format: [4 bytes big-endian length] + [data bytes]; unused capacity is
//! zero-filled so trailing bits never read back as data.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::bits::{self, LENGTH_HEADER_LEN};
use crate::detect;
use crate::error::StegoError;

/// RGB channels written per pixel.
const CHANNELS: usize = 3;

/// Image steganography handler.
pub struct ImageStego {
    image: DynamicImage,
}

impl ImageStego {
    /// Creates a new ImageStego from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let image = image::open(path).map_err(|e| StegoError::CarrierLoad(e.to_string()))?;
        Ok(Self { image })
    }

    /// Creates a new ImageStego from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| StegoError::CarrierLoad(e.to_string()))?;
        Ok(Self { image })
    }

    /// Creates a new ImageStego from a DynamicImage.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Total number of LSB-writable slots: one bit per RGB channel.
    pub fn capacity_bits(&self) -> usize {
        let (width, height) = self.image.dimensions();
        (width as usize) * (height as usize) * CHANNELS
    }

    /// Payload capacity in bytes, after the 4-byte length header.
    pub fn capacity(&self) -> usize {
        (self.capacity_bits() / 8).saturating_sub(LENGTH_HEADER_LEN)
    }

    /// Hides data in the image using LSB steganography.
    ///
    /// Returns a new image with the length-prefixed data written into the
    /// channel LSBs and all remaining LSBs cleared.
    pub fn hide(&self, data: &[u8]) -> Result<DynamicImage, StegoError> {
        if (data.len() + LENGTH_HEADER_LEN) * 8 > self.capacity_bits() {
            return Err(StegoError::CapacityExceeded {
                needed: data.len(),
                capacity: self.capacity(),
            });
        }

        let framed = bits::with_length_header(data);
        Ok(self.write_samples(&framed))
    }

    /// Headerless variant of [`hide`](Self::hide): embeds a raw bit stream
    /// with no length prefix. Used as the per-frame primitive when a larger
    /// payload is chunked across video frames.
    pub fn hide_raw(&self, data: &[u8]) -> Result<DynamicImage, StegoError> {
        let capacity = self.capacity_bits() / 8;
        if data.len() > capacity {
            return Err(StegoError::CapacityExceeded {
                needed: data.len(),
                capacity,
            });
        }

        Ok(self.write_samples(data))
    }

    fn write_samples(&self, framed: &[u8]) -> DynamicImage {
        let mut rgb = self.image.to_rgb8();
        let samples: &mut [u8] = &mut rgb;
        bits::write_payload(samples, framed);
        DynamicImage::ImageRgb8(rgb)
    }

    /// Extracts hidden data from the image.
    ///
    /// The embedded length header is validated against the image's actual
    /// capacity; a foreign or damaged carrier fails with
    /// [`StegoError::InvalidHeader`] instead of yielding garbage.
    pub fn extract(&self) -> Result<Vec<u8>, StegoError> {
        let rgb = self.image.to_rgb8();
        let capacity = self.capacity();
        let framed = bits::read_payload(rgb.as_raw().as_slice(), LENGTH_HEADER_LEN + capacity);
        bits::parse_length_frame(&framed, capacity)
    }

    /// Headerless variant of [`extract`](Self::extract): reads back up to
    /// `max_bytes` raw bytes from the channel LSBs.
    pub fn extract_raw(&self, max_bytes: usize) -> Vec<u8> {
        let rgb = self.image.to_rgb8();
        bits::read_payload(rgb.as_raw().as_slice(), max_bytes)
    }

    /// True iff the LSB plane looks tampered with.
    pub fn detect_anomalies(&self) -> bool {
        let rgb = self.image.to_rgb8();
        detect::is_anomalous(rgb.as_raw().as_slice())
    }

    /// Saves the image to a file. Only lossless formats are accepted; a
    /// lossy re-encode would destroy the embedded bits.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if ext != "png" && ext != "bmp" {
            return Err(StegoError::UnsupportedFormat(format!(
                "cannot save carrier as '{}': only lossless png/bmp outputs preserve LSBs",
                path.display()
            )));
        }

        self.image
            .save(path)
            .map_err(|e| StegoError::CarrierSave(e.to_string()))
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        Ok(bytes)
    }

    /// Returns a reference to the underlying image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Consumes self and returns the underlying image.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}
