//! LSB steganography for video files.
//!
//! Hides data across the frames of a Y4M (YUV4MPEG2) video: raw,
//! uncompressed, and therefore lossless. The length-prefixed payload is
//! sliced into chunks of one frame's capacity and each chunk is embedded
//! headerlessly into one frame's plane samples, in frame order; frames
//! beyond the last chunk are passed through untouched. Width, height,
//! frame rate, colorspace, and frame count are preserved exactly.
//!
//! The whole video is decoded into memory for the duration of a call, so a
//! payload that does not fit is rejected before any output is written.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use tracing::debug;
use y4m::{Colorspace, Ratio};

use crate::bits::{self, LENGTH_HEADER_LEN};
use crate::crypto;
use crate::detect;
use crate::error::StegoError;

/// Video steganography handler.
pub struct VideoStego {
    width: usize,
    height: usize,
    framerate: Ratio,
    colorspace: Colorspace,
    /// Byte length of the Y, U, and V planes of one frame.
    plane_lens: [usize; 3],
    /// Decoded frames, each frame's planes concatenated Y then U then V.
    frames: Vec<Vec<u8>>,
}

impl VideoStego {
    /// Creates a new VideoStego from a Y4M file path, decoding every frame.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Creates a new VideoStego from Y4M bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read>(reader: R) -> Result<Self, StegoError> {
        let mut reader = reader;
        let mut decoder =
            y4m::decode(&mut reader).map_err(|e| StegoError::CarrierLoad(e.to_string()))?;

        if decoder.get_bytes_per_sample() != 1 {
            return Err(StegoError::UnsupportedFormat(format!(
                "only 8-bit Y4M video is supported, got {}-bit samples",
                decoder.get_bit_depth()
            )));
        }

        let width = decoder.get_width();
        let height = decoder.get_height();
        let framerate = decoder.get_framerate();
        let colorspace = decoder.get_colorspace();

        let mut plane_lens = [0usize; 3];
        let mut frames = Vec::new();
        loop {
            match decoder.read_frame() {
                Ok(frame) => {
                    let y = frame.get_y_plane();
                    let u = frame.get_u_plane();
                    let v = frame.get_v_plane();
                    plane_lens = [y.len(), u.len(), v.len()];

                    let mut samples = Vec::with_capacity(y.len() + u.len() + v.len());
                    samples.extend_from_slice(y);
                    samples.extend_from_slice(u);
                    samples.extend_from_slice(v);
                    frames.push(samples);
                }
                Err(y4m::Error::EOF) => break,
                Err(e) => return Err(StegoError::CarrierLoad(e.to_string())),
            }
        }

        Ok(Self {
            width,
            height,
            framerate,
            colorspace,
            plane_lens,
            frames,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of decoded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Embeddable bytes per frame: one bit per plane sample. Equals
    /// width × height × 3 / 8 for 4:4:4 video.
    pub fn frame_capacity(&self) -> usize {
        self.plane_lens.iter().sum::<usize>() / 8
    }

    /// Total payload capacity in bytes across all frames, after the 4-byte
    /// length header.
    pub fn capacity(&self) -> usize {
        (self.frame_capacity() * self.frames.len()).saturating_sub(LENGTH_HEADER_LEN)
    }

    /// Hides data across the video's frames.
    ///
    /// When a password is given the payload is first sealed into a cipher
    /// blob by [`crypto::encrypt`]. A payload that needs more chunks than
    /// the video has frames fails with [`StegoError::CapacityExceeded`]
    /// before anything is modified.
    pub fn hide(&self, data: &[u8], password: Option<&str>) -> Result<Self, StegoError> {
        let payload = match password {
            Some(password) => crypto::encrypt(password, data)?,
            None => data.to_vec(),
        };

        let frame_capacity = self.frame_capacity();
        if frame_capacity == 0 || payload.len() > self.capacity() {
            return Err(StegoError::CapacityExceeded {
                needed: payload.len(),
                capacity: self.capacity(),
            });
        }

        let framed = bits::with_length_header(&payload);
        let mut frames = self.frames.clone();
        for (index, (frame, chunk)) in
            frames.iter_mut().zip(framed.chunks(frame_capacity)).enumerate()
        {
            bits::write_payload(frame, chunk);
            debug!(frame = index, chunk_len = chunk.len(), "embedded chunk into frame");
        }

        Ok(Self {
            width: self.width,
            height: self.height,
            framerate: self.framerate,
            colorspace: self.colorspace,
            plane_lens: self.plane_lens,
            frames,
        })
    }

    /// Extracts hidden data from the video.
    ///
    /// Every frame's full per-frame capacity is read back in frame order
    /// and concatenated, then the leading big-endian length header selects
    /// the payload. With a password, the payload is decrypted afterwards.
    pub fn extract(&self, password: Option<&str>) -> Result<Vec<u8>, StegoError> {
        let frame_capacity = self.frame_capacity();
        let mut framed = Vec::with_capacity(frame_capacity * self.frames.len());
        for frame in &self.frames {
            framed.extend_from_slice(&bits::read_payload(frame.as_slice(), frame_capacity));
        }

        let payload = bits::parse_length_frame(&framed, self.capacity())?;
        match password {
            Some(password) => Ok(crypto::decrypt(password, &payload)?),
            None => Ok(payload),
        }
    }

    /// True iff any frame's LSB plane looks tampered with. Frames are
    /// scanned in order and the scan stops at the first flagged frame.
    pub fn detect_anomalies(&self) -> bool {
        self.frames
            .iter()
            .any(|frame| detect::is_anomalous(frame.as_slice()))
    }

    /// Saves the video to a Y4M file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Returns the video as Y4M bytes.
    pub fn to_y4m_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        self.write_to(Cursor::new(&mut bytes))?;
        Ok(bytes)
    }

    fn write_to<W: Write>(&self, writer: W) -> Result<(), StegoError> {
        let mut writer = writer;
        let mut encoder = y4m::encode(self.width, self.height, self.framerate)
            .with_colorspace(self.colorspace)
            .write_header(&mut writer)
            .map_err(|e| StegoError::CarrierSave(e.to_string()))?;

        let [y_len, u_len, _] = self.plane_lens;
        for samples in &self.frames {
            let (y, rest) = samples.split_at(y_len);
            let (u, v) = rest.split_at(u_len);
            let frame = y4m::Frame::new([y, u, v], None);
            encoder
                .write_frame(&frame)
                .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        }
        Ok(())
    }
}
