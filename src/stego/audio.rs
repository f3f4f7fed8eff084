//! LSB steganography for audio files.
//!
//! Hides data in the least significant bits of audio samples, in stream
//! order. Supports WAV files with 16-bit integer PCM only.
//!
//! Format: [4 bytes big-endian length] + [data bytes]; unused capacity is
//! zero-filled, matching the image adapter.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::bits::{self, LENGTH_HEADER_LEN};
use crate::detect;
use crate::error::StegoError;

/// Audio steganography handler.
pub struct AudioStego {
    /// Audio specification (sample rate, channels, etc.)
    spec: WavSpec,
    /// Interleaved 16-bit samples.
    samples: Vec<i16>,
}

impl AudioStego {
    /// Creates a new AudioStego from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let reader = WavReader::open(path).map_err(|e| StegoError::CarrierLoad(e.to_string()))?;
        Self::from_wav_reader(reader)
    }

    /// Creates a new AudioStego from WAV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| StegoError::CarrierLoad(e.to_string()))?;
        Self::from_wav_reader(reader)
    }

    fn from_wav_reader<R: Read + Seek>(reader: WavReader<R>) -> Result<Self, StegoError> {
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(StegoError::UnsupportedFormat(format!(
                "only 16-bit PCM WAV is supported, got {} bits {:?}",
                spec.bits_per_sample, spec.sample_format
            )));
        }

        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StegoError::CarrierLoad(e.to_string()))?;

        Ok(Self { spec, samples })
    }

    /// Total number of LSB-writable slots: one bit per sample.
    pub fn capacity_bits(&self) -> usize {
        self.samples.len()
    }

    /// Payload capacity in bytes, after the 4-byte length header.
    pub fn capacity(&self) -> usize {
        (self.samples.len() / 8).saturating_sub(LENGTH_HEADER_LEN)
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.samples.len() / self.spec.channels as usize;
        frames as f64 / self.spec.sample_rate as f64
    }

    /// Hides data in the audio using LSB steganography.
    pub fn hide(&self, data: &[u8]) -> Result<Self, StegoError> {
        if (data.len() + LENGTH_HEADER_LEN) * 8 > self.capacity_bits() {
            return Err(StegoError::CapacityExceeded {
                needed: data.len(),
                capacity: self.capacity(),
            });
        }

        let framed = bits::with_length_header(data);
        let mut samples = self.samples.clone();
        bits::write_payload(&mut samples, &framed);

        Ok(Self {
            spec: self.spec,
            samples,
        })
    }

    /// Extracts hidden data from the audio, validating the embedded length
    /// header against the carrier's capacity.
    pub fn extract(&self) -> Result<Vec<u8>, StegoError> {
        let capacity = self.capacity();
        let framed = bits::read_payload(self.samples.as_slice(), LENGTH_HEADER_LEN + capacity);
        bits::parse_length_frame(&framed, capacity)
    }

    /// True iff the LSB plane looks tampered with.
    pub fn detect_anomalies(&self) -> bool {
        detect::is_anomalous(self.samples.as_slice())
    }

    /// Saves the audio to a WAV file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let writer =
            WavWriter::create(path, self.spec).map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        self.write_samples(writer)
    }

    /// Returns the audio as WAV bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        {
            let writer = WavWriter::new(Cursor::new(&mut bytes), self.spec)
                .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
            self.write_samples(writer)?;
        }
        Ok(bytes)
    }

    fn write_samples<W: std::io::Write + Seek>(
        &self,
        mut writer: WavWriter<W>,
    ) -> Result<(), StegoError> {
        for sample in &self.samples {
            writer
                .write_sample(*sample)
                .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| StegoError::CarrierSave(e.to_string()))
    }

    /// Returns the audio specification.
    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    /// Returns the number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}
