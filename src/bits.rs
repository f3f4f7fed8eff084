//! Bit-level primitives shared by every carrier adapter.
//!
//! A payload is serialized to bits most-significant-bit first, written into
//! the low-order bit of successive carrier samples, and framed with a 4-byte
//! big-endian length header so extraction knows where the data ends.

use crate::error::StegoError;

/// Length of the big-endian byte-count header prepended to embedded data.
pub const LENGTH_HEADER_LEN: usize = 4;

/// A carrier sample whose low-order bit can hold one payload bit.
pub trait LsbSample: Copy {
    /// Returns the sample with its low-order bit replaced by `bit`.
    fn write_lsb(self, bit: u8) -> Self;

    /// Returns the sample's low-order bit.
    fn read_lsb(self) -> u8;
}

macro_rules! impl_lsb_sample {
    ($($ty:ty),+) => {$(
        impl LsbSample for $ty {
            #[inline]
            fn write_lsb(self, bit: u8) -> Self {
                (self & !1) | bit as $ty
            }

            #[inline]
            fn read_lsb(self) -> u8 {
                (self & 1) as u8
            }
        }
    )+};
}

impl_lsb_sample!(u8, i16);

/// Expands each byte to its 8 bits, most significant first.
pub fn bytes_to_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Inverse of [`bytes_to_bits`]. A trailing group of fewer than 8 bits
/// is dropped.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |byte, bit| (byte << 1) | bit))
        .collect()
}

/// Writes `data`'s bits into the LSBs of successive samples, then clears
/// the LSB of every remaining sample so unused capacity reads back as zero.
///
/// This is the headerless embed primitive; callers that need a
/// self-delimiting stream frame `data` with [`with_length_header`] first.
pub fn write_payload<S: LsbSample>(samples: &mut [S], data: &[u8]) {
    let total_bits = data.len() * 8;
    for (bit_index, sample) in samples.iter_mut().enumerate() {
        let bit = if bit_index < total_bits {
            (data[bit_index / 8] >> (7 - bit_index % 8)) & 1
        } else {
            0
        };
        *sample = sample.write_lsb(bit);
    }
}

/// Reads back up to `max_bytes` from the LSBs of successive samples.
/// The headerless inverse of [`write_payload`].
pub fn read_payload<S: LsbSample>(samples: &[S], max_bytes: usize) -> Vec<u8> {
    let byte_count = max_bytes.min(samples.len() / 8);
    let mut data = vec![0u8; byte_count];
    for bit_index in 0..byte_count * 8 {
        let bit = samples[bit_index].read_lsb();
        data[bit_index / 8] |= bit << (7 - bit_index % 8);
    }
    data
}

/// Prepends the 4-byte big-endian length header to `data`.
pub fn with_length_header(data: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(LENGTH_HEADER_LEN + data.len());
    framed.extend_from_slice(&(data.len() as u32).to_be_bytes());
    framed.extend_from_slice(data);
    framed
}

/// Parses the big-endian length header of an embedded frame.
pub fn read_length_header(framed: &[u8]) -> Option<usize> {
    let header: [u8; LENGTH_HEADER_LEN] = framed.get(..LENGTH_HEADER_LEN)?.try_into().ok()?;
    Some(u32::from_be_bytes(header) as usize)
}

/// Validates and strips the length header of a frame read back from a
/// carrier with payload capacity `capacity` bytes.
///
/// A declared length that exceeds what the carrier can actually hold means
/// the carrier never contained embedded data (or was damaged); it is
/// rejected before any allocation is sized from it.
pub fn parse_length_frame(framed: &[u8], capacity: usize) -> Result<Vec<u8>, StegoError> {
    let declared = read_length_header(framed)
        .ok_or(StegoError::InvalidHeader { declared: 0, capacity })?;

    if declared > capacity || LENGTH_HEADER_LEN + declared > framed.len() {
        return Err(StegoError::InvalidHeader { declared, capacity });
    }

    Ok(framed[LENGTH_HEADER_LEN..LENGTH_HEADER_LEN + declared].to_vec())
}
