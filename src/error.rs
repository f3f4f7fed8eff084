//! Crate-wide error type for carrier operations.

use thiserror::Error;

use crate::crypto::CryptoError;

/// Errors that can occur while hiding, extracting, or inspecting data
/// in a carrier.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("carrier too small: need {needed} bytes, capacity is {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    #[error("carrier load error: {0}")]
    CarrierLoad(String),

    #[error("carrier save error: {0}")]
    CarrierSave(String),

    #[error("unsupported carrier format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid length header: declares {declared} bytes, carrier capacity is {capacity}")]
    InvalidHeader { declared: usize, capacity: usize },

    #[error("encryption error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
