//! # lsbhide - hide byte payloads inside media carriers
//!
//! lsbhide embeds arbitrary bytes in the least significant bits of a
//! carrier's samples: RGB channels for images, PCM samples for audio, and
//! per-frame plane samples for video. Payloads can be sealed with a
//! password first, and a statistical detector flags carriers whose LSB
//! plane no longer looks like natural media.
//!
//! ## Overview
//!
//! - Payloads are framed with a 4-byte big-endian length header; unused
//!   carrier capacity is zero-filled so extraction is self-delimiting.
//! - With a password, the payload becomes a self-describing cipher blob
//!   (PBKDF2-HMAC-SHA256 key derivation + AES-256-CBC): salt, IV, and
//!   ciphertext travel inside the carrier together.
//! - Video payloads are chunked to one frame's capacity and embedded frame
//!   by frame; frames past the last chunk are copied untouched.
//! - Only lossless containers are supported (PNG/BMP, 16-bit PCM WAV,
//!   Y4M): a lossy re-encode would destroy the embedded bits.
//!
//! ## Example
//!
//! ```rust
//! use image::{DynamicImage, RgbImage};
//! use lsbhide::{crypto, ImageStego};
//!
//! // 100x100 RGB carrier: 30000 LSB slots
//! let carrier = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
//!
//! let blob = crypto::encrypt("pw123", b"HELLO").unwrap();
//! let stego = ImageStego::from_image(carrier);
//! let hidden = ImageStego::from_image(stego.hide(&blob).unwrap());
//!
//! let recovered = crypto::decrypt("pw123", &hidden.extract().unwrap()).unwrap();
//! assert_eq!(recovered, b"HELLO");
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: password-based payload encryption (the cipher envelope)
//! - [`bits`]: bit-level codec and the length-header protocol
//! - [`stego`]: carrier adapters (image, audio, video) and file dispatch
//! - [`detect`]: LSB-plane anomaly detection
//!
//! The library emits [`tracing`] events at the operation level; installing
//! a subscriber is up to the caller.

pub mod bits;
pub mod crypto;
pub mod detect;
pub mod error;
pub mod stego;

// Re-export commonly used items at the crate root
pub use crypto::CryptoError;
pub use detect::{is_anomalous, lsb_mean, ANOMALY_THRESHOLD};
pub use error::StegoError;
pub use stego::{
    detect_in_file, extract_from_file, hide_in_file, AudioStego, CarrierKind, ImageStego,
    VideoStego,
};
