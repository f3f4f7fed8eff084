//! Password-based payload encryption.
//!
//! This module provides the self-describing cipher blob used when a payload
//! is hidden with a password:
//! - PBKDF2-HMAC-SHA256 key derivation (100,000 iterations, random salt)
//! - AES-256 in CBC mode with PKCS#7 padding
//!
//! Blob format: salt (16 bytes) || iv (16 bytes) || ciphertext (variable).

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Length of the random salt prepended to the blob.
pub const SALT_LEN: usize = 16;

/// Length of the random initialization vector following the salt.
pub const IV_LEN: usize = 16;

/// AES block size; ciphertext length is always a multiple of this.
const BLOCK_SIZE: usize = 16;

/// PBKDF2 iteration count for key derivation.
const KDF_ITERATIONS: u32 = 100_000;

/// Errors that can occur during payload encryption or decryption.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("encrypted blob too short: {0} bytes, need at least 32")]
    BlobTooShort(usize),

    #[error("ciphertext length {0} is not a positive multiple of the cipher block size")]
    BadCiphertextLength(usize),

    #[error("decryption failed: wrong password or corrupted data")]
    BadPadding,
}

/// Derives a 256-bit key from a password and salt.
fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, KDF_ITERATIONS, &mut key);
    key
}

/// Encrypts a payload with a password.
///
/// A fresh salt and IV are drawn from the OS entropy source on every call,
/// so encrypting the same payload twice yields different blobs.
pub fn encrypt(password: &str, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let key = derive_key(password, &salt);
    let ciphertext =
        Aes256CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(payload);

    let mut blob = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypts a blob produced by [`encrypt`] with the same password.
///
/// Fails with [`CryptoError::BadPadding`] when the password is wrong or the
/// blob was corrupted in transit.
pub fn decrypt(password: &str, blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < SALT_LEN + IV_LEN {
        return Err(CryptoError::BlobTooShort(blob.len()));
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let (iv, ciphertext) = rest.split_at(IV_LEN);

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::BadCiphertextLength(ciphertext.len()));
    }

    let key = derive_key(password, salt);
    let mut iv_bytes = [0u8; IV_LEN];
    iv_bytes.copy_from_slice(iv);

    Aes256CbcDec::new(&key.into(), &iv_bytes.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::BadPadding)
}
