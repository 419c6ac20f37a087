//! URL signing with HMAC-SHA256
//!
//! The signature is computed as:
//! ```text
//! signature = base64url(HMAC-SHA256(key, salt + encoded_path))
//! ```
//! Salt and path are fed as two separate updates, salt first, which is what
//! the proxy server checks against.

use std::fmt;

use base64::{
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
    engine::{DecodePaddingMode, Engine},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Standard alphabet, accepting configuration values with or without padding
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 configuration value
pub fn decode_base64_config(field: &str, value: &str) -> Result<Vec<u8>, Error> {
    STANDARD_LENIENT
        .decode(value.trim())
        .map_err(|e| Error::invalid_base64(field, e.to_string()))
}

/// Holds the decoded key and salt used to sign proxy paths
#[derive(Clone)]
pub struct Signer {
    key: Vec<u8>,
    salt: Vec<u8>,
}

impl Signer {
    /// Create a signer from raw key and salt bytes
    ///
    /// Empty key or salt is rejected so that a missing secret can never produce
    /// a signature that looks valid.
    pub fn new(key: impl Into<Vec<u8>>, salt: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let key = key.into();
        let salt = salt.into();
        if key.is_empty() || salt.is_empty() {
            return Err(Error::EmptySigningKey);
        }
        Ok(Self { key, salt })
    }

    /// Create a signer from base64-encoded key and salt
    pub fn from_base64(key: &str, salt: &str) -> Result<Self, Error> {
        Self::new(
            decode_base64_config("key", key)?,
            decode_base64_config("salt", salt)?,
        )
    }

    /// Sign an encoded path
    pub fn sign(&self, encoded_path: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.compute_hmac(encoded_path))
    }

    /// Check a signature against an encoded path
    pub fn verify(&self, signature: &str, encoded_path: &str) -> Result<(), Error> {
        let expected = self.sign(encoded_path);

        if constant_time_compare(signature, &expected) {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    fn compute_hmac(&self, encoded_path: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");

        mac.update(&self.salt);
        mac.update(encoded_path.as_bytes());

        mac.finalize().into_bytes().to_vec()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &format_args!("<{} bytes>", self.key.len()))
            .field("salt", &format_args!("<{} bytes>", self.salt.len()))
            .finish()
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
