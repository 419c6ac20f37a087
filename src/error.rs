//! Error types for URL building, signing and configuration
//!
//! Building a URL is total; errors only surface while parsing loosely-typed
//! parameters, loading configuration, or verifying/decoding an existing URL.

use thiserror::Error;

/// Centralized error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter name outside the fixed option set
    #[error("Unknown imgproxy parameter: {name}")]
    UnknownParameter { name: String },

    /// Malformed `name=value` option assignment
    #[error("Invalid option assignment: {0}")]
    InvalidAssignment(String),

    /// Configuration errors (missing base URL, unset env vars, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Signing key or salt is not valid base64
    #[error("Invalid base64 in '{field}': {message}")]
    InvalidBase64 { field: String, message: String },

    /// Signing requested with an empty key or salt
    #[error("Signing key and salt must not be empty")]
    EmptySigningKey,

    /// Encoded path is not valid base64url or not UTF-8
    #[error("Invalid path encoding: {0}")]
    InvalidPathEncoding(String),

    /// Decoded path does not have the expected shape
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Signature does not match the encoded path
    #[error("Invalid URL signature")]
    InvalidSignature,

    /// Signing is configured but the URL carries no signature segment
    #[error("URL is missing a signature segment")]
    MissingSignature,

    /// URL does not start with the configured base URL
    #[error("URL does not belong to this proxy: {url}")]
    ForeignUrl { url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Error::UnknownParameter { name: name.into() }
    }

    pub fn invalid_base64(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidBase64 {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error belongs to startup-time configuration rather than a
    /// single call
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::InvalidBase64 { .. }
                | Error::EmptySigningKey
                | Error::Io(_)
                | Error::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
