//! Path encoding
//!
//! The proxy path is `/<code>:<value>/.../<image>` encoded as unpadded
//! base64url:
//! ```text
//! {width: 100, quality: 80} + "cat.jpg"  ->  /w:100/q:80/cat.jpg  ->  L3c6MTAwL3E6ODAvY2F0LmpwZw
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::Error;
use crate::params::{ParamValue, ProxyOption, ProxyParams};

/// Plain (not yet encoded) path for an image and its parameters
pub fn raw_path(image: &str, params: &ProxyParams) -> String {
    let segments: Vec<String> = params
        .iter()
        .map(|(option, value)| format!("{}:{}", option.code(), value))
        .collect();

    if segments.is_empty() {
        format!("/{}", image)
    } else {
        format!("/{}/{}", segments.join("/"), image)
    }
}

/// Encode an image reference and parameters into a base64url path token
///
/// The image reference is taken verbatim, with no escaping.
pub fn encode_path(image: &str, params: &ProxyParams) -> String {
    URL_SAFE_NO_PAD.encode(raw_path(image, params))
}

/// A path token decoded back into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPath {
    /// `(option, value)` segments in path order
    pub segments: Vec<(ProxyOption, String)>,
    /// Raw image reference (the remainder of the path)
    pub image: String,
}

impl DecodedPath {
    /// Parameters with every value as a string
    pub fn params(&self) -> ProxyParams {
        self.segments
            .iter()
            .map(|(option, value)| (*option, ParamValue::Str(value.clone())))
            .collect()
    }
}

/// Decode a path token produced by [`encode_path`]
///
/// Leading `code:value` segments with a known code are parameters. The first
/// segment that is not, and everything after it, is the image reference. The
/// final segment is always part of the image, so an image named `w:1` still
/// round-trips.
pub fn decode_path(encoded: &str) -> Result<DecodedPath, Error> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| Error::InvalidPathEncoding(e.to_string()))?;
    let path = String::from_utf8(bytes).map_err(|e| Error::InvalidPathEncoding(e.to_string()))?;

    let mut rest = path
        .strip_prefix('/')
        .ok_or_else(|| Error::InvalidPath(format!("path must start with '/': {}", path)))?;

    let mut segments = Vec::new();
    while let Some((segment, tail)) = rest.split_once('/') {
        let Some((code, value)) = segment.split_once(':') else {
            break;
        };
        let Some(option) = ProxyOption::from_code(code) else {
            break;
        };
        segments.push((option, value.to_string()));
        rest = tail;
    }

    Ok(DecodedPath {
        segments,
        image: rest.to_string(),
    })
}
