//! URL builder
//!
//! Combines the path encoder and the signer with the proxy configuration.
//! Configuration is validated once in [`UrlBuilder::new`]; after that building
//! a URL cannot fail.

use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::params::ProxyParams;
use crate::path::{decode_path, encode_path, DecodedPath};
use crate::signer::Signer;

/// Builds (and checks) image proxy URLs
///
/// Immutable after construction apart from its metric counters, so a single
/// instance can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct UrlBuilder {
    base_url: String,
    signer: Option<Signer>,
    metrics: Metrics,
}

impl UrlBuilder {
    /// Create a builder from configuration
    ///
    /// Fails on an empty base URL or a key/salt that is not valid base64.
    /// A missing key or salt is allowed: signed URLs then degrade to unsigned
    /// ones and a warning is logged here once.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        config.validate()?;
        let signer = config.signer()?;

        if signer.is_none() {
            tracing::warn!(
                base_url = %config.normalized_base_url(),
                key_configured = config.key.is_some(),
                salt_configured = config.salt.is_some(),
                "imgproxy key or salt not configured, signed URLs will be built unsigned"
            );
        }

        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            signer,
            metrics: Metrics::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether `build_url(.., sign = true)` produces signed URLs
    pub fn signing_enabled(&self) -> bool {
        self.signer.is_some()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a proxy URL
    ///
    /// Returns `{base}/{signature}/{path}` when `sign` is set and signing is
    /// configured, `{base}/{path}` otherwise.
    pub fn build_url(&self, image: &str, params: &ProxyParams, sign: bool) -> String {
        let path = encode_path(image, params);

        match (&self.signer, sign) {
            (Some(signer), true) => {
                self.metrics.increment_signed();
                format!("{}/{}/{}", self.base_url, signer.sign(&path), path)
            }
            (None, true) => {
                self.metrics.increment_unsigned();
                self.metrics.increment_unsigned_fallback();
                tracing::debug!(image, "signing requested without key/salt, building unsigned URL");
                format!("{}/{}", self.base_url, path)
            }
            (_, false) => {
                self.metrics.increment_unsigned();
                format!("{}/{}", self.base_url, path)
            }
        }
    }

    /// Signed URL with no transformation parameters
    pub fn url(&self, image: &str) -> String {
        self.build_url(image, &ProxyParams::new(), true)
    }

    /// Check a URL built against the same configuration and decode its path
    ///
    /// With signing configured the URL must carry a valid signature. Without
    /// it, a signature segment (if any) is ignored.
    pub fn verify_url(&self, url: &str) -> Result<DecodedPath> {
        let rest = url
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| Error::ForeignUrl {
                url: url.to_string(),
            })?;

        let (signature, path) = match rest.split('/').collect::<Vec<_>>().as_slice() {
            [path] => (None, *path),
            [signature, path] => (Some(*signature), *path),
            _ => {
                return Err(Error::InvalidPath(format!(
                    "expected [signature/]path, got '{}'",
                    rest
                )))
            }
        };

        match (&self.signer, signature) {
            (Some(signer), Some(signature)) => signer.verify(signature, path)?,
            (Some(_), None) => return Err(Error::MissingSignature),
            (None, _) => {}
        }

        decode_path(path)
    }
}
