// Configuration module
//
// Proxy settings are read once at startup and handed to `UrlBuilder::new`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{ENV_BASE_URL, ENV_KEY, ENV_SALT};
use crate::error::{Error, Result};
use crate::signer::{decode_base64_config, Signer};

/// Image proxy settings
///
/// ```yaml
/// base_url: https://img.example.com
/// key: ${IMGPROXY_KEY}
/// salt: ${IMGPROXY_SALT}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy base URL, without the path token
    pub base_url: String,
    /// Base64-encoded HMAC key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Base64-encoded salt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl ProxyConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            key: None,
            salt: None,
        }
    }

    pub fn with_signing(mut self, key: impl Into<String>, salt: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self.salt = Some(salt.into());
        self
    }

    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| Error::Config(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        if let Some(var_name) = missing {
            return Err(Error::Config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )));
        }

        Ok(serde_yaml::from_str(&substituted)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Load from `IMGPROXY_URL`, `IMGPROXY_KEY` and `IMGPROXY_SALT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_BASE_URL).ok_or_else(|| {
            Error::Config(format!("Environment variable '{}' is not set", ENV_BASE_URL))
        })?;

        Ok(Self {
            base_url,
            key: get(ENV_KEY),
            salt: get(ENV_SALT),
        })
    }

    /// Check the configuration before any URL is built
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url cannot be empty".to_string()));
        }

        if let Some(key) = present(&self.key) {
            decode_base64_config("key", key)?;
        }
        if let Some(salt) = present(&self.salt) {
            decode_base64_config("salt", salt)?;
        }

        Ok(())
    }

    /// Signer for this configuration, or `None` when key or salt is missing
    pub fn signer(&self) -> Result<Option<Signer>> {
        match (present(&self.key), present(&self.salt)) {
            (Some(key), Some(salt)) => Signer::from_base64(key, salt).map(Some),
            _ => Ok(None),
        }
    }

    /// Base URL with trailing slashes removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
