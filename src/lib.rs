// imgproxy URL builder library
//
// Turns an image reference plus transformation options into a (signed)
// imgproxy URL.

pub mod builder;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod params;
pub mod path;
pub mod signer;

pub use builder::UrlBuilder;
pub use config::ProxyConfig;
pub use error::{Error, Result};
pub use params::{ParamValue, ProxyOption, ProxyParams};
pub use path::{decode_path, encode_path, DecodedPath};
pub use signer::Signer;
