// Constants module - environment variable names and defaults
//
// Keeping these in one place makes the deployment contract easy to find.

// =============================================================================
// Environment
// =============================================================================

/// Base URL of the image proxy (required)
pub const ENV_BASE_URL: &str = "IMGPROXY_URL";

/// Base64-encoded HMAC key (optional; signing is disabled without it)
pub const ENV_KEY: &str = "IMGPROXY_KEY";

/// Base64-encoded salt (optional; signing is disabled without it)
pub const ENV_SALT: &str = "IMGPROXY_SALT";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
