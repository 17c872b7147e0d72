// crates/loomspace-config/src/lib.rs
// ============================================================================
// Module: Loomspace Config
// Description: Canonical configuration model for the MCP gateway.
// Purpose: Load process-wide settings once at startup and fail closed.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration for the Loomspace MCP gateway: server bind and limits, the
//! bootstrap registration token, and the strings stamped into the tool
//! manifest and OpenAPI document. Loaded once from TOML at startup and
//! validated fail-closed; handlers receive it by reference and never re-read
//! the environment per request.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum accepted registration token length in bytes.
pub const MIN_REGISTRATION_TOKEN_BYTES: usize = 16;

/// Default maximum request body size in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default bind address for the HTTP server.
const DEFAULT_BIND: &str = "127.0.0.1:8087";

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bootstrap registration settings.
    pub registration: RegistrationConfig,
    /// Tool manifest identity strings.
    #[serde(default)]
    pub manifest: ManifestConfig,
    /// OpenAPI document info strings.
    #[serde(default)]
    pub openapi: OpenApiInfoConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (`host:port`).
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Bootstrap registration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationConfig {
    /// Shared secret compared against the `x-registration-token` header.
    pub token: String,
}

/// Tool manifest identity strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
    /// Machine-facing gateway name.
    #[serde(default = "default_name_for_model")]
    pub name_for_model: String,
    /// Human-facing gateway name.
    #[serde(default = "default_name_for_human")]
    pub name_for_human: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name_for_model: default_name_for_model(),
            name_for_human: default_name_for_human(),
        }
    }
}

/// OpenAPI document info strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenApiInfoConfig {
    /// Document title.
    #[serde(default = "default_openapi_title")]
    pub title: String,
    /// Document version.
    #[serde(default = "default_openapi_version")]
    pub version: String,
}

impl Default for OpenApiInfoConfig {
    fn default() -> Self {
        Self {
            title: default_openapi_title(),
            version: default_openapi_version(),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bind address value.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default body size limit value.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default machine-facing manifest name.
fn default_name_for_model() -> String {
    "loomspace".to_string()
}

/// Default human-facing manifest name.
fn default_name_for_human() -> String {
    "Loomspace".to_string()
}

/// Default OpenAPI title.
fn default_openapi_title() -> String {
    "Loomspace MCP Gateway".to_string()
}

/// Default OpenAPI version.
fn default_openapi_version() -> String {
    "1.0.0".to_string()
}

// ============================================================================
// SECTION: Loading & Validation
// ============================================================================

impl GatewayConfig {
    /// Parses configuration from a TOML string without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        let config = Self::from_toml_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, failing closed on unsafe settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.bind must be a socket address, got {}",
                self.server.bind
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be non-zero".to_string(),
            ));
        }
        let token = self.registration.token.trim();
        if token.len() < MIN_REGISTRATION_TOKEN_BYTES {
            return Err(ConfigError::Invalid(format!(
                "registration.token must be at least {MIN_REGISTRATION_TOKEN_BYTES} bytes"
            )));
        }
        if self.manifest.name_for_model.trim().is_empty() {
            return Err(ConfigError::Invalid("manifest.name_for_model must be non-empty".to_string()));
        }
        if self.manifest.name_for_human.trim().is_empty() {
            return Err(ConfigError::Invalid("manifest.name_for_human must be non-empty".to_string()));
        }
        if self.openapi.title.trim().is_empty() {
            return Err(ConfigError::Invalid("openapi.title must be non-empty".to_string()));
        }
        if self.openapi.version.trim().is_empty() {
            return Err(ConfigError::Invalid("openapi.version must be non-empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File read failures.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parse failures.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Validation failures.
    #[error("invalid config: {0}")]
    Invalid(String),
}
