//! Gateway config validation tests for loomspace-config.
// crates/loomspace-config/tests/gateway_validation.rs
// =============================================================================
// Module: Gateway Config Validation Tests
// Description: Validate bind, limits, and registration token constraints.
// Purpose: Ensure gateway settings fail closed.
// =============================================================================

use loomspace_config::ConfigError;
use loomspace_config::GatewayConfig;
use loomspace_config::MIN_REGISTRATION_TOKEN_BYTES;

type TestResult = Result<(), String>;

/// A minimal valid configuration fixture.
fn minimal_config() -> Result<GatewayConfig, String> {
    GatewayConfig::from_toml_str(
        r#"
        [registration]
        token = "0123456789abcdef0123456789abcdef"
        "#,
    )
    .map_err(|err| err.to_string())
}

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn minimal_config_is_valid() -> TestResult {
    let config = minimal_config()?;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn defaults_are_applied() -> TestResult {
    let config = minimal_config()?;
    if config.server.bind != "127.0.0.1:8087" {
        return Err(format!("unexpected default bind {}", config.server.bind));
    }
    if config.manifest.name_for_model != "loomspace" {
        return Err(format!("unexpected manifest name {}", config.manifest.name_for_model));
    }
    Ok(())
}

#[test]
fn bind_must_be_socket_address() -> TestResult {
    let mut config = minimal_config()?;
    config.server.bind = "not-an-address".to_string();
    assert_invalid(config.validate(), "server.bind must be a socket address")
}

#[test]
fn max_body_bytes_must_be_non_zero() -> TestResult {
    let mut config = minimal_config()?;
    config.server.max_body_bytes = 0;
    assert_invalid(config.validate(), "server.max_body_bytes must be non-zero")
}

#[test]
fn short_registration_token_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.registration.token = "short".to_string();
    assert_invalid(
        config.validate(),
        &format!("registration.token must be at least {MIN_REGISTRATION_TOKEN_BYTES} bytes"),
    )
}

#[test]
fn whitespace_padding_does_not_satisfy_token_length() -> TestResult {
    let mut config = minimal_config()?;
    config.registration.token = format!("short{}", " ".repeat(32));
    assert_invalid(config.validate(), "registration.token must be at least")
}

#[test]
fn empty_manifest_name_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.manifest.name_for_model = "  ".to_string();
    assert_invalid(config.validate(), "manifest.name_for_model must be non-empty")
}

#[test]
fn empty_openapi_version_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.openapi.version = String::new();
    assert_invalid(config.validate(), "openapi.version must be non-empty")
}

#[test]
fn missing_registration_section_fails_parse() -> TestResult {
    match GatewayConfig::from_toml_str("[server]\nbind = \"127.0.0.1:8087\"\n") {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("expected parse failure".to_string()),
    }
}

#[test]
fn unknown_fields_fail_parse() -> TestResult {
    let raw = r#"
        [registration]
        token = "0123456789abcdef0123456789abcdef"
        surprise = true
        "#;
    match GatewayConfig::from_toml_str(raw) {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("expected parse failure".to_string()),
    }
}

#[test]
fn load_reads_and_validates_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("loomspace.toml");
    std::fs::write(
        &path,
        "[registration]\ntoken = \"0123456789abcdef0123456789abcdef\"\n",
    )
    .map_err(|err| err.to_string())?;
    let config = GatewayConfig::load(&path).map_err(|err| err.to_string())?;
    if config.registration.token.len() < MIN_REGISTRATION_TOKEN_BYTES {
        return Err("token truncated on load".to_string());
    }
    Ok(())
}
