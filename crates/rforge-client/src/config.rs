//! Backend client configuration.
//!
//! Defaults point at a locally running backend. Override via environment
//! variables, a YAML file, or explicit construction for testing.

use std::path::Path;

use serde::Deserialize;
use url::Url;

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the ResponseForge backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeApiConfig {
    /// Backend origin. Always ends in `/`; endpoint paths are appended to it.
    pub base_url: Url,
    /// Upper bound on every request, in seconds.
    pub timeout_secs: u64,
}

/// On-disk shape of a configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ForgeApiConfig {
    /// Configuration for a backend on `127.0.0.1:5000` with a 30 s timeout.
    pub fn local() -> Result<Self, ConfigError> {
        Self::for_base_url(DEFAULT_BASE_URL)
    }

    /// Configuration for a backend at `base_url` with the default timeout.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `RFORGE_API_URL` (default: `http://127.0.0.1:5000/`)
    /// - `RFORGE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("RFORGE_API_URL", DEFAULT_BASE_URL)?,
            timeout_secs: env_timeout("RFORGE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from a YAML file with optional `base_url` and
    /// `timeout_secs` keys. Missing keys and a zero timeout take the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            base_url: parse_base_url(
                "base_url",
                file.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            )?,
            timeout_secs: positive_or_default(file.timeout_secs),
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

fn env_timeout(var: &str, default: u64) -> u64 {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

/// A zero timeout would fail every request immediately.
fn positive_or_default(timeout_secs: Option<u64>) -> u64 {
    timeout_secs
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

/// Parse a base URL and make sure its path ends in `/`, so that
/// `"{base}api/..."` stays under any path prefix.
fn parse_base_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            format!("{raw} cannot be used as a base URL"),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn local_points_at_local_backend() {
        let cfg = ForgeApiConfig::local().unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let cfg = ForgeApiConfig::for_base_url("https://forge.example.com/backend").unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://forge.example.com/backend/");
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("RFORGE_NONEXISTENT_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("RFORGE_TEST_BAD_URL", "not a url");
        let result = env_url("RFORGE_TEST_BAD_URL", "https://example.com");
        std::env::remove_var("RFORGE_TEST_BAD_URL");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == "RFORGE_TEST_BAD_URL"));
    }

    #[test]
    fn env_timeout_ignores_garbage_and_zero() {
        std::env::set_var("RFORGE_TEST_TIMEOUT_GARBAGE", "soon");
        std::env::set_var("RFORGE_TEST_TIMEOUT_ZERO", "0");
        std::env::set_var("RFORGE_TEST_TIMEOUT_OK", " 5 ");
        assert_eq!(env_timeout("RFORGE_TEST_TIMEOUT_GARBAGE", 30), 30);
        assert_eq!(env_timeout("RFORGE_TEST_TIMEOUT_ZERO", 30), 30);
        assert_eq!(env_timeout("RFORGE_TEST_TIMEOUT_OK", 30), 5);
        for var in [
            "RFORGE_TEST_TIMEOUT_GARBAGE",
            "RFORGE_TEST_TIMEOUT_ZERO",
            "RFORGE_TEST_TIMEOUT_OK",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://10.0.0.7:8080\ntimeout_secs: 12").unwrap();
        let cfg = ForgeApiConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://10.0.0.7:8080/");
        assert_eq!(cfg.timeout_secs, 12);
    }

    #[test]
    fn yaml_file_with_missing_keys_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: 3").unwrap();
        let cfg = ForgeApiConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, 3);
    }

    #[test]
    fn yaml_file_zero_timeout_keeps_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: 0").unwrap();
        let cfg = ForgeApiConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn yaml_file_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://x").unwrap();
        assert!(matches!(
            ForgeApiConfig::from_yaml_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ForgeApiConfig::from_yaml_file(&dir.path().join("absent.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
