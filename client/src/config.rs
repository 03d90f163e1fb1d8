//! Client settings loaded via OrthoConfig.
//!
//! Values come from `COMPLAINTS_*` environment variables or a configuration
//! file; the CLI may override the API base URL afterwards.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const PROGRAM_NAME: &str = "complaint-desk";

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The layered configuration could not be read.
    #[error("failed to load configuration: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// A configured URL is unusable as an HTTP base.
    #[error("invalid {setting} `{value}`: {reason}")]
    InvalidUrl {
        /// Setting name.
        setting: &'static str,
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Configuration values for reaching the backend.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPLAINTS")]
pub struct ClientSettings {
    /// Root of the REST API, e.g. `http://localhost:8080/api`.
    pub api_base_url: Option<String>,
    /// Host that serves uploaded attachments. Defaults to the API origin.
    pub asset_base_url: Option<String>,
}

impl ClientSettings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_layered() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Replace the API base URL when `value` is provided.
    #[must_use]
    pub fn with_api_base_url(mut self, value: Option<String>) -> Self {
        if value.is_some() {
            self.api_base_url = value;
        }
        self
    }

    /// Parsed API base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for unparsable or non-HTTP URLs.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        parse_http_url("api_base_url", raw)
    }

    /// Parsed asset base URL, falling back to the API origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for unparsable or non-HTTP URLs.
    pub fn asset_base_url(&self) -> Result<Url, ConfigError> {
        if let Some(raw) = self.asset_base_url.as_deref() {
            return parse_http_url("asset_base_url", raw);
        }
        let api = self.api_base_url()?;
        parse_http_url("asset_base_url", &api.origin().ascii_serialization())
    }
}

fn parse_http_url(setting: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        setting,
        value: raw.to_owned(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_owned()));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and fallbacks.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    fn defaults_point_at_the_local_backend() {
        let _guard = lock_env([
            ("COMPLAINTS_API_BASE_URL", None::<String>),
            ("COMPLAINTS_ASSET_BASE_URL", None::<String>),
        ]);

        let settings = ClientSettings::load_layered().expect("config should load");

        assert_eq!(
            settings.api_base_url().expect("api url").as_str(),
            "http://localhost:8080/api"
        );
        assert_eq!(
            settings.asset_base_url().expect("asset url").as_str(),
            "http://localhost:8080/"
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "COMPLAINTS_API_BASE_URL",
                Some("https://hostel.example/backend/api".to_owned()),
            ),
            (
                "COMPLAINTS_ASSET_BASE_URL",
                Some("https://files.hostel.example".to_owned()),
            ),
        ]);

        let settings = ClientSettings::load_layered().expect("config should load");

        assert_eq!(
            settings.api_base_url().expect("api url").as_str(),
            "https://hostel.example/backend/api"
        );
        assert_eq!(
            settings.asset_base_url().expect("asset url").as_str(),
            "https://files.hostel.example/"
        );
    }

    #[test]
    fn asset_host_follows_an_overridden_api_origin() {
        let settings = ClientSettings::default()
            .with_api_base_url(Some("http://10.0.0.5:9000/api".to_owned()));
        assert_eq!(
            settings.asset_base_url().expect("asset url").as_str(),
            "http://10.0.0.5:9000/"
        );
    }

    #[test]
    fn cli_override_is_ignored_when_absent() {
        let settings = ClientSettings {
            api_base_url: Some("http://backend:8080/api".to_owned()),
            asset_base_url: None,
        }
        .with_api_base_url(None);
        assert_eq!(
            settings.api_base_url.as_deref(),
            Some("http://backend:8080/api")
        );
    }

    #[rstest]
    #[case("ftp://files.example/api")]
    #[case("not a url")]
    #[case("mailto:warden@example.com")]
    fn rejects_unusable_urls(#[case] raw: &str) {
        let settings = ClientSettings::default().with_api_base_url(Some(raw.to_owned()));
        assert!(matches!(
            settings.api_base_url(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
