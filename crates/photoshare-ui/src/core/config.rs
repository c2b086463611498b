//! Backend configuration baked in at build time.
//!
//! # Design
//! - Values come from `option_env!` so the wasm bundle needs no runtime config.
//! - Validation happens once at startup; a bad value renders an error page.

use thiserror::Error;
use url::Url;

/// Default storage bucket for photo objects.
pub const DEFAULT_BUCKET: &str = "photos";

/// Configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `PHOTOSHARE_BACKEND_URL` was not set at build time.
    #[error("PHOTOSHARE_BACKEND_URL is not set")]
    MissingUrl,
    /// `PHOTOSHARE_BACKEND_ANON_KEY` was not set at build time.
    #[error("PHOTOSHARE_BACKEND_ANON_KEY is not set")]
    MissingAnonKey,
    /// The backend URL could not be parsed.
    #[error("invalid backend url `{value}`: {reason}")]
    InvalidUrl {
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// The backend URL is not http(s).
    #[error("backend url must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

/// Hosted backend coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    /// Public anonymous API key sent as `apikey`.
    pub anon_key: String,
    /// Storage bucket holding photo objects.
    pub bucket: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl BackendConfig {
    /// Configuration from the build environment.
    ///
    /// # Errors
    ///
    /// See [`BackendConfig::from_parts`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            option_env!("PHOTOSHARE_BACKEND_URL"),
            option_env!("PHOTOSHARE_BACKEND_ANON_KEY"),
            option_env!("PHOTOSHARE_STORAGE_BUCKET"),
        )
    }

    /// Validate raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL or key is missing or the URL is not
    /// an absolute http(s) URL.
    pub fn from_parts(
        url: Option<&str>,
        anon_key: Option<&str>,
        bucket: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let raw_url = non_blank(url).ok_or(ConfigError::MissingUrl)?;
        let anon_key = non_blank(anon_key).ok_or(ConfigError::MissingAnonKey)?;
        let parsed = Url::parse(raw_url).map_err(|err| ConfigError::InvalidUrl {
            value: raw_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            bucket: non_blank(bucket).unwrap_or(DEFAULT_BUCKET).to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path starting with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Public URL of the object at `owner/file_name`.
    #[must_use]
    pub fn public_object_url(&self, owner: &str, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            crate::core::logic::object_key(owner, file_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_reported() {
        assert_eq!(
            BackendConfig::from_parts(None, Some("k"), None),
            Err(ConfigError::MissingUrl)
        );
        assert_eq!(
            BackendConfig::from_parts(Some("https://x.test"), Some("  "), None),
            Err(ConfigError::MissingAnonKey)
        );
    }

    #[test]
    fn url_is_validated() {
        assert!(matches!(
            BackendConfig::from_parts(Some("not a url"), Some("k"), None),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert_eq!(
            BackendConfig::from_parts(Some("ftp://x.test"), Some("k"), None),
            Err(ConfigError::UnsupportedScheme("ftp".into()))
        );
    }

    #[test]
    fn public_url_uses_bucket_and_owner_folder() {
        let config =
            BackendConfig::from_parts(Some("https://abc.example.co/"), Some("key"), None).expect("config");
        assert_eq!(config.base_url(), "https://abc.example.co");
        assert_eq!(
            config.public_object_url("u1", "f.jpg"),
            "https://abc.example.co/storage/v1/object/public/photos/u1/f.jpg"
        );
        assert_eq!(
            config.endpoint("/rest/v1/photos"),
            "https://abc.example.co/rest/v1/photos"
        );

        let custom = BackendConfig::from_parts(Some("http://localhost:54321"), Some("key"), Some("media"))
            .expect("config");
        assert_eq!(custom.bucket, "media");
    }
}
