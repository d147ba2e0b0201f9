use std::env;
use url::Url;

use crate::error::ApiError;

/// Base URL of the local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Connection settings for the clinic backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Read connection settings from `CLINIC_API_URL` and `CLINIC_API_TOKEN`.
    ///
    /// A missing or blank URL falls back to [`DEFAULT_BASE_URL`]; a missing or
    /// blank token leaves the client unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if `CLINIC_API_URL` is set but does
    /// not parse as a URL.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::resolve(
            env::var("CLINIC_API_URL").ok(),
            env::var("CLINIC_API_TOKEN").ok(),
        )
    }

    fn resolve(base_url: Option<String>, token: Option<String>) -> Result<Self, ApiError> {
        let base_url = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if Url::parse(&base_url).is_err() {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }
        let token = token.filter(|token| !token.trim().is_empty());
        Ok(Self { base_url, token })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Join an endpoint path onto the base URL. Paths start with `/` and the
    /// base keeps any `/api` prefix, so joining is plain concatenation.
    #[must_use]
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_concatenates_base_and_path() {
        let config = ApiConfig::new("http://localhost:8000/api");
        assert_eq!(
            config.endpoint("/patients/"),
            "http://localhost:8000/api/patients/"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_on_base() {
        let config = ApiConfig::new("https://clinic.example/api/");
        assert_eq!(
            config.endpoint("/chapters/3/words/"),
            "https://clinic.example/api/chapters/3/words/"
        );
    }

    #[test]
    fn with_token_sets_the_bearer_token() {
        let config = ApiConfig::default().with_token("abc123");
        assert_eq!(config.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn resolve_falls_back_to_the_default_url() {
        let config = ApiConfig::resolve(None, None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
    }

    #[test]
    fn resolve_rejects_an_unparsable_url() {
        let err = ApiConfig::resolve(Some("not a url".to_string()), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(url) if url == "not a url"));
    }

    #[test]
    fn blank_settings_count_as_unset() {
        let config =
            ApiConfig::resolve(Some("   ".to_string()), Some("  ".to_string())).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token, None);
    }
}
