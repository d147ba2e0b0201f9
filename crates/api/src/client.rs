use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client for the clinic backend.
///
/// Cheap to clone. The bearer token is part of the configuration, so an
/// authenticated session is a new client from [`ApiClient::with_token`]
/// rather than mutation of a shared one.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client from [`ApiConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the configured URL does not
    /// parse.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// A copy of this client that sends `Authorization: Bearer {token}`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.with_token(token);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check(&self, method: &str, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(method, path, "clinic backend has no such resource");
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            warn!(method, path, %status, "clinic backend request failed");
            return Err(ApiError::Status(status));
        }
        debug!(method, path, %status, "clinic backend request");
        Ok(response)
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.apply_auth(self.client.get(self.config.endpoint(path)));
        let response = self.check("GET", path, request.send().await?)?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.apply_auth(self.client.get(self.config.endpoint(path)).query(query));
        let response = self.check("GET", path, request.send().await?)?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.apply_auth(self.client.post(self.config.endpoint(path)).json(body));
        let response = self.check("POST", path, request.send().await?)?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// POST where the response body is not used, only the status.
    pub(crate) async fn post_discard<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.apply_auth(self.client.post(self.config.endpoint(path)).json(body));
        self.check("POST", path, request.send().await?)?;
        Ok(())
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.apply_auth(self.client.put(self.config.endpoint(path)).json(body));
        let response = self.check("PUT", path, request.send().await?)?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.apply_auth(self.client.delete(self.config.endpoint(path)));
        self.check("DELETE", path, request.send().await?)?;
        Ok(())
    }
}
