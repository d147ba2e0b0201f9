use clinic_core::model::{Credentials, Registration, TokenPair, UserProfile};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Create a clinician account and return its profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the registration.
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        self.post("/users/register/", registration).await
    }

    /// Exchange credentials for an access/refresh token pair.
    ///
    /// Tokens live in memory only. Pass the access token to
    /// [`ApiClient::with_token`] to make authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the credentials are rejected or the backend
    /// cannot be reached.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.post("/users/login/", credentials).await
    }

    /// Profile of the clinician the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the token is missing or expired.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/users/profile/").await
    }
}
