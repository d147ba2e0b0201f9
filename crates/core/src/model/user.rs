use serde::{Deserialize, Serialize};

/// Sign-in payload. Clinicians sign in with their SLMC registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Account-creation payload.
///
/// The backend expects the password twice and uses the SLMC number as the
/// username, which [`Registration::new`] takes care of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub slmc_id: String,
    pub password: String,
    pub password2: String,
}

impl Registration {
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        slmc_id: impl Into<String>,
        password: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        let slmc_id = slmc_id.into();
        Self {
            username: slmc_id.clone(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            slmc_id,
            password: password.into(),
            password2: password2.into(),
        }
    }
}

/// Access and refresh tokens issued on sign-in.
///
/// Held in memory only; nothing here persists tokens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// The signed-in clinician's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserProfile {
    /// Name shown in the navigation bar, with the doctor title.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            return "Dr.".to_string();
        }
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}
