use clinic_core::model::{Patient, PatientDraft, PatientId};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Every patient registered at the clinic.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached.
    pub async fn patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get("/patients/").await
    }

    /// One patient by clinic code.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no patient carries that code.
    pub async fn patient(&self, id: &PatientId) -> Result<Patient, ApiError> {
        self.get(&format!("/patients/{id}/")).await
    }

    /// Register a new patient.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the draft.
    pub async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        self.post("/patients/", draft).await
    }

    /// Replace a patient's details. Drafts for updates leave
    /// `first_clinic_date` unset so the original first visit is kept.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no patient carries that code.
    pub async fn update_patient(
        &self,
        id: &PatientId,
        draft: &PatientDraft,
    ) -> Result<Patient, ApiError> {
        self.put(&format!("/patients/{id}/"), draft).await
    }

    /// Remove a patient and their practice history.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no patient carries that code.
    pub async fn delete_patient(&self, id: &PatientId) -> Result<(), ApiError> {
        self.delete(&format!("/patients/{id}/")).await
    }

    /// Patients whose name or code matches `query`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached.
    pub async fn search_patients(&self, query: &str) -> Result<Vec<Patient>, ApiError> {
        self.get_with_query("/patients/search/", &[("query", query)])
            .await
    }
}
