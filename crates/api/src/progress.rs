use serde::Deserialize;

use clinic_core::model::{
    ChapterNumber, ChapterWords, PatientId, PatientSummary, SessionHistorySubmission, Trial,
    TrialSubmission,
};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Full progress summary for a patient: statistics, per-phoneme detail,
    /// and recent sessions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no patient carries that code.
    pub async fn patient_summary(&self, patient: &PatientId) -> Result<PatientSummary, ApiError> {
        self.get(&format!("/progress/patient/{patient}/summary/"))
            .await
    }

    /// Word list for a chapter, served by the progress route.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the chapter does not exist.
    pub async fn chapter_words(&self, chapter: ChapterNumber) -> Result<ChapterWords, ApiError> {
        self.get(&format!("/progress/chapter/{chapter}/words/"))
            .await
    }

    /// Practice trials for one word of one patient's chapter, in the order
    /// the backend recorded them. A word with no history yields an empty
    /// list, whether the backend omits the field or sends an empty one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached.
    pub async fn word_trials(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
    ) -> Result<Vec<Trial>, ApiError> {
        let response: WordTrialsResponse = self
            .get(&format!(
                "/progress/patient/{patient}/chapter/{chapter}/word/{word}/"
            ))
            .await?;
        Ok(response.trials.unwrap_or_default())
    }

    /// Record one practice trial.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the submission.
    pub async fn submit_trial(&self, submission: &TrialSubmission) -> Result<(), ApiError> {
        self.post_discard("/progress/create/", submission).await
    }

    /// Record a completed practice session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the submission.
    pub async fn submit_session_history(
        &self,
        submission: &SessionHistorySubmission,
    ) -> Result<(), ApiError> {
        self.post_discard("/progress/session-history/create/", submission)
            .await
    }
}

#[derive(Debug, Deserialize)]
struct WordTrialsResponse {
    #[serde(default)]
    trials: Option<Vec<Trial>>,
}
