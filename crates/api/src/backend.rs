use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use clinic_core::model::{ChapterNumber, ChapterWords, PatientId, PatientSummary, Trial};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Data-access contract for the progress views.
///
/// The HTTP client implements it against the clinic backend;
/// [`InMemoryBackend`] implements it for tests and offline work.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Word list for a chapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the chapter does not exist, or other
    /// backend errors.
    async fn chapter_words(&self, chapter: ChapterNumber) -> Result<ChapterWords, ApiError>;

    /// Practice trials for one word of one patient's chapter, in the order
    /// the backend recorded them. A word with no history yields an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached.
    async fn word_trials(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
    ) -> Result<Vec<Trial>, ApiError>;

    /// Full progress summary for a patient.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no patient carries that code, or
    /// other backend errors.
    async fn patient_summary(&self, patient: &PatientId) -> Result<PatientSummary, ApiError>;
}

#[async_trait]
impl ProgressBackend for ApiClient {
    async fn chapter_words(&self, chapter: ChapterNumber) -> Result<ChapterWords, ApiError> {
        ApiClient::chapter_words(self, chapter).await
    }

    async fn word_trials(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
    ) -> Result<Vec<Trial>, ApiError> {
        ApiClient::word_trials(self, patient, chapter, word).await
    }

    async fn patient_summary(&self, patient: &PatientId) -> Result<PatientSummary, ApiError> {
        ApiClient::patient_summary(self, patient).await
    }
}

/// Simple in-memory backend implementation for testing and offline work.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    words: Arc<Mutex<HashMap<ChapterNumber, ChapterWords>>>,
    trials: Arc<Mutex<HashMap<(PatientId, ChapterNumber, String), Vec<Trial>>>>,
    summaries: Arc<Mutex<HashMap<PatientId, PatientSummary>>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: Arc::new(Mutex::new(HashMap::new())),
            trials: Arc::new(Mutex::new(HashMap::new())),
            summaries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed the word list of a chapter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn insert_chapter_words(
        &self,
        chapter: ChapterNumber,
        words: ChapterWords,
    ) -> Result<(), ApiError> {
        let mut guard = self
            .words
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.insert(chapter, words);
        Ok(())
    }

    /// Seed the trial history of one word.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn insert_trials(
        &self,
        patient: PatientId,
        chapter: ChapterNumber,
        word: impl Into<String>,
        trials: Vec<Trial>,
    ) -> Result<(), ApiError> {
        let mut guard = self
            .trials
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.insert((patient, chapter, word.into()), trials);
        Ok(())
    }

    /// Seed a patient's summary, keyed by the clinic code it carries.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store is poisoned.
    pub fn insert_summary(&self, summary: PatientSummary) -> Result<(), ApiError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.insert(summary.patient.patient_id.clone(), summary);
        Ok(())
    }
}

#[async_trait]
impl ProgressBackend for InMemoryBackend {
    async fn chapter_words(&self, chapter: ChapterNumber) -> Result<ChapterWords, ApiError> {
        let guard = self
            .words
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.get(&chapter).cloned().ok_or(ApiError::NotFound)
    }

    async fn word_trials(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
    ) -> Result<Vec<Trial>, ApiError> {
        let guard = self
            .trials
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        // No entry just means the word has not been practiced yet.
        Ok(guard
            .get(&(patient.clone(), chapter, word.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn patient_summary(&self, patient: &PatientId) -> Result<PatientSummary, ApiError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        guard.get(patient).cloned().ok_or(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinic_core::model::{Gender, Patient, PatientStatistics};

    fn build_trial(month: &str, date: i64, accuracy: u32) -> Trial {
        Trial {
            year: 2024,
            month: month.to_string(),
            date,
            accuracy,
        }
    }

    fn build_summary(code: &str) -> PatientSummary {
        PatientSummary {
            patient: Patient {
                full_name: "Sarah Johnson".to_string(),
                patient_id: PatientId::new(code),
                gender: Gender::Female,
                first_clinic_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            },
            statistics: PatientStatistics {
                completed_phonemes: 3,
                in_progress_phonemes: 2,
                average_accuracy: 82,
                total_sessions: 14,
            },
            phoneme_progress: Vec::new(),
            recent_sessions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn round_trips_chapter_words() {
        let backend = InMemoryBackend::new();
        let words = ChapterWords {
            phoneme: "/r/".to_string(),
            words: vec!["rabbit".to_string(), "red".to_string()],
        };
        backend
            .insert_chapter_words(ChapterNumber::new(3), words)
            .unwrap();

        let fetched = backend.chapter_words(ChapterNumber::new(3)).await.unwrap();
        assert_eq!(fetched.phoneme, "/r/");
        assert_eq!(fetched.words, ["rabbit", "red"]);
    }

    #[tokio::test]
    async fn missing_chapter_is_not_found() {
        let backend = InMemoryBackend::new();
        let err = backend
            .chapter_words(ChapterNumber::new(9))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unpracticed_word_has_no_trials() {
        let backend = InMemoryBackend::new();
        let trials = backend
            .word_trials(&PatientId::new("P-1042"), ChapterNumber::new(3), "rabbit")
            .await
            .unwrap();
        assert!(trials.is_empty());
    }

    #[tokio::test]
    async fn trials_keep_backend_order() {
        let backend = InMemoryBackend::new();
        let patient = PatientId::new("P-1042");
        backend
            .insert_trials(
                patient.clone(),
                ChapterNumber::new(3),
                "rabbit",
                vec![
                    build_trial("February", 2, 90),
                    build_trial("January", 5, 60),
                ],
            )
            .unwrap();

        let trials = backend
            .word_trials(&patient, ChapterNumber::new(3), "rabbit")
            .await
            .unwrap();
        assert_eq!(trials.len(), 2);
        assert_eq!(trials[0].month, "February");
        assert_eq!(trials[1].month, "January");
    }

    #[tokio::test]
    async fn round_trips_patient_summary() {
        let backend = InMemoryBackend::new();
        backend.insert_summary(build_summary("P-1042")).unwrap();

        let summary = backend
            .patient_summary(&PatientId::new("P-1042"))
            .await
            .unwrap();
        assert_eq!(summary.patient.full_name, "Sarah Johnson");
        assert_eq!(summary.statistics.total_sessions, 14);

        let err = backend
            .patient_summary(&PatientId::new("P-9999"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
