use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use api::{ApiError, ProgressBackend};
use clinic_core::model::{ChapterNumber, ChapterWords, PatientId, Trial};
use clinic_core::progress::{Aggregation, Grain, SeriesPoint, SummaryStatistics, aggregate};

use crate::error::WordProgressError;
use crate::sequencer::FetchSequencer;

/// Presentation-agnostic progress view for one word of a chapter.
///
/// Carries the aggregated series plus the chapter's word list so callers can
/// step between words without another chapter fetch.
#[derive(Debug, Clone, Serialize)]
pub struct WordProgress {
    pub patient: PatientId,
    pub chapter: ChapterNumber,
    pub word: String,
    pub phoneme: String,
    pub grain: Grain,
    pub points: Vec<SeriesPoint>,
    pub summary: Option<SummaryStatistics>,
    pub words: Vec<String>,
}

impl WordProgress {
    /// Whether the word has no recorded practice yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The word before this one in the chapter list, if any.
    #[must_use]
    pub fn previous_word(&self) -> Option<&str> {
        let position = self.words.iter().position(|w| w == &self.word)?;
        position.checked_sub(1).map(|i| self.words[i].as_str())
    }

    /// The word after this one in the chapter list, if any.
    #[must_use]
    pub fn next_word(&self) -> Option<&str> {
        let position = self.words.iter().position(|w| w == &self.word)?;
        self.words.get(position + 1).map(String::as_str)
    }
}

/// Loads and aggregates word progress behind a fetch sequencer.
///
/// `load` may race against itself: when the selection changes faster than
/// the backend answers, only the most recent call publishes a view.
pub struct WordProgressService {
    backend: Arc<dyn ProgressBackend>,
    sequencer: FetchSequencer,
}

impl WordProgressService {
    #[must_use]
    pub fn new(backend: Arc<dyn ProgressBackend>) -> Self {
        Self {
            backend,
            sequencer: FetchSequencer::new(),
        }
    }

    /// Load the progress view for one word at the given grain.
    ///
    /// Returns `Ok(None)` when a newer `load` superseded this one; a stale
    /// call's outcome, success or failure, belongs to an abandoned selection
    /// and is discarded.
    ///
    /// # Errors
    ///
    /// Returns `WordProgressError::Backend` if the backend fails, or
    /// `WordProgressError::TrialData` if the recorded trials cannot be
    /// aggregated.
    pub async fn load(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
        grain: Grain,
    ) -> Result<Option<WordProgress>, WordProgressError> {
        let ticket = self.sequencer.begin();
        let fetched = self.fetch(patient, chapter, word).await;
        if !self.sequencer.is_current(ticket) {
            debug!(%patient, %chapter, word, "discarding superseded progress fetch");
            return Ok(None);
        }

        let (chapter_words, trials) = fetched?;
        let Aggregation { points, summary } = aggregate(&trials, grain)?;
        Ok(Some(WordProgress {
            patient: patient.clone(),
            chapter,
            word: word.to_string(),
            phoneme: chapter_words.phoneme,
            grain,
            points,
            summary,
            words: chapter_words.words,
        }))
    }

    async fn fetch(
        &self,
        patient: &PatientId,
        chapter: ChapterNumber,
        word: &str,
    ) -> Result<(ChapterWords, Vec<Trial>), ApiError> {
        let chapter_words = self.backend.chapter_words(chapter).await?;
        let trials = self.backend.word_trials(patient, chapter, word).await?;
        Ok((chapter_words, trials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryBackend;
    use clinic_core::progress::TrialDataError;

    fn build_trial(month: &str, date: i64, accuracy: u32) -> Trial {
        Trial {
            year: 2024,
            month: month.to_string(),
            date,
            accuracy,
        }
    }

    fn seeded_backend() -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        backend
            .insert_chapter_words(
                ChapterNumber::new(3),
                ChapterWords {
                    phoneme: "/r/".to_string(),
                    words: vec![
                        "rabbit".to_string(),
                        "red".to_string(),
                        "run".to_string(),
                    ],
                },
            )
            .unwrap();
        backend
            .insert_trials(
                PatientId::new("P-1042"),
                ChapterNumber::new(3),
                "red",
                vec![
                    build_trial("January", 5, 60),
                    build_trial("January", 12, 80),
                    build_trial("February", 2, 90),
                ],
            )
            .unwrap();
        backend
    }

    fn service() -> WordProgressService {
        WordProgressService::new(Arc::new(seeded_backend()))
    }

    #[tokio::test]
    async fn load_aggregates_backend_trials() {
        let progress = service()
            .load(
                &PatientId::new("P-1042"),
                ChapterNumber::new(3),
                "red",
                Grain::Monthly,
            )
            .await
            .unwrap()
            .expect("load was not superseded");

        assert_eq!(progress.phoneme, "/r/");
        assert_eq!(progress.points.len(), 2);
        assert_eq!(progress.points[0].label, "January 2024");
        assert_eq!(progress.summary.unwrap().improvement, 30);
        assert_eq!(progress.words, ["rabbit", "red", "run"]);
    }

    #[tokio::test]
    async fn unpracticed_word_yields_an_empty_view() {
        let progress = service()
            .load(
                &PatientId::new("P-1042"),
                ChapterNumber::new(3),
                "rabbit",
                Grain::Weekly,
            )
            .await
            .unwrap()
            .expect("load was not superseded");

        assert!(progress.is_empty());
        assert!(progress.summary.is_none());
    }

    #[tokio::test]
    async fn missing_chapter_surfaces_not_found() {
        let err = service()
            .load(
                &PatientId::new("P-1042"),
                ChapterNumber::new(9),
                "red",
                Grain::Weekly,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WordProgressError::Backend(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn malformed_month_is_a_trial_data_error() {
        let backend = seeded_backend();
        backend
            .insert_trials(
                PatientId::new("P-1042"),
                ChapterNumber::new(3),
                "run",
                vec![build_trial("Janry", 5, 60)],
            )
            .unwrap();

        let err = WordProgressService::new(Arc::new(backend))
            .load(
                &PatientId::new("P-1042"),
                ChapterNumber::new(3),
                "run",
                Grain::Monthly,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WordProgressError::TrialData(TrialDataError::UnknownMonth { index: 0, .. })
        ));
    }

    #[test]
    fn word_navigation_walks_the_chapter_list() {
        let progress = WordProgress {
            patient: PatientId::new("P-1042"),
            chapter: ChapterNumber::new(3),
            word: "red".to_string(),
            phoneme: "/r/".to_string(),
            grain: Grain::Weekly,
            points: Vec::new(),
            summary: None,
            words: vec![
                "rabbit".to_string(),
                "red".to_string(),
                "run".to_string(),
            ],
        };

        assert_eq!(progress.previous_word(), Some("rabbit"));
        assert_eq!(progress.next_word(), Some("run"));
    }

    #[test]
    fn navigation_stops_at_the_ends() {
        let mut progress = WordProgress {
            patient: PatientId::new("P-1042"),
            chapter: ChapterNumber::new(3),
            word: "rabbit".to_string(),
            phoneme: "/r/".to_string(),
            grain: Grain::Weekly,
            points: Vec::new(),
            summary: None,
            words: vec!["rabbit".to_string(), "run".to_string()],
        };

        assert_eq!(progress.previous_word(), None);
        assert_eq!(progress.next_word(), Some("run"));

        progress.word = "run".to_string();
        assert_eq!(progress.next_word(), None);

        progress.word = "zebra".to_string();
        assert_eq!(progress.previous_word(), None);
        assert_eq!(progress.next_word(), None);
    }
}
