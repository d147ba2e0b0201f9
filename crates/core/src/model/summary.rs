use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

use crate::model::ids::ChapterNumber;
use crate::model::patient::Patient;

//
// ─── PATIENT SUMMARY ───────────────────────────────────────────────────────────
//

/// Everything the patient dashboard shows, in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub patient: Patient,
    pub statistics: PatientStatistics,
    #[serde(rename = "phonemeProgress")]
    pub phoneme_progress: Vec<PhonemeProgress>,
    #[serde(rename = "recentSessions")]
    pub recent_sessions: Vec<RecentSession>,
}

/// Headline counters across the whole treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStatistics {
    pub completed_phonemes: u32,
    pub in_progress_phonemes: u32,
    pub average_accuracy: u32,
    pub total_sessions: u32,
}

/// Per-chapter mastery state.
///
/// `id` doubles as the chapter number the entry links to. The backend has
/// been seen sending it both as a number and as a numeric string, so
/// deserialization accepts either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeProgress {
    #[serde(deserialize_with = "lenient_chapter_number")]
    pub id: ChapterNumber,
    pub phoneme: String,
    #[serde(rename = "exampleWords")]
    pub example_words: Vec<String>,
    pub status: PhonemeStatus,
    pub accuracy: u32,
    pub progress: u32,
    #[serde(rename = "lastPracticed", default, skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<String>,
}

/// One row of the recent-sessions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSession {
    pub date: String,
    pub duration: String,
    #[serde(rename = "phonemesPracticed")]
    pub phonemes_practiced: Vec<String>,
    #[serde(rename = "wordsAttempted")]
    pub words_attempted: u32,
    pub accuracy: u32,
}

//
// ─── PHONEME STATUS ────────────────────────────────────────────────────────────
//

/// Mastery state of one phoneme chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhonemeStatus {
    Completed,
    InProgress,
    NotStarted,
}

impl PhonemeStatus {
    /// The wire spelling, as the backend sends it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PhonemeStatus::Completed => "completed",
            PhonemeStatus::InProgress => "in-progress",
            PhonemeStatus::NotStarted => "not-started",
        }
    }

    /// Human-readable spelling for reports and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PhonemeStatus::Completed => "completed",
            PhonemeStatus::InProgress => "in progress",
            PhonemeStatus::NotStarted => "not started",
        }
    }
}

impl fmt::Display for PhonemeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lenient_chapter_number<'de, D>(deserializer: D) -> Result<ChapterNumber, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(ChapterNumber::new(value)),
        NumberOrString::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_json() -> &'static str {
        r#"{
            "patient": {
                "full_name": "Alex Lee",
                "patient_id": "P-1042",
                "gender": "Male",
                "first_clinic_date": "2023-09-04"
            },
            "statistics": {
                "completed_phonemes": 2,
                "in_progress_phonemes": 1,
                "average_accuracy": 78,
                "total_sessions": 14
            },
            "phonemeProgress": [
                {
                    "id": "3",
                    "phoneme": "/r/",
                    "exampleWords": ["red", "rain"],
                    "status": "in-progress",
                    "accuracy": 72,
                    "progress": 60,
                    "lastPracticed": "2024-02-12"
                },
                {
                    "id": 1,
                    "phoneme": "/s/",
                    "exampleWords": ["sun"],
                    "status": "completed",
                    "accuracy": 91,
                    "progress": 100
                }
            ],
            "recentSessions": [
                {
                    "date": "2024-02-12",
                    "duration": "30 min",
                    "phonemesPracticed": ["/r/", "/s/"],
                    "wordsAttempted": 18,
                    "accuracy": 76
                }
            ]
        }"#
    }

    #[test]
    fn summary_deserializes_dashboard_payload() {
        let summary: PatientSummary = serde_json::from_str(summary_json()).unwrap();

        assert_eq!(summary.patient.full_name, "Alex Lee");
        assert_eq!(summary.statistics.total_sessions, 14);
        assert_eq!(summary.phoneme_progress.len(), 2);
        assert_eq!(summary.recent_sessions[0].words_attempted, 18);
    }

    #[test]
    fn phoneme_id_accepts_number_or_numeric_string() {
        let summary: PatientSummary = serde_json::from_str(summary_json()).unwrap();

        assert_eq!(summary.phoneme_progress[0].id, ChapterNumber::new(3));
        assert_eq!(summary.phoneme_progress[1].id, ChapterNumber::new(1));
    }

    #[test]
    fn missing_last_practiced_is_none() {
        let summary: PatientSummary = serde_json::from_str(summary_json()).unwrap();

        assert_eq!(
            summary.phoneme_progress[0].last_practiced.as_deref(),
            Some("2024-02-12")
        );
        assert_eq!(summary.phoneme_progress[1].last_practiced, None);
    }

    #[test]
    fn status_labels_drop_the_hyphen() {
        assert_eq!(PhonemeStatus::InProgress.label(), "in progress");
        assert_eq!(PhonemeStatus::NotStarted.as_str(), "not-started");
    }

    #[test]
    fn non_numeric_phoneme_id_is_rejected() {
        let json = r#"{
            "id": "three",
            "phoneme": "/r/",
            "exampleWords": [],
            "status": "not-started",
            "accuracy": 0,
            "progress": 0
        }"#;

        let result: Result<PhonemeProgress, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
