use serde::{Deserialize, Serialize};

use crate::model::ids::{ChapterNumber, PatientId};

/// One scored practice attempt, exactly as the backend reports it.
///
/// `month` stays a plain string at this boundary; the aggregator validates
/// it against [`Month`](crate::model::Month) and rejects anything it does
/// not recognize. `date` is the day of the month and is not calendar
/// checked: out-of-range days roll across month boundaries when a concrete
/// date is needed, the same way the recording surface produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub year: i32,
    pub month: String,
    pub date: i64,
    pub accuracy: u32,
}

/// Body for recording one scored trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSubmission {
    pub patient_id: PatientId,
    pub chapter: ChapterNumber,
    pub word: String,
    pub year: i32,
    pub month: String,
    pub date: i64,
    pub accuracy: u32,
}

/// Body for recording a completed practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistorySubmission {
    pub patient_id: PatientId,
    pub date: String,
    pub duration: String,
    #[serde(rename = "phonemesPracticed")]
    pub phonemes_practiced: Vec<String>,
    #[serde(rename = "wordsAttempted")]
    pub words_attempted: u32,
    pub accuracy: u32,
}
