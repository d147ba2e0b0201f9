#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod progress;
pub mod report;
pub mod time;

pub use error::Error;
pub use time::Clock;

pub use model::{
    Chapter, ChapterNumber, ChapterWords, Credentials, Gender, Month, Patient, PatientDraft,
    PatientId, PatientStatistics, PatientSummary, PhonemeProgress, PhonemeStatus, RecentSession,
    Registration, SessionHistorySubmission, TokenPair, Trial, TrialSubmission, UserProfile,
};

pub use progress::{
    Aggregation, Grain, ParseGrainError, SeriesPoint, SummaryStatistics, TrialDataError, aggregate,
};

pub use report::render_progress_report;
