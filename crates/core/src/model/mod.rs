mod chapter;
mod ids;
mod month;
mod patient;
mod summary;
mod trial;
mod user;

pub use ids::{ChapterNumber, ParseIdError, PatientId};
pub use month::Month;

pub use chapter::{Chapter, ChapterWords};
pub use patient::{Gender, ParseGenderError, Patient, PatientDraft};
pub use summary::{
    PatientStatistics, PatientSummary, PhonemeProgress, PhonemeStatus, RecentSession,
};
pub use trial::{SessionHistorySubmission, Trial, TrialSubmission};
pub use user::{Credentials, Registration, TokenPair, UserProfile};
