use thiserror::Error;

use crate::model::ParseIdError;
use crate::progress::ParseGrainError;
use crate::progress::TrialDataError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TrialData(#[from] TrialDataError),
    #[error(transparent)]
    Grain(#[from] ParseGrainError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
