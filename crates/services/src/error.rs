//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;
use clinic_core::progress::TrialDataError;

/// Errors emitted by `WordProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordProgressError {
    #[error(transparent)]
    Backend(#[from] ApiError),
    #[error(transparent)]
    TrialData(#[from] TrialDataError),
}

/// Errors emitted by `ReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    #[error(transparent)]
    Backend(#[from] ApiError),
}
