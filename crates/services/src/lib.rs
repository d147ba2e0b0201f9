#![forbid(unsafe_code)]

pub mod error;
pub mod progress_view;
pub mod report_service;
pub mod sequencer;

pub use clinic_core::Clock;

pub use error::{ReportError, WordProgressError};
pub use progress_view::{WordProgress, WordProgressService};
pub use report_service::ReportService;
pub use sequencer::{FetchSequencer, FetchTicket};
