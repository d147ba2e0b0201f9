#![forbid(unsafe_code)]

//! Client for the clinic's REST backend.
//!
//! [`ApiClient`] speaks the backend's JSON routes (auth, patients, chapters,
//! progress). The data-access seam the progress views depend on is the
//! [`ProgressBackend`] trait, implemented by the HTTP client and by
//! [`InMemoryBackend`] for tests and offline work.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;

mod auth;
mod chapters;
mod patients;
mod progress;

pub use backend::{InMemoryBackend, ProgressBackend};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
