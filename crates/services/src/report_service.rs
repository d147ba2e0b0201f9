use std::sync::Arc;
use tracing::info;

use api::ProgressBackend;
use clinic_core::model::PatientId;
use clinic_core::render_progress_report;

use crate::Clock;
use crate::error::ReportError;

/// Renders printable Markdown progress reports.
///
/// Owns the time source so the generation date and footer year stay
/// deterministic under test.
#[derive(Clone)]
pub struct ReportService {
    clock: Clock,
    backend: Arc<dyn ProgressBackend>,
}

impl ReportService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn ProgressBackend>) -> Self {
        Self { clock, backend }
    }

    /// Fetch a patient's summary and render it as Markdown.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Backend` if the summary cannot be fetched.
    pub async fn render(&self, patient: &PatientId) -> Result<String, ReportError> {
        let summary = self.backend.patient_summary(patient).await?;
        let generated_on = self.clock.today();
        info!(%patient, %generated_on, "rendering progress report");
        Ok(render_progress_report(&summary, generated_on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiError, InMemoryBackend};
    use chrono::NaiveDate;
    use clinic_core::model::{Gender, Patient, PatientStatistics, PatientSummary};
    use clinic_core::time::fixed_clock;

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
    async fn report_is_stamped_with_the_clock_date() {
        let backend = InMemoryBackend::new();
        backend.insert_summary(build_summary("P-1042")).unwrap();
        let service = ReportService::new(fixed_clock(), Arc::new(backend));

        let report = service.render(&PatientId::new("P-1042")).await.unwrap();

        assert!(report.contains("Generated on: November 14, 2023"));
        assert!(report.contains("- Name: Sarah Johnson"));
        assert!(report.contains("© 2023 Speech Therapy Clinic. All rights reserved."));
    }

    #[tokio::test]
    async fn missing_patient_is_a_backend_error() {
        let service = ReportService::new(fixed_clock(), Arc::new(InMemoryBackend::new()));

        let err = service.render(&PatientId::new("P-9999")).await.unwrap_err();
        assert!(matches!(err, ReportError::Backend(ApiError::NotFound)));
    }
}
