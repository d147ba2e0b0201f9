//! Markdown rendering for patient progress reports.

use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Write};

use crate::model::PatientSummary;

/// Render a patient summary as a printable Markdown progress report.
///
/// The report mirrors the clinic's handout layout: clinic header, patient
/// information, summary statistics, per-phoneme detail rows, recent practice
/// sessions, and a confidentiality footer stamped with the generation year.
#[must_use]
pub fn render_progress_report(summary: &PatientSummary, generated_on: NaiveDate) -> String {
    let mut out = String::with_capacity(2048);
    // Writing to a String cannot fail.
    write_report(&mut out, summary, generated_on).expect("write to String");
    out
}

fn write_report(
    out: &mut String,
    summary: &PatientSummary,
    generated_on: NaiveDate,
) -> fmt::Result {
    write_header(out, generated_on)?;
    write_patient(out, summary)?;
    write_statistics(out, summary)?;
    write_phonemes(out, summary)?;
    write_sessions(out, summary)?;
    write_footer(out, generated_on)
}

fn write_header(out: &mut String, generated_on: NaiveDate) -> fmt::Result {
    writeln!(out, "# Speech Therapy Clinic")?;
    writeln!(out)?;
    writeln!(out, "## Patient Progress Report")?;
    writeln!(out)?;
    writeln!(out, "Generated on: {}", generated_on.format("%B %-d, %Y"))?;
    writeln!(out)
}

fn write_patient(out: &mut String, summary: &PatientSummary) -> fmt::Result {
    let patient = &summary.patient;
    writeln!(out, "## Patient Information")?;
    writeln!(out)?;
    writeln!(out, "- Name: {}", patient.full_name)?;
    writeln!(out, "- Patient ID: {}", patient.patient_id)?;
    writeln!(out, "- Gender: {}", patient.gender)?;
    writeln!(out, "- First Visit: {}", patient.first_clinic_date)?;
    writeln!(out)
}

fn write_statistics(out: &mut String, summary: &PatientSummary) -> fmt::Result {
    let stats = &summary.statistics;
    writeln!(out, "## Summary Statistics")?;
    writeln!(out)?;
    writeln!(out, "- Mastered Phonemes: {}", stats.completed_phonemes)?;
    writeln!(out, "- In Progress: {}", stats.in_progress_phonemes)?;
    writeln!(out, "- Average Accuracy: {}%", stats.average_accuracy)?;
    writeln!(out)
}

fn write_phonemes(out: &mut String, summary: &PatientSummary) -> fmt::Result {
    writeln!(out, "## Phoneme Progress Details")?;
    writeln!(out)?;
    for phoneme in &summary.phoneme_progress {
        writeln!(
            out,
            "- **{}** [{}] {}% (examples: {})",
            phoneme.phoneme,
            phoneme.status.label(),
            phoneme.accuracy,
            phoneme.example_words.join(", ")
        )?;
        if let Some(last_practiced) = &phoneme.last_practiced {
            writeln!(out, "  - Last practiced: {last_practiced}")?;
        }
    }
    writeln!(out)
}

fn write_sessions(out: &mut String, summary: &PatientSummary) -> fmt::Result {
    writeln!(out, "## Recent Practice Sessions")?;
    writeln!(out)?;
    for session in &summary.recent_sessions {
        writeln!(
            out,
            "- **{}**: {} - {} ({} words, {}%)",
            session.date,
            session.duration,
            session.phonemes_practiced.join(", "),
            session.words_attempted,
            session.accuracy
        )?;
    }
    writeln!(out)
}

fn write_footer(out: &mut String, generated_on: NaiveDate) -> fmt::Result {
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(
        out,
        "This report is confidential and intended only for medical purposes."
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "© {} Speech Therapy Clinic. All rights reserved.",
        generated_on.year()
    )
}
