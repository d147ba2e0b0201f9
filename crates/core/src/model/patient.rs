use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::PatientId;

/// A registered patient as returned by the roster endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub full_name: String,
    pub patient_id: PatientId,
    pub gender: Gender,
    pub first_clinic_date: NaiveDate,
}

/// Payload for creating or updating a patient.
///
/// `first_clinic_date` is set on registration and omitted on updates, which
/// is why it is optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub full_name: String,
    pub patient_id: PatientId,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_clinic_date: Option<NaiveDate>,
}

/// Patient gender, spelled the way the intake form records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a gender string is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized gender {provided:?}, expected \"Male\" or \"Female\"")]
pub struct ParseGenderError {
    provided: String,
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ParseGenderError {
                provided: s.to_string(),
            }),
        }
    }
}
