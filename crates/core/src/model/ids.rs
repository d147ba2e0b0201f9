use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinic-assigned identifier for a Patient.
///
/// This is the code the clinic registers a patient under (for example
/// `"P-1042"`), not a database row id. The backend addresses patients by
/// this value in every URL.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new `PatientId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Number of a phoneme Chapter (1-based)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterNumber(u32);

impl ChapterNumber {
    /// Creates a new `ChapterNumber`
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatientId({})", self.0)
    }
}

impl fmt::Debug for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChapterNumber({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an identifier from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for PatientId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                kind: "PatientId".to_string(),
            });
        }
        Ok(PatientId::new(trimmed))
    }
}

impl FromStr for ChapterNumber {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(ChapterNumber::new)
            .map_err(|_| ParseIdError {
                kind: "ChapterNumber".to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_display() {
        let id = PatientId::new("P-1042");
        assert_eq!(id.to_string(), "P-1042");
    }

    #[test]
    fn test_patient_id_from_str_trims() {
        let id: PatientId = " P-7 ".parse().unwrap();
        assert_eq!(id, PatientId::new("P-7"));
    }

    #[test]
    fn test_patient_id_from_str_rejects_empty() {
        let result = "   ".parse::<PatientId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_chapter_number_display() {
        let number = ChapterNumber::new(3);
        assert_eq!(number.to_string(), "3");
    }

    #[test]
    fn test_chapter_number_from_str() {
        let number: ChapterNumber = "12".parse().unwrap();
        assert_eq!(number, ChapterNumber::new(12));
    }

    #[test]
    fn test_chapter_number_from_str_invalid() {
        let result = "three".parse::<ChapterNumber>();
        assert!(result.is_err());
    }

    #[test]
    fn test_id_roundtrip() {
        let original = PatientId::new("P-55");
        let serialized = original.to_string();
        let deserialized: PatientId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }
}
