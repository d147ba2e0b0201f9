use serde::{Deserialize, Serialize};

use crate::model::ids::ChapterNumber;

/// One phoneme chapter from the curriculum listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterNumber,
    pub phoneme: String,
}

/// The practice word set for one chapter.
///
/// Served both by the curriculum (`/chapters/{n}/words/`) and the progress
/// (`/progress/chapter/{n}/words/`) routes with the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterWords {
    pub phoneme: String,
    pub words: Vec<String>,
}
