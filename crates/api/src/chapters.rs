use clinic_core::model::{Chapter, ChapterNumber, ChapterWords};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// The full phoneme curriculum, one chapter per phoneme.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend cannot be reached.
    pub async fn chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        self.get("/chapters/").await
    }

    /// One chapter by number.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the chapter does not exist.
    pub async fn chapter(&self, number: ChapterNumber) -> Result<Chapter, ApiError> {
        self.get(&format!("/chapters/{number}/")).await
    }

    /// Practice words of a chapter, served by the curriculum route.
    ///
    /// The progress route serves the same shape through
    /// [`ApiClient::chapter_words`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the chapter does not exist.
    pub async fn chapter_word_list(&self, number: ChapterNumber) -> Result<ChapterWords, ApiError> {
        self.get(&format!("/chapters/{number}/words/")).await
    }
}
