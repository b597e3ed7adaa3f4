use std::sync::Arc;

use crate::error::Result;
use crate::services::encyclopedia_service::Encyclopedia;
use crate::services::generative_service::TextGenerator;

pub const FALLBACK_SENTENCES: u32 = 2;

pub const GENERATOR_ERROR_MESSAGE: &str = "Error querying Gemini. Please try again later.";
pub const NO_FALLBACK_CONTENT_MESSAGE: &str = "No content found in Wikipedia for this doubt.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Error resolving doubt. Please try again later.";

#[derive(Clone)]
pub struct DoubtService {
    encyclopedia: Arc<dyn Encyclopedia>,
    generator: Arc<dyn TextGenerator>,
}

impl DoubtService {
    pub fn new(encyclopedia: Arc<dyn Encyclopedia>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            encyclopedia,
            generator,
        }
    }

    /// Asks the generator first and only consults the encyclopedia when the
    /// generator answered with nothing.
    ///
    /// A failed generator call still yields a non-empty error message, so the
    /// encyclopedia is never reached on failure.
    pub async fn resolve(&self, doubt: &str) -> String {
        let answer = self.ask(doubt).await;
        if !answer.is_empty() {
            return answer;
        }
        tracing::info!("Generator returned an empty answer, falling back to Wikipedia");
        self.fallback(doubt).await
    }

    pub async fn ask(&self, doubt: &str) -> String {
        match self.generator.generate(doubt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error querying Gemini: {}", e);
                GENERATOR_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub async fn fallback(&self, doubt: &str) -> String {
        match self.summarize(doubt).await {
            Ok(Some(summary)) => summary,
            Ok(None) => NO_FALLBACK_CONTENT_MESSAGE.to_string(),
            Err(e) => {
                tracing::error!(doubt = %doubt, "Error querying Wikipedia: {}", e);
                FALLBACK_ERROR_MESSAGE.to_string()
            }
        }
    }

    async fn summarize(&self, doubt: &str) -> Result<Option<String>> {
        let hits = self.encyclopedia.search(doubt).await?;
        let Some(first) = hits.first() else {
            return Ok(None);
        };
        let page = self.encyclopedia.page(first).await?;
        let summary = self
            .encyclopedia
            .summary(&page.title, FALLBACK_SENTENCES)
            .await?;
        Ok(Some(summary))
    }
}
