use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, UpstreamErrorKind};
use crate::models::quiz::{QuizOption, QuizQuestion, OPTION_LABELS};
use crate::services::encyclopedia_service::Encyclopedia;
use crate::services::generative_service::TextGenerator;

pub const SUMMARY_SENTENCES: u32 = 5;
pub const MIN_SENTENCES: usize = 2;

pub const NO_CONTENT_MESSAGE: &str =
    "No content available for this query. Please try a different topic.";
pub const NOT_ENOUGH_CONTENT_MESSAGE: &str = "Not enough content to generate options.";
pub const DISAMBIGUATION_MESSAGE: &str =
    "Disambiguation error. Please be more specific in your query.";
pub const PAGE_NOT_FOUND_MESSAGE: &str = "Page not found. Please try a different topic.";
pub const GENERIC_ERROR_MESSAGE: &str = "Error fetching question. Please try again later.";
pub const PLACEHOLDER_OPTION: &str = "Not enough relevant options available.";

#[derive(Clone)]
pub struct QuizService {
    encyclopedia: Arc<dyn Encyclopedia>,
    generator: Arc<dyn TextGenerator>,
}

impl QuizService {
    pub fn new(encyclopedia: Arc<dyn Encyclopedia>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            encyclopedia,
            generator,
        }
    }

    /// Builds a multiple-choice question about the first article matching
    /// the inputs. Failures come back as a message-only question.
    pub async fn generate_question(
        &self,
        subject: &str,
        syllabus: &str,
        grade: &str,
        difficulty: &str,
    ) -> QuizQuestion {
        let query = format!("{} {} {}", subject, syllabus, grade);
        tracing::info!(query = %query, difficulty = %difficulty, "Generating quiz question");

        match self.try_generate(&query).await {
            Ok(question) => question,
            Err(e) => {
                let message = match e.kind() {
                    UpstreamErrorKind::Disambiguation => {
                        tracing::error!(query = %query, "Disambiguation error: {}", e);
                        DISAMBIGUATION_MESSAGE
                    }
                    UpstreamErrorKind::NotFound => {
                        tracing::error!(query = %query, "Page not found: {}", e);
                        PAGE_NOT_FOUND_MESSAGE
                    }
                    UpstreamErrorKind::Generic => {
                        tracing::error!(query = %query, "An error occurred: {}", e);
                        GENERIC_ERROR_MESSAGE
                    }
                };
                QuizQuestion::message(message)
            }
        }
    }

    async fn try_generate(&self, query: &str) -> Result<QuizQuestion> {
        let hits = self.encyclopedia.search(query).await?;
        let Some(first) = hits.first() else {
            return Ok(QuizQuestion::message(NO_CONTENT_MESSAGE));
        };

        let page = self.encyclopedia.page(first).await?;
        let content = self
            .encyclopedia
            .summary(&page.title, SUMMARY_SENTENCES)
            .await?;

        let prompt = format!("Generate a question about the following text: {}", content);
        let question_text = self.generator.generate(&prompt).await?;

        let sentences = split_sentences(&content);
        if sentences.len() < MIN_SENTENCES {
            return Ok(QuizQuestion::message(NOT_ENOUGH_CONTENT_MESSAGE));
        }

        let mut rng = rand::thread_rng();
        let (options, correct_label) = build_options(&sentences, &mut rng);
        Ok(QuizQuestion {
            question: question_text,
            options,
            correct_label,
        })
    }
}

/// Splits on '.', trims, and drops empty fragments.
pub fn split_sentences(content: &str) -> Vec<String> {
    content
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Places a randomly chosen correct sentence under "A" and up to three
/// distractors drawn without replacement, padding with a placeholder.
pub fn build_options<R: Rng + ?Sized>(
    sentences: &[String],
    rng: &mut R,
) -> (Vec<QuizOption>, Option<char>) {
    let Some(correct) = sentences.choose(rng) else {
        return (Vec::new(), None);
    };

    let mut labels = OPTION_LABELS.iter().copied();
    let mut options = Vec::with_capacity(OPTION_LABELS.len());
    if let Some(label) = labels.next() {
        options.push(QuizOption {
            label,
            text: correct.clone(),
        });
    }

    let mut pool: Vec<&String> = sentences.iter().filter(|s| *s != correct).collect();
    for label in labels {
        let text = if pool.is_empty() {
            PLACEHOLDER_OPTION.to_string()
        } else {
            let idx = rng.gen_range(0..pool.len());
            pool.remove(idx).clone()
        };
        options.push(QuizOption { label, text });
    }

    let correct_label = options
        .iter()
        .find(|o| &o.text == correct)
        .map(|o| o.label);
    (options, correct_label)
}
