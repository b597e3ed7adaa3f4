pub mod pages;

use askama::Template;
use axum::response::Html;

use crate::error::Result;
pub use pages::{DoubtPage, IndexPage, QuizPage, QuizView};

/// Renders a page, logging any template failure before it becomes a 500.
pub fn render<T: Template>(page: &T) -> Result<Html<String>> {
    page.render().map(Html).map_err(|e| {
        tracing::error!("Error rendering template: {}", e);
        e.into()
    })
}
