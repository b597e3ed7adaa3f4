use axum::{extract::State, response::Html, Form};

use crate::{
    dto::form_dto::QuizForm, error::Result, services::grading_service::GradingService,
    views::{self, QuizView},
    AppState,
};

#[axum::debug_handler]
pub async fn show_quiz() -> Result<Html<String>> {
    views::render(&QuizView::Empty.page())
}

/// Grades a submitted answer, or generates a new question when no answer
/// was picked.
#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Form(form): Form<QuizForm>,
) -> Result<Html<String>> {
    if let Some(answer) = form.answer() {
        let correct = form.correct_answer.as_deref().unwrap_or_default();
        let feedback = GradingService::check_answer(answer, correct);
        tracing::info!(answer = %answer, correct = %correct, "Checked quiz answer");
        let view = QuizView::Feedback {
            question: form.question.clone().unwrap_or_default(),
            feedback,
        };
        return views::render(&view.page());
    }

    let question = state
        .quiz_service
        .generate_question(
            form.subject.as_deref().unwrap_or_default(),
            form.syllabus.as_deref().unwrap_or_default(),
            form.grade.as_deref().unwrap_or_default(),
            form.difficulty.as_deref().unwrap_or_default(),
        )
        .await;
    views::render(&QuizView::Question(question).page())
}

/// Nothing is held server-side, so resetting is just the empty form.
#[axum::debug_handler]
pub async fn reset_quiz() -> Result<Html<String>> {
    views::render(&QuizView::Empty.page())
}
