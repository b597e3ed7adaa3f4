use axum::{extract::State, response::Html, Form};

use crate::{
    dto::form_dto::DoubtForm,
    error::Result,
    views::{self, DoubtPage},
    AppState,
};

#[axum::debug_handler]
pub async fn show_doubt() -> Result<Html<String>> {
    views::render(&DoubtPage::default())
}

#[axum::debug_handler]
pub async fn submit_doubt(
    State(state): State<AppState>,
    Form(form): Form<DoubtForm>,
) -> Result<Html<String>> {
    let doubt = form.doubt.unwrap_or_default();
    let answer = state.doubt_service.resolve(&doubt).await;
    views::render(&DoubtPage {
        answer: Some(&answer),
    })
}
