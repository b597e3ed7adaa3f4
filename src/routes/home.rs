use axum::response::Html;

use crate::{
    error::Result,
    views::{self, IndexPage},
};

#[axum::debug_handler]
pub async fn home() -> Result<Html<String>> {
    views::render(&IndexPage)
}
