pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    doubt_service::DoubtService,
    encyclopedia_service::{Encyclopedia, WikipediaService},
    generative_service::{GeminiService, TextGenerator},
    quiz_service::QuizService,
};

const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (educational quiz service)"
);

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub doubt_service: DoubtService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let encyclopedia = Arc::new(WikipediaService::new(
            config.wikipedia_api_url.clone(),
            http_client.clone(),
        ));
        let generator = Arc::new(GeminiService::new(
            &config.gemini_api_url,
            &config.gemini_model,
            config.google_api_key.clone(),
            http_client,
        )?);

        Ok(Self::from_parts(encyclopedia, generator))
    }

    pub fn from_parts(encyclopedia: Arc<dyn Encyclopedia>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            quiz_service: QuizService::new(encyclopedia.clone(), generator.clone()),
            doubt_service: DoubtService::new(encyclopedia, generator),
        }
    }
}

pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route(
            "/quiz",
            get(routes::quiz::show_quiz).post(routes::quiz::submit_quiz),
        )
        .route(
            "/doubt",
            get(routes::doubt::show_doubt).post(routes::doubt::submit_doubt),
        )
        .route("/reset_quiz", post(routes::quiz::reset_quiz))
        .route("/health", get(routes::health::health))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
