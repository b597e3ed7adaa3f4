#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use quiz_tutor::{
    error::{Error, Result},
    services::{
        encyclopedia_service::{Encyclopedia, WikiPage},
        generative_service::TextGenerator,
    },
    AppState,
};
use tower::ServiceExt;

pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// How the fake encyclopedia answers `page`.
#[derive(Clone, Copy)]
pub enum PageBehavior {
    Found,
    Disambiguation,
    Missing,
    Broken,
}

pub struct FakeEncyclopedia {
    pub hits: Vec<String>,
    pub summary: String,
    pub page_behavior: PageBehavior,
    pub searches: Mutex<Vec<String>>,
}

impl FakeEncyclopedia {
    pub fn with_summary(title: &str, summary: &str) -> Self {
        Self {
            hits: vec![title.to_string()],
            summary: summary.to_string(),
            page_behavior: PageBehavior::Found,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            ..Self::with_summary("", "")
        }
    }

    pub fn failing(behavior: PageBehavior) -> Self {
        Self {
            page_behavior: behavior,
            ..Self::with_summary("Mercury", "Mercury is a planet. It is small.")
        }
    }
}

#[async_trait]
impl Encyclopedia for FakeEncyclopedia {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.searches.lock().unwrap().push(query.to_string());
        Ok(self.hits.clone())
    }

    async fn page(&self, title: &str) -> Result<WikiPage> {
        match self.page_behavior {
            PageBehavior::Found => Ok(WikiPage {
                title: title.to_string(),
            }),
            PageBehavior::Disambiguation => Err(Error::Disambiguation(title.to_string())),
            PageBehavior::Missing => Err(Error::PageNotFound(title.to_string())),
            PageBehavior::Broken => Err(Error::Upstream("connection reset".to_string())),
        }
    }

    async fn summary(&self, _title: &str, _sentences: u32) -> Result<String> {
        Ok(self.summary.clone())
    }
}

pub struct FakeGenerator {
    pub reply: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(Error::Upstream)
    }
}

pub fn app(encyclopedia: Arc<FakeEncyclopedia>, generator: Arc<FakeGenerator>) -> Router {
    let state = AppState::from_parts(encyclopedia, generator);
    quiz_tutor::build_router(state, STATIC_DIR)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
