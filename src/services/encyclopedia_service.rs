use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
}

/// Article search, lookup and summarisation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Resolves a title to a single article, following redirects.
    async fn page(&self, title: &str) -> Result<WikiPage>;

    /// Plain-text extract of the first `sentences` sentences of an article.
    async fn summary(&self, title: &str, sentences: u32) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    error: Option<ApiError>,
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    search: Vec<SearchHit>,
    #[serde(default)]
    pages: Vec<PageBody>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    pageid: Option<u64>,
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    pageprops: Option<PageProps>,
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

impl PageBody {
    fn is_missing(&self) -> bool {
        self.missing || self.invalid || self.pageid.is_none()
    }
}

/// MediaWiki action API client.
#[derive(Clone)]
pub struct WikipediaService {
    client: Client,
    api_url: Url,
}

impl WikipediaService {
    pub fn new(api_url: Url, client: Client) -> Self {
        Self { client, api_url }
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryBody> {
        let resp = self
            .client
            .get(self.api_url.clone())
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Wikipedia API status {}: {}",
                status.as_u16(),
                text
            )));
        }

        let body: ApiResponse = resp.json().await?;
        if let Some(err) = body.error {
            return Err(Error::Upstream(format!(
                "Wikipedia API error {}: {}",
                err.code, err.info
            )));
        }
        Ok(body.query.unwrap_or_default())
    }

    async fn single_page(&self, title: &str, params: &[(&str, &str)]) -> Result<PageBody> {
        let mut all = vec![("titles", title), ("redirects", "1")];
        all.extend_from_slice(params);
        let query = self.query(&all).await?;

        let page = query
            .pages
            .into_iter()
            .next()
            .ok_or_else(|| Error::PageNotFound(title.to_string()))?;
        if page.is_missing() {
            return Err(Error::PageNotFound(title.to_string()));
        }
        Ok(page)
    }
}

#[async_trait]
impl Encyclopedia for WikipediaService {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let limit = SEARCH_LIMIT.to_string();
        let body = self
            .query(&[
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("srprop", ""),
            ])
            .await?;
        tracing::debug!("Wikipedia search {:?} returned {} hits", query, body.search.len());
        Ok(body.search.into_iter().map(|hit| hit.title).collect())
    }

    async fn page(&self, title: &str) -> Result<WikiPage> {
        let page = self
            .single_page(
                title,
                &[
                    ("prop", "info|pageprops"),
                    ("ppprop", "disambiguation"),
                ],
            )
            .await?;

        if page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
        {
            return Err(Error::Disambiguation(page.title));
        }

        Ok(WikiPage { title: page.title })
    }

    async fn summary(&self, title: &str, sentences: u32) -> Result<String> {
        let sentences = sentences.to_string();
        let page = self
            .single_page(
                title,
                &[
                    ("prop", "extracts"),
                    ("explaintext", "1"),
                    ("exsentences", sentences.as_str()),
                ],
            )
            .await?;
        Ok(page.extract.unwrap_or_default().trim().to_string())
    }
}
