use tracing::{debug, error};

use super::types::{Movie, Page};

/// Client for the two read-only list endpoints of a TMDB-style catalog.
///
/// Every call is a single round trip: no retries, no timeout and no caching.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn popular_url(&self) -> String {
        format!(
            "{}/movie/popular?api_key={}",
            self.base_url,
            urlencoding::encode(&self.api_key)
        )
    }

    /// The query is encoded as-is. Rejecting blank queries is up to the caller.
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        )
    }

    pub async fn get_popular(&self) -> Result<Vec<Movie>, ApiError> {
        self.fetch_results("/movie/popular", &self.popular_url()).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, ApiError> {
        self.fetch_results("/search/movie", &self.search_url(query))
            .await
    }

    // `endpoint` is only used for logging, the url carries the api key.
    async fn fetch_results(&self, endpoint: &str, url: &str) -> Result<Vec<Movie>, ApiError> {
        debug!(endpoint = endpoint, "catalog request");

        let result = self.round_trip(url).await;
        match &result {
            Ok(movies) => debug!(endpoint = endpoint, count = movies.len(), "catalog response"),
            Err(e) => error!(endpoint = endpoint, "API fetch error: {}", e),
        }
        result
    }

    async fn round_trip(&self, url: &str) -> Result<Vec<Movie>, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ApiError::Http { status });
        }
        let body = response.bytes().await?;
        decode_results(status, &body)
    }
}

/// Turn a raw status and body into the `results` of a `Page`.
pub fn decode_results(status: u16, body: &[u8]) -> Result<Vec<Movie>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Http { status });
    }
    let page: Page = serde_json::from_slice(body)?;
    Ok(page.results)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
