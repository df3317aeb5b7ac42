use std::time::Duration;

use futures_util::StreamExt;
use roster_core::LoadError;
use roster_logging::{roster_debug, roster_warn};

use crate::wire::decode_page;
use crate::{EngineError, PageRequest, UserPage};

pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api/";

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    /// Sent as `seed` so consecutive pages come from one stable sequence.
    pub seed: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            seed: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// One network call per page; no state, no retries.
#[async_trait::async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<UserPage, LoadError>;
}

#[derive(Debug, Clone)]
pub struct RandomUserSource {
    settings: SourceSettings,
    client: reqwest::Client,
}

impl RandomUserSource {
    pub fn new(settings: SourceSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    pub fn page_url(&self, request: PageRequest) -> Result<url::Url, LoadError> {
        if request.page == 0 {
            return Err(LoadError::InvalidRequest("page numbers start at 1".into()));
        }
        if request.page_size == 0 {
            return Err(LoadError::InvalidRequest("page size must be positive".into()));
        }

        let mut url = url::Url::parse(&self.settings.base_url)
            .map_err(|err| LoadError::InvalidRequest(format!("base url: {err}")))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("gender", request.category.query_value())
                .append_pair("page", &request.page.to_string())
                .append_pair("results", &request.page_size.to_string());
            if let Some(seed) = &self.settings.seed {
                query.append_pair("seed", seed);
            }
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, LoadError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl UserSource for RandomUserSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<UserPage, LoadError> {
        let url = self.page_url(request)?;
        roster_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            roster_warn!(
                "{} page {} rejected with {}",
                request.category,
                request.page,
                status
            );
            return Err(LoadError::Server(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        let page = decode_page(&body)?;
        roster_debug!(
            "{} page {} decoded: {} items, token {}",
            request.category,
            page.server_page,
            page.items.len(),
            page.page_token
        );
        Ok(page)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> LoadError {
    LoadError::Decoding(format!("response too large (max {max_bytes}, actual {actual})"))
}

fn map_reqwest_error(err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::Network(format!("timeout: {err}"));
    }
    if err.is_decode() {
        return LoadError::Decoding(err.to_string());
    }
    LoadError::Network(err.to_string())
}
