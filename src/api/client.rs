use crate::api::models::{Logger, LoggerEnvelope, SamplesPage};
use crate::api::SampleSource;
use crate::config;
use crate::error::ApiError;
use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::io::Read;
use url::Url;

pub struct Client {
    http_client: HttpClient,
    config: config::ApiConfig,
}

impl Client {
    pub fn new(config: config::ApiConfig) -> Self {
        let http_client = HttpClient::new();
        Self {
            http_client,
            config,
        }
    }

    /// Fetches the logger descriptor together with its sensors.
    pub async fn fetch_logger(&self, logger_id: &str) -> Result<Logger, ApiError> {
        let envelope: LoggerEnvelope = self
            .get_json(&format!("/v2/data_loggers/{}", logger_id))
            .await?;
        Ok(envelope.into())
    }

    /// Turns a path or a cursor into the URL to request.
    ///
    /// Absolute URLs are used as-is, paths are resolved against the
    /// configured base URL.
    fn resolve(&self, target: &str) -> Result<Url, ApiError> {
        if let Ok(url) = Url::parse(target) {
            return Ok(url);
        }
        if !target.starts_with('/') {
            return Err(ApiError::InvalidCursor(target.to_string()));
        }
        Url::parse(&format!("{}{}", self.config.url.trim_end_matches('/'), target))
            .map_err(|_| ApiError::InvalidCursor(target.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, target: &str) -> Result<T, ApiError> {
        let url = self.resolve(target)?;
        let response = self
            .http_client
            .get(url)
            .header("user-agent", "eb-export")
            .header(ACCEPT_ENCODING, "gzip")
            .bearer_auth(&self.config.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::server_error(status, body));
        }

        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("gzip"));
        let body = response.bytes().await?;

        if gzipped {
            let mut inflated = Vec::new();
            GzDecoder::new(body.as_ref())
                .read_to_end(&mut inflated)
                .map_err(ApiError::Decompress)?;
            Ok(serde_json::from_slice(&inflated)?)
        } else {
            Ok(serde_json::from_slice(&body)?)
        }
    }
}

#[async_trait]
impl SampleSource for Client {
    async fn fetch_page(&self, target: &str) -> Result<SamplesPage, ApiError> {
        self.get_json(target).await
    }
}
