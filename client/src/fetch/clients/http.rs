//! reqwest-backed client for the remote schedule API.

use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::fetch::client::FetchClient;
use crate::fetch::config::HttpSettings;
use crate::fetch::error::{FetchError, FetchResult};
use crate::fetch::request::FetchRequest;
use crate::models::ScheduleResponse;

/// Client issuing `GET <base_url><schedule_path>?week=..&sem=..&...`.
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: reqwest::Client,
    url: String,
}

impl HttpFetchClient {
    /// Build a client from HTTP settings.
    ///
    /// # Errors
    /// Returns a configuration error if the base URL is empty or the
    /// underlying HTTP client cannot be built.
    pub fn new(settings: &HttpSettings) -> FetchResult<Self> {
        if settings.base_url.trim().is_empty() {
            return Err(FetchError::configuration(
                "HTTP client requires 'http.base_url' setting",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FetchError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: settings.schedule_url(),
        })
    }

    /// Full schedule endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn fetch_week(&self, request: &FetchRequest) -> FetchResult<ScheduleResponse> {
        let tag = |e: FetchError| {
            e.with_operation("fetch_week")
                .for_request(request.context(), request.week())
        };

        debug!("GET {} for {}", self.url, request.key);

        let response = self
            .client
            .get(&self.url)
            .query(&request.query_params())
            .send()
            .await
            .map_err(|e| tag(e.into()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| tag(e.into()))?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            return Err(tag(
                FetchError::protocol(status.as_u16(), reason).with_details(body.trim().to_string()),
            ));
        }

        serde_json::from_str::<ScheduleResponse>(&body).map_err(|e| tag(e.into()))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
