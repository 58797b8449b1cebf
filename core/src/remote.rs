//! `FishApiClient` backed by the remote fish REST endpoint.
//!
//! # Design
//! `HttpFishApi` is the host in the host-does-IO pattern: `FishClient`
//! describes each request, `reqwest` executes it, and the plain
//! `HttpResponse` goes back to `FishClient` for status and body handling.
//! Every operation goes to the server; nothing is cached locally.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::api::FishApiClient;
use crate::client::FishClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFish, Fish, UpdateFish};

#[derive(Debug, Clone)]
pub struct HttpFishApi {
    client: FishClient,
    http: Client,
}

impl HttpFishApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Reuse a configured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(base_url: &str, http: Client) -> Self {
        Self {
            client: FishClient::new(base_url),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "fish api request");
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.path);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(path = %request.path, error = %e, "fish api transport failure");
            ApiError::TransportError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

impl Default for HttpFishApi {
    fn default() -> Self {
        Self::new(crate::client::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl FishApiClient for HttpFishApi {
    async fn get_all(&self) -> Result<Vec<Fish>, ApiError> {
        let response = self.execute(self.client.build_list_fish()).await?;
        self.client.parse_list_fish(response)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Fish>, ApiError> {
        let response = self.execute(self.client.build_get_fish(id)).await?;
        match self.client.parse_get_fish(response) {
            Ok(fish) => Ok(Some(fish)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, input: CreateFish) -> Result<Fish, ApiError> {
        let request = self.client.build_create_fish(&input)?;
        let response = self.execute(request).await?;
        self.client.parse_create_fish(response)
    }

    async fn update(&self, id: &str, input: UpdateFish) -> Result<Fish, ApiError> {
        let request = self.client.build_update_fish(id, &input)?;
        let response = self.execute(request).await?;
        self.client.parse_update_fish(response)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.execute(self.client.build_delete_fish(id)).await?;
        match self.client.parse_delete_fish(response) {
            Err(ApiError::NotFound) => Ok(()),
            other => other,
        }
    }
}
