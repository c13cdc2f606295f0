//! Sanity HTTP API client
//!
//! Talks to the content lake's query and mutate endpoints:
//! - `GET  {host}/v{version}/data/query/{dataset}?query=<GROQ>&$param=<json>`
//! - `POST {host}/v{version}/data/mutate/{dataset}` with `{"mutations": [...]}`

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SanityConfig;
use crate::error::SanityError;

/// Client for a single Sanity project/dataset
pub struct SanityClient {
    http: Client,
    /// Live API host, used for writes and uncached reads
    api_host: String,
    /// Host for cacheable reads (the API CDN when enabled)
    read_host: String,
    dataset: String,
    api_version: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Self {
        let api_host = match &config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", config.project_id),
        };

        // An explicit host has no CDN counterpart
        let read_host = if config.use_cdn && config.api_host.is_none() {
            format!("https://{}.apicdn.sanity.io", config.project_id)
        } else {
            api_host.clone()
        };

        Self {
            http: Client::new(),
            api_host,
            read_host,
            dataset: config.dataset.clone(),
            api_version: config.api_version.trim_start_matches('v').to_string(),
            token: config.token.clone(),
        }
    }

    fn data_url(&self, host: &str, endpoint: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            host, self.api_version, endpoint, self.dataset
        )
    }

    /// Only writes carry the token; reads stay on the public, published view
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, SanityError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| SanityError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(SanityError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(SanityError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SanityError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Run a GROQ query.
    ///
    /// `params` are bound as `$name`; values are JSON encoded as the API expects.
    /// `fresh` skips the CDN so the result reflects the latest write.
    pub async fn query<T: DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, Value)],
        fresh: bool,
    ) -> Result<T, SanityError> {
        let host = if fresh { &self.api_host } else { &self.read_host };

        let mut query: Vec<(String, String)> = Vec::with_capacity(params.len() + 1);
        query.push(("query".to_string(), groq.to_string()));
        for (name, value) in params {
            query.push((format!("${}", name), value.to_string()));
        }

        tracing::debug!(dataset = %self.dataset, fresh, "Sanity query");

        let resp = self
            .http
            .get(self.data_url(host, "query"))
            .query(&query)
            .send()
            .await?;

        let body: QueryResponse<T> = self.handle_response(resp).await?;
        Ok(body.result)
    }

    /// Apply mutations in a single transaction, returning ids and documents
    pub async fn mutate(&self, mutations: Vec<Value>) -> Result<MutationResponse, SanityError> {
        let resp = self
            .authorize(
                self.http
                    .post(self.data_url(&self.api_host, "mutate"))
                    .query(&[("returnIds", "true"), ("returnDocuments", "true")])
                    .json(&MutateRequest { mutations }),
            )
            .send()
            .await?;

        self.handle_response(resp).await
    }
}

#[derive(Serialize)]
struct MutateRequest {
    mutations: Vec<Value>,
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Result of a mutate call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

/// Outcome of one mutation in a transaction
#[derive(Debug, Deserialize)]
pub struct MutationResult {
    pub id: String,
    #[serde(default)]
    pub document: Option<Value>,
}
