//! Semantic Scholar Graph API client for the paper batch endpoint

use std::time::Duration;

use citefetch_core::{HttpError, SHARED_RUNTIME, build_client};
use serde::Serialize;

/// `POST /graph/v1/paper/batch`
pub const DEFAULT_BATCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/batch";

/// Largest batch the endpoint is asked to resolve in one call
pub const MAX_BATCH_SIZE: usize = 100;

/// Header carrying the API key; sent even when the key is empty
pub const API_KEY_HEADER: &str = "x-api-key";

/// One paper as returned by the API, `null` for ids the service doesn't know.
pub type RawPaper = serde_json::Value;

/// Query-string configuration for a batch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchQuery {
    /// Comma-separated field selection
    pub fields: String,
    /// Extra query parameters, sent after `fields` in order
    pub params: Vec<(String, String)>,
}

impl BatchQuery {
    pub fn new(fields: impl Into<String>) -> Self {
        Self {
            fields: fields.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    fn pairs(&self) -> Vec<(&str, &str)> {
        std::iter::once(("fields", self.fields.as_str()))
            .chain(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    ids: &'a [String],
}

/// Connection context for the batch endpoint.
///
/// Holds one pooled client so consecutive batches reuse the same connection.
pub struct Session {
    client: reqwest::Client,
    batch_url: String,
    api_key: String,
}

impl Session {
    pub fn new(
        batch_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            client: build_client(timeout)?,
            batch_url: batch_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Resolve one batch of ids.
    ///
    /// The result is aligned with `ids`: one slot per requested id, `null`
    /// where the id was not found. Any non-success status fails the call.
    pub fn get_paper_batch(
        &self,
        ids: &[String],
        query: &BatchQuery,
    ) -> Result<Vec<RawPaper>, HttpError> {
        let body = SHARED_RUNTIME
            .handle()
            .block_on(async {
                let resp = self
                    .client
                    .post(&self.batch_url)
                    .query(&query.pairs())
                    .header(API_KEY_HEADER, self.api_key.as_str())
                    .json(&BatchRequest { ids })
                    .send()
                    .await?
                    .error_for_status()?;
                resp.text().await
            })
            .map_err(HttpError::from_reqwest)?;

        let papers: Vec<RawPaper> =
            serde_json::from_str(&body).map_err(|e| HttpError::Decode(e.to_string()))?;
        if papers.len() != ids.len() {
            log::warn!(
                "batch of {} ids returned {} records; output may be misaligned",
                ids.len(),
                papers.len()
            );
        }
        Ok(papers)
    }
}
