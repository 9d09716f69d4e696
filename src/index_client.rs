//! HTTP client for the external Meilisearch-compatible index.
//!
//! One [`IndexClient`] is built at process start and shared read-only
//! across handlers; it owns a single `reqwest::Client` with the configured
//! timeout. The index owns ranking, tokenization, and persistence — this
//! client only speaks the query/response contract.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::time::Duration;

use crate::config::IndexConfig;
use crate::models::{IndexDescriptor, SearchRequest};

pub struct IndexClient {
    http: reqwest::Client,
    host: String,
    api_key: Option<String>,
}

impl IndexClient {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build index HTTP client")?;

        Ok(Self {
            http,
            host: config.host.trim_end_matches('/').to_string(),
            api_key: config.resolved_api_key(),
        })
    }

    /// Issue a search against the request's index.
    ///
    /// Returns the index's response body as-is. Callers must not reshape
    /// it: the presentation layer depends on the index's own field names
    /// (`hits`, `estimatedTotalHits`, `processingTimeMs`).
    pub async fn search(&self, req: &SearchRequest) -> Result<Value> {
        let url = self.search_url(&req.index)?;

        let mut body = serde_json::json!({
            "q": req.query,
            "limit": req.limit,
            "offset": req.offset,
        });
        for (key, value) in [
            ("filter", &req.filter),
            ("sort", &req.sort),
            ("attributesToRetrieve", &req.attributes_to_retrieve),
            ("attributesToHighlight", &req.attributes_to_highlight),
        ] {
            if let Some(value) = value {
                body[key] = value.clone();
            }
        }

        let response = self
            .authorized(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .context("Index request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Index returned {}: {}", status, detail);
        }

        response
            .json::<Value>()
            .await
            .context("Invalid JSON from index")
    }

    /// List all indexes the engine reports, projected down to
    /// [`IndexDescriptor`]. Settings and counts are never read.
    pub async fn list_indexes(&self) -> Result<Vec<IndexDescriptor>> {
        let url = format!("{}/indexes", self.host);

        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .context("Index request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Index returned {}: {}", status, detail);
        }

        let json: Value = response
            .json()
            .await
            .context("Invalid JSON from index")?;

        project_index_listing(&json)
    }

    /// Build the search URL for an index uid.
    ///
    /// The uid is client-supplied and becomes a path segment, so it is
    /// checked against the engine's own uid charset first. Anything else
    /// (separators, `..`, `#`, `?`) could steer the authenticated request
    /// off the search endpoint.
    fn search_url(&self, index: &str) -> Result<String> {
        if !valid_index_uid(index) {
            bail!("Invalid index uid: {:?}", index);
        }
        Ok(format!("{}/indexes/{}/search", self.host, index))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {}", key)),
            None => builder,
        }
    }
}

/// Index uids follow the engine's charset: ASCII letters, digits,
/// underscore, hyphen; never empty.
fn valid_index_uid(uid: &str) -> bool {
    !uid.is_empty()
        && uid
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Project a raw index listing down to [`IndexDescriptor`]s.
///
/// Only `uid` and `primaryKey` are read from each entry; everything else
/// the engine reports (settings, document counts, ranking rules) is
/// dropped here so it can never reach the public surface.
fn project_index_listing(json: &Value) -> Result<Vec<IndexDescriptor>> {
    let results = json
        .get("results")
        .and_then(Value::as_array)
        .context("Invalid index listing: missing results array")?;

    Ok(results
        .iter()
        .map(|entry| IndexDescriptor {
            uid: entry
                .get("uid")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            primary_key: entry
                .get("primaryKey")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
        .collect())
}
