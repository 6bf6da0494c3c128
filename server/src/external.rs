//! Pass-through aggregator for third-party posts.
//!
//! One outbound GET per call, no retry and no timeout. Whatever goes wrong on
//! the way (transport, status, body) surfaces as `ItemError::Upstream`.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{ItemError, ItemResult};
use crate::model::ExternalRecord;

pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts?_limit=5";
pub const EXTERNAL_SOURCE: &str = "external-api";
pub const MAX_RECORDS: usize = 5;
const CONTENT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct UpstreamPost {
    id: u64,
    title: String,
    body: String,
}

#[derive(Clone, Debug)]
pub struct ExternalFeed {
    client: Client,
    url: String,
}

impl ExternalFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_records(&self) -> ItemResult<Vec<ExternalRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ItemError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| ItemError::Upstream(e.to_string()))?;

        let posts: Vec<UpstreamPost> = response
            .json()
            .await
            .map_err(|e| ItemError::Upstream(format!("invalid upstream body: {e}")))?;
        debug!(count = posts.len(), "Fetched upstream posts");

        Ok(posts.into_iter().take(MAX_RECORDS).map(reshape).collect())
    }
}

fn reshape(post: UpstreamPost) -> ExternalRecord {
    let mut content: String = post.body.chars().take(CONTENT_PREVIEW_CHARS).collect();
    content.push_str("...");
    ExternalRecord {
        id: post.id,
        title: post.title,
        content,
        source: EXTERNAL_SOURCE.to_string(),
    }
}
