pub mod mock;
pub mod serper;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A search result entry that is not an advertisement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    pub date: Option<String>,
    pub favicon: Option<String>,
}

/// A web search provider. Results come back in ranking order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>>;
}
