use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{OrganicResult, SearchProvider};

/// A canned search provider for tests. Answers by exact query match.
#[derive(Default)]
pub struct MockSearch {
    results: HashMap<String, Vec<OrganicResult>>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with a single result carrying `favicon`.
    pub fn with_favicon(mut self, query: &str, favicon: Option<&str>) -> Self {
        self.results.insert(
            query.to_string(),
            vec![OrganicResult {
                title: query.to_string(),
                link: query.to_string(),
                favicon: favicon.map(str::to_string),
                ..OrganicResult::default()
            }],
        );
        self
    }

    pub fn with_results(mut self, query: &str, results: Vec<OrganicResult>) -> Self {
        self.results.insert(query.to_string(), results);
        self
    }

    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.failures.insert(query.to_string(), message.to_string());
        self
    }

    /// Sleep before answering `query`.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(query) {
            anyhow::bail!("{}", message);
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}
