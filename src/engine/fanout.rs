use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::Engine;
use crate::competitor::{Competitor, CompetitorDetail};
use crate::consts::DEFAULT_ENRICH_TIMEOUT_SECS;
use crate::discover::Discoverer;
use crate::enrich::Enricher;

pub struct FanOutConfig {
    pub enrich_timeout: Duration,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            enrich_timeout: Duration::from_secs(DEFAULT_ENRICH_TIMEOUT_SECS),
        }
    }
}

/// Discover once, then enrich every candidate concurrently.
pub struct FanOutEngine {
    discoverer: Discoverer,
    enricher: Arc<Enricher>,
    config: FanOutConfig,
}

impl FanOutEngine {
    pub fn new(discoverer: Discoverer, enricher: Enricher, config: FanOutConfig) -> Self {
        Self {
            discoverer,
            enricher: Arc::new(enricher),
            config,
        }
    }
}

#[async_trait]
impl Engine for FanOutEngine {
    async fn find(&self, website: &str) -> Result<Vec<Competitor>> {
        let candidates = self.discoverer.discover(website).await;
        if candidates.is_empty() {
            tracing::info!(website, "no competitors discovered");
            return Ok(Vec::new());
        }

        let timeout = self.config.enrich_timeout;
        let futures: Vec<_> = candidates
            .iter()
            .map(|candidate| {
                let enricher = Arc::clone(&self.enricher);
                async move {
                    match tokio::time::timeout(timeout, enricher.enrich(&candidate.url)).await {
                        Ok(detail) => detail,
                        Err(_) => {
                            tracing::warn!(url = %candidate.url, "enrichment timed out");
                            CompetitorDetail::placeholder()
                        }
                    }
                }
            })
            .collect();

        // join_all keeps input order, so details line up with candidates.
        let details = futures::future::join_all(futures).await;

        let competitors: Vec<Competitor> = candidates
            .into_iter()
            .zip(details)
            .map(|(candidate, detail)| Competitor::from_parts(candidate, detail))
            .collect();

        tracing::info!(website, count = competitors.len(), "competitor lookup complete");
        Ok(competitors)
    }
}
