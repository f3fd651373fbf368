//! Attach logo and traffic metadata to a discovered competitor.

use std::sync::Arc;

use crate::competitor::CompetitorDetail;
use crate::search::SearchProvider;

/// Looks up per-competitor details through a search provider.
pub struct Enricher {
    search: Arc<dyn SearchProvider>,
}

impl Enricher {
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self { search }
    }

    /// Never fails. The logo is the first organic result's favicon, if any.
    /// Traffic is always synthesized, whether or not the search succeeded.
    pub async fn enrich(&self, url: &str) -> CompetitorDetail {
        match self.search.search(url).await {
            Ok(results) => {
                let logo = results.into_iter().next().and_then(|first| first.favicon);
                CompetitorDetail::with_logo(logo)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "competitor enrichment failed");
                CompetitorDetail::placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TRAFFIC_CEILING;
    use crate::search::OrganicResult;
    use crate::search::mock::MockSearch;

    #[tokio::test]
    async fn no_results_gives_placeholder() {
        let enricher = Enricher::new(Arc::new(MockSearch::new()));
        let detail = enricher.enrich("https://a.com").await;
        assert!(detail.logo.is_none());
        assert!(detail.traffic < TRAFFIC_CEILING);
    }

    #[tokio::test]
    async fn first_result_favicon_becomes_logo() {
        let search = MockSearch::new().with_results(
            "https://a.com",
            vec![
                OrganicResult {
                    favicon: Some("https://a.com/favicon.ico".to_string()),
                    ..OrganicResult::default()
                },
                OrganicResult {
                    favicon: Some("https://other.com/favicon.ico".to_string()),
                    ..OrganicResult::default()
                },
            ],
        );
        let detail = Enricher::new(Arc::new(search)).enrich("https://a.com").await;
        assert_eq!(detail.logo.as_deref(), Some("https://a.com/favicon.ico"));
        assert!(detail.traffic < TRAFFIC_CEILING);
    }

    #[tokio::test]
    async fn first_result_without_favicon_gives_no_logo() {
        let search = MockSearch::new().with_results(
            "a.com",
            vec![
                OrganicResult::default(),
                OrganicResult {
                    favicon: Some("https://second.com/favicon.ico".to_string()),
                    ..OrganicResult::default()
                },
            ],
        );
        let detail = Enricher::new(Arc::new(search)).enrich("a.com").await;
        assert!(detail.logo.is_none());
    }

    #[tokio::test]
    async fn search_error_gives_placeholder() {
        let search = MockSearch::new().with_failure("a.com", "429 too many requests");
        let detail = Enricher::new(Arc::new(search)).enrich("a.com").await;
        assert!(detail.logo.is_none());
        assert!(detail.traffic < TRAFFIC_CEILING);
    }

    #[tokio::test]
    async fn queries_with_the_competitor_url() {
        let search = Arc::new(MockSearch::new());
        Enricher::new(search.clone()).enrich("https://rival.io").await;
        assert_eq!(search.queries(), vec!["https://rival.io".to_string()]);
    }
}
