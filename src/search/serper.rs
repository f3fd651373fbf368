use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{OrganicResult, SearchProvider};

const API_URL: &str = "https://google.serper.dev/search";
const RESULTS_PER_QUERY: u32 = 10;

/// Google search results through the Serper API.
pub struct SerperSearch {
    client: reqwest::Client,
    api_key: String,
}

impl SerperSearch {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Serper HTTP client")?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl SearchProvider for SerperSearch {
    async fn search(&self, query: &str) -> Result<Vec<OrganicResult>> {
        let body = ApiRequest {
            q: query,
            num: RESULTS_PER_QUERY,
        };

        let resp = self
            .client
            .post(API_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("Serper API error ({}): {}", status, text);
        }

        let api_resp: ApiResponse = resp.json().await?;
        Ok(api_resp.organic)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_query_and_count() {
        let json = serde_json::to_value(ApiRequest { q: "rival.io", num: 10 }).unwrap();
        assert_eq!(json["q"], "rival.io");
        assert_eq!(json["num"], 10);
    }

    #[test]
    fn decode_organic_results() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{
                "searchParameters": {"q": "rival.io"},
                "organic": [
                    {
                        "title": "Rival",
                        "link": "https://rival.io",
                        "snippet": "The rival",
                        "position": 1,
                        "favicon": "https://rival.io/favicon.ico"
                    },
                    {
                        "title": "Other",
                        "link": "https://other.io",
                        "snippet": "Another",
                        "date": "Jan 2, 2024"
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(resp.organic.len(), 2);
        assert_eq!(
            resp.organic[0].favicon.as_deref(),
            Some("https://rival.io/favicon.ico")
        );
        assert!(resp.organic[1].favicon.is_none());
        assert_eq!(resp.organic[1].date.as_deref(), Some("Jan 2, 2024"));
    }

    #[test]
    fn decode_without_organic_is_empty() {
        let resp: ApiResponse = serde_json::from_str(r#"{"knowledgeGraph": {}}"#).unwrap();
        assert!(resp.organic.is_empty());
    }

    #[test]
    fn decode_tolerates_sparse_entries() {
        let resp: ApiResponse = serde_json::from_str(r#"{"organic": [{}]}"#).unwrap();
        assert_eq!(resp.organic[0], OrganicResult::default());
    }
}
