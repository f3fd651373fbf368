//! Terminal client for the competitors API.
//!
//! Mirrors the browser page: a search screen and a results screen, with the
//! network behind [`CompetitorsApi`] so the view logic is testable offline.

pub mod repl;
pub mod table;
pub mod view;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::competitor::{Competitor, CompetitorsResponse};

/// Where the client gets its competitor lists from.
#[async_trait]
pub trait CompetitorsApi: Send + Sync {
    async fn fetch(&self, website: &str) -> Result<Vec<Competitor>>;
}

/// Talks to a running server over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpApi {
    pub fn new(server: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint_for(server),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(server: &str) -> String {
    format!("{}/api/competitors", server.trim_end_matches('/'))
}

#[async_trait]
impl CompetitorsApi for HttpApi {
    async fn fetch(&self, website: &str) -> Result<Vec<Competitor>> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&LookupRequest { website })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_default();
            bail!("server error ({}): {}", status, message);
        }

        let body: CompetitorsResponse = resp.json().await?;
        Ok(body.competitors)
    }
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    website: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}
