//! Wire and domain types for a single competitor lookup.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::consts::TRAFFIC_CEILING;

/// A provisional competitor, as proposed by the chat model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorCandidate {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// Metadata attached to a candidate by the enricher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorDetail {
    pub logo: Option<String>,
    /// Placeholder score in `[0, TRAFFIC_CEILING)`. Never a measured value.
    pub traffic: u64,
}

impl CompetitorDetail {
    /// A detail with no logo and a synthesized traffic value.
    pub fn placeholder() -> Self {
        Self::with_logo(None)
    }

    pub fn with_logo(logo: Option<String>) -> Self {
        Self {
            logo,
            traffic: synthesize_traffic(),
        }
    }
}

/// A candidate merged with its detail. One item of the API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    pub url: String,
    pub description: String,
    pub traffic: u64,
    pub logo: Option<String>,
}

impl Competitor {
    pub fn from_parts(candidate: CompetitorCandidate, detail: CompetitorDetail) -> Self {
        Self {
            url: candidate.url,
            description: candidate.description,
            traffic: detail.traffic,
            logo: detail.logo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorsResponse {
    pub competitors: Vec<Competitor>,
}

/// No analytics source is wired in; traffic is random noise for the UI.
fn synthesize_traffic() -> u64 {
    rand::rng().random_range(0..TRAFFIC_CEILING)
}
