pub mod fanout;

use anyhow::Result;
use async_trait::async_trait;

use crate::competitor::Competitor;

/// The outermost boundary. The HTTP handler only knows this trait.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn find(&self, website: &str) -> Result<Vec<Competitor>>;
}
