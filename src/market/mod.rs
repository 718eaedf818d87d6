pub mod polygon;

pub use polygon::*;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::types::Bar;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Recent fine-grained bars for `ticker`, oldest first. Provider order
    /// is trusted as chronological.
    async fn recent_bars(&self, ticker: &str) -> anyhow::Result<Vec<Bar>>;
}
