//! ETF portfolio sub-entity of the account aggregate.

use serde::{Deserialize, Serialize};
use shared::{EtfHolding, WatchedEtf};

/// Owned holdings, watchlist and interest categories for one account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Interest categories, replaced wholesale by the client.
    pub categories: Vec<String>,
    pub owned: Vec<EtfHolding>,
    pub watched: Vec<WatchedEtf>,
}

impl Portfolio {
    pub fn holding(&self, etf_name: &str) -> Option<&EtfHolding> {
        self.owned.iter().find(|h| h.name == etf_name)
    }

    pub fn holding_mut(&mut self, etf_name: &str) -> Option<&mut EtfHolding> {
        self.owned.iter_mut().find(|h| h.name == etf_name)
    }

    pub fn is_watching(&self, etf_name: &str) -> bool {
        self.watched.iter().any(|w| w.name == etf_name)
    }
}
