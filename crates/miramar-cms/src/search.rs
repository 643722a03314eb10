//! Debounced, sequenced product search.
//!
//! Each call to [`SearchSession::search`] takes the next generation number.
//! A call whose generation is no longer the latest, either after the
//! debounce delay or once the CMS answers, returns
//! [`SearchOutcome::Superseded`] and its results are discarded. A slow
//! response to an old query can therefore never replace newer results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use miramar_core::Product;

use crate::catalog::Catalog;

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<Product>),
    /// A newer query was issued before this one completed.
    Superseded,
}

impl SearchOutcome {
    /// The products, or `None` when superseded.
    #[must_use]
    pub fn into_results(self) -> Option<Vec<Product>> {
        match self {
            SearchOutcome::Results(products) => Some(products),
            SearchOutcome::Superseded => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchSession {
    catalog: Catalog,
    debounce: Duration,
    generation: AtomicU64,
}

impl SearchSession {
    #[must_use]
    pub fn new(catalog: Catalog, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    /// Searches products by name and description after the debounce delay.
    ///
    /// A blank query returns no results immediately without contacting the
    /// CMS, and still supersedes any search in flight.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Results(Vec::new());
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if !self.is_current(generation) {
            tracing::debug!(query, generation, "search superseded during debounce");
            return SearchOutcome::Superseded;
        }

        let products = self.catalog.search_products(query).await;
        if !self.is_current(generation) {
            tracing::debug!(query, generation, "search superseded before response");
            return SearchOutcome::Superseded;
        }
        tracing::debug!(query, generation, results = products.len(), "search completed");
        SearchOutcome::Results(products)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
