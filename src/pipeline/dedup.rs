//! # Deduplicator
//!
//! Filters a batch of discovered detail addresses down to the ones worth
//! fetching. Two layers of filtering apply: literal duplicate addresses
//! within the batch are dropped first-seen-wins, then each address's
//! canonical key is checked against the keys already in the store. A known
//! key is consumed when it matches, so it skips exactly one target.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::canonical_key::CanonicalKey;
use crate::domain::key_codec::link_key;
use crate::infrastructure::store::{CsvWellStore, StoreError};

/// Outcome of filtering one listing batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterReport {
    /// Addresses that should be fetched, in discovery order.
    pub admitted: Vec<String>,
    /// Dropped because their key was already stored.
    pub skipped_known: u64,
    /// Dropped because the same literal address already appeared earlier in
    /// the batch.
    pub duplicate_addresses: u64,
    /// Dropped because the address did not decode to the six well fields.
    pub malformed: u64,
}

impl FilterReport {
    /// Number of addresses that entered the filter.
    #[must_use]
    pub fn discovered(&self) -> u64 {
        self.admitted.len() as u64 + self.skipped_known + self.duplicate_addresses + self.malformed
    }
}

/// Key-level duplicate filter seeded from the store.
pub struct Deduplicator {
    known_keys: HashSet<CanonicalKey>,
}

impl Deduplicator {
    #[must_use]
    pub fn new(known_keys: HashSet<CanonicalKey>) -> Self {
        Self { known_keys }
    }

    /// Seeds the filter with every key currently in the store.
    pub fn from_store(store: &CsvWellStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.load_known_keys()?))
    }

    /// Number of known keys not yet consumed.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known_keys.len()
    }

    /// Admits a key unless it is known; a known key is consumed by the
    /// match and skips only this one target.
    pub fn admit(&mut self, key: &CanonicalKey) -> bool {
        !self.known_keys.remove(key)
    }

    /// Filters one batch of discovered addresses.
    pub fn filter_new(&mut self, addresses: Vec<String>) -> FilterReport {
        let mut report = FilterReport::default();
        let mut seen = HashSet::new();

        for address in addresses {
            if !seen.insert(address.clone()) {
                report.duplicate_addresses += 1;
                continue;
            }
            match link_key(&address) {
                Ok(key) => {
                    if self.admit(&key) {
                        report.admitted.push(address);
                    } else {
                        debug!("Skipping known well: {}", key);
                        report.skipped_known += 1;
                    }
                }
                Err(error) => {
                    warn!("Dropping malformed link {}: {}", address, error);
                    report.malformed += 1;
                }
            }
        }
        report
    }
}
