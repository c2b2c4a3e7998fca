//! Snapshot sources. The mock source stands in for a market-data feed.

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::generator::MarketGenerator;
use crate::types::Snapshot;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

pub trait MarketSnapshotSource {
    fn fetch_market_snapshot(&mut self) -> Result<Snapshot, SourceError>;
}

pub struct MockMarketSource {
    generator: MarketGenerator,
    rng: StdRng,
}

impl MockMarketSource {
    /// A fixed seed makes the sequence of snapshots reproducible.
    pub fn new(generator: MarketGenerator, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { generator, rng }
    }
}

impl MarketSnapshotSource for MockMarketSource {
    fn fetch_market_snapshot(&mut self) -> Result<Snapshot, SourceError> {
        Ok(self.generator.generate(&mut self.rng, Utc::now()))
    }
}
