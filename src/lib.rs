//! Spoken market briefs over synthetic Asia tech market and portfolio snapshots.

pub mod analytics;
pub mod brief;
pub mod config;
pub mod generator;
pub mod intent;
pub mod source;
pub mod state;
pub mod types;
pub mod utils;
pub mod voice;

pub use brief::generate_brief;
pub use generator::{generate_data, MarketGenerator};
pub use intent::{classify, BriefKind};
pub use types::{MarketData, PortfolioData, Snapshot};
