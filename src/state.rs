//! Dashboard state. Holds the latest snapshot; refresh replaces it wholesale.

use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{info, warn};

use crate::brief::generate_brief;
use crate::source::{MarketSnapshotSource, SourceError};
use crate::types::Snapshot;

#[derive(Debug, Default)]
pub struct DashboardState {
    /// Latest complete snapshot; `None` until the first refresh.
    snapshot: Option<Arc<Snapshot>>,
    last_update: Option<DateTime<Local>>,
    refresh_count: u64,
}

impl DashboardState {
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.clone()
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Pull a new snapshot. On failure the previous snapshot stays in place.
    pub fn refresh<S: MarketSnapshotSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(), SourceError> {
        match source.fetch_market_snapshot() {
            Ok(snap) => {
                self.snapshot = Some(Arc::new(snap));
                let now = Local::now();
                self.last_update = Some(now);
                self.refresh_count += 1;
                info!(
                    "Market data updated: {} (refresh #{})",
                    now.format("%H:%M:%S"),
                    self.refresh_count
                );
                Ok(())
            }
            Err(e) => {
                warn!("Snapshot refresh failed: {:#}", e);
                Err(e)
            }
        }
    }

    pub fn brief(&self, query: &str) -> String {
        let snap = self.snapshot.as_deref();
        generate_brief(
            query,
            snap.map(|s| &s.portfolio),
            snap.map(|s| &s.market),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::DATA_UNAVAILABLE;
    use crate::generator::MarketGenerator;
    use crate::source::MockMarketSource;

    struct DownFeed;

    impl MarketSnapshotSource for DownFeed {
        fn fetch_market_snapshot(&mut self) -> Result<Snapshot, SourceError> {
            Err(SourceError::Unavailable("maintenance".into()))
        }
    }

    #[test]
    fn brief_before_first_refresh_apologizes() {
        let st = DashboardState::default();
        assert!(st.snapshot().is_none());
        assert_eq!(st.brief("give me a brief"), DATA_UNAVAILABLE);
    }

    #[test]
    fn refresh_replaces_snapshot() {
        let mut st = DashboardState::default();
        let mut src = MockMarketSource::new(MarketGenerator::default(), Some(5));
        st.refresh(&mut src).unwrap();
        let first = st.snapshot().unwrap();
        st.refresh(&mut src).unwrap();
        let second = st.snapshot().unwrap();
        assert_eq!(st.refresh_count(), 2);
        assert!(st.last_update().is_some());
        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(st.brief("overview"), DATA_UNAVAILABLE);
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut st = DashboardState::default();
        let mut src = MockMarketSource::new(MarketGenerator::default(), Some(5));
        st.refresh(&mut src).unwrap();
        let before = st.snapshot().unwrap();
        assert!(st.refresh(&mut DownFeed).is_err());
        assert!(Arc::ptr_eq(&before, &st.snapshot().unwrap()));
        assert_eq!(st.refresh_count(), 1);
    }
}
