//! Scanner service.
//!
//! Owns the universe, the snapshot source and the latest snapshots, and
//! exposes the two operations a front end needs: refresh and scan.

use anyhow::{Context, Result};
use bsjp_common::config::Config;
use bsjp_common::Error;
use tracing::{debug, info, warn};

use crate::data::{MarketSnapshot, RandomMarketDataGenerator, SnapshotSource, Ticker};
use crate::screener::{ScanOrchestrator, ScanResult, ScanStatistics, ScanThresholds};

/// Stateful front door to the screener.
pub struct ScannerService {
    universe: Vec<Ticker>,
    source: Box<dyn SnapshotSource>,
    orchestrator: ScanOrchestrator,
    snapshots: Vec<MarketSnapshot>,
}

impl ScannerService {
    /// Create a service and load the first set of snapshots.
    pub fn new(
        universe: Vec<Ticker>,
        source: Box<dyn SnapshotSource>,
        thresholds: ScanThresholds,
    ) -> Result<Self> {
        let mut service = Self {
            universe,
            source,
            orchestrator: ScanOrchestrator::new(thresholds),
            snapshots: Vec::new(),
        };
        service.refresh()?;
        Ok(service)
    }

    /// Create a service backed by the random generator, as configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let source = RandomMarketDataGenerator::new(config.generator.clone())?;
        Self::new(
            config.scanner.universe.clone(),
            Box::new(source),
            ScanThresholds::from(&config.scanner),
        )
    }

    /// Regenerate every ticker's snapshot.
    ///
    /// The previous snapshots are replaced only if every ticker succeeds.
    pub fn refresh(&mut self) -> Result<()> {
        let mut fresh = Vec::with_capacity(self.universe.len());
        for ticker in &self.universe {
            let snapshot = self.source.snapshot(ticker).with_context(|| {
                format!(
                    "Failed to refresh {} from {} source",
                    ticker.symbol,
                    self.source.name()
                )
            })?;
            if !snapshot.is_consistent() {
                warn!(
                    symbol = %ticker.symbol,
                    source = self.source.name(),
                    "Candle range does not cover open and close"
                );
            }
            fresh.push(snapshot);
        }

        debug!(source = self.source.name(), count = fresh.len(), "Snapshots generated");
        self.snapshots = fresh;
        info!(tickers = self.snapshots.len(), "Market data refreshed");
        Ok(())
    }

    /// Scan the current snapshots.
    pub fn scan(&self) -> ScanResult {
        self.orchestrator.scan(&self.snapshots)
    }

    /// Statistics for `result` over the current snapshots.
    pub fn statistics(&self, result: &ScanResult) -> ScanStatistics {
        ScanStatistics::compute(&self.snapshots, result)
    }

    pub fn snapshots(&self) -> &[MarketSnapshot] {
        &self.snapshots
    }

    /// Current snapshot for one symbol (case-insensitive).
    pub fn snapshot(&self, symbol: &str) -> bsjp_common::Result<&MarketSnapshot> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::InvalidInput("ticker symbol is empty".into()));
        }

        self.snapshots
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| Error::UnknownTicker(symbol.to_string()))
    }

    pub fn universe(&self) -> &[Ticker] {
        &self.universe
    }

    pub fn thresholds(&self) -> &ScanThresholds {
        self.orchestrator.thresholds()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsjp_common::config::{GeneratorConfig, NumericRange};

    struct FailingSource {
        fail_on: String,
        calls: usize,
    }

    impl SnapshotSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn snapshot(&mut self, ticker: &Ticker) -> Result<MarketSnapshot> {
            self.calls += 1;
            if ticker.symbol == self.fail_on && self.calls > 2 {
                anyhow::bail!("feed unavailable");
            }
            let mut s = MarketSnapshot::new(ticker.symbol.clone(), ticker.name.clone());
            s.close = 100.0;
            s.afternoon_score = Some(0.0);
            s.morning_score = Some(0.0);
            Ok(s)
        }
    }

    fn universe() -> Vec<Ticker> {
        vec![
            Ticker::new("BBCA", "Bank Central Asia"),
            Ticker::new("TLKM", "Telkom Indonesia"),
        ]
    }

    #[test]
    fn test_new_loads_snapshots() {
        let source = RandomMarketDataGenerator::with_seed(GeneratorConfig::default(), 1).unwrap();
        let service =
            ScannerService::new(universe(), Box::new(source), ScanThresholds::default()).unwrap();

        assert_eq!(service.snapshots().len(), 2);
        assert_eq!(service.snapshots()[0].symbol, "BBCA");
        assert_eq!(service.snapshots()[1].symbol, "TLKM");
        assert_eq!(service.source_name(), "random");
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshots() {
        let source = FailingSource {
            fail_on: "TLKM".into(),
            calls: 0,
        };
        let mut service =
            ScannerService::new(universe(), Box::new(source), ScanThresholds::default()).unwrap();
        let before = service.snapshots().to_vec();

        let err = service.refresh().unwrap_err();
        assert!(err.to_string().contains("Failed to refresh TLKM from failing source"));
        assert_eq!(service.snapshots(), before.as_slice());
    }

    #[test]
    fn test_snapshot_lookup() {
        let source = RandomMarketDataGenerator::with_seed(GeneratorConfig::default(), 2).unwrap();
        let service =
            ScannerService::new(universe(), Box::new(source), ScanThresholds::default()).unwrap();

        assert_eq!(service.snapshot("tlkm").unwrap().symbol, "TLKM");
        assert_eq!(service.snapshot(" BBCA ").unwrap().symbol, "BBCA");
        let err = service.snapshot("ZZZZ").unwrap_err();
        assert!(matches!(err, Error::UnknownTicker(ref s) if s == "ZZZZ"));
        let err = service.snapshot("  ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.generator.seed = Some(5);
        config.scanner.min_strength = 3;

        let service = ScannerService::from_config(&config).unwrap();
        assert_eq!(service.universe().len(), 30);
        assert_eq!(service.snapshots().len(), 30);
        assert_eq!(service.thresholds().min_strength, 3);
    }

    #[test]
    fn test_from_config_rejects_empty_range() {
        let mut config = Config::default();
        config.generator.gap_range = NumericRange::new(3.0, 3.0);

        let err = ScannerService::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_from_config_rejects_price_collapsing_change_range() {
        let mut config = Config::default();
        config.generator.change_range = NumericRange::new(-99.0, -98.0);
        assert!(ScannerService::from_config(&config).is_err());
    }
}
