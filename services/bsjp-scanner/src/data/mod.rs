//! Market data module.
//!
//! Defines the per-ticker snapshot the screener works on and the
//! [`SnapshotSource`] seam that produces it. The only bundled source is the
//! synthetic [`RandomMarketDataGenerator`].

mod generator;

pub use bsjp_common::config::Ticker;
pub use generator::RandomMarketDataGenerator;

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ============================================================================
// Market Snapshot
// ============================================================================

/// One day of price action for a single ticker plus its precomputed
/// indicators and composite scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Exchange code (e.g., "BBCA")
    pub symbol: String,
    /// Display name
    pub name: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub prev_close: f64,
    /// Traded shares
    pub volume: u64,
    /// Close vs previous close (%)
    pub change_percent: f64,
    /// Average daily volume
    pub avg_volume: f64,
    /// Relative Strength Index (0-100)
    pub rsi: f64,
    /// 20-period simple moving average
    pub sma20: f64,
    /// 9-period exponential moving average
    pub ema9: f64,
    /// Intraday volatility (%)
    pub volatility: f64,
    /// Overnight gap (%)
    pub gap_percent: f64,
    /// Buy-in-the-afternoon score (0-100), `None` until scored
    pub afternoon_score: Option<f64>,
    /// Sell-in-the-morning score (0-100), `None` until scored
    pub morning_score: Option<f64>,
}

impl MarketSnapshot {
    /// Create an unscored snapshot with every numeric field zeroed.
    ///
    /// Mostly useful for building fixtures field by field.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            prev_close: 0.0,
            volume: 0,
            change_percent: 0.0,
            avg_volume: 0.0,
            rsi: 0.0,
            sma20: 0.0,
            ema9: 0.0,
            volatility: 0.0,
            gap_percent: 0.0,
            afternoon_score: None,
            morning_score: None,
        }
    }

    /// Whether both composite scores have been computed.
    pub fn is_scored(&self) -> bool {
        self.afternoon_score.is_some() && self.morning_score.is_some()
    }

    /// Whether the candle honours high >= max(open, close) and low <= min(open, close).
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }

    /// Closed at or above the previous close.
    pub fn is_advancer(&self) -> bool {
        self.change_percent >= 0.0
    }
}

// ============================================================================
// Snapshot Source
// ============================================================================

/// Producer of scored market snapshots.
///
/// A real data feed can replace the synthetic generator by implementing
/// this trait. Implementations are responsible for sanitizing their own
/// data and must return snapshots that have already been scored.
pub trait SnapshotSource {
    /// Source name for logging (e.g., "random").
    fn name(&self) -> &str;

    /// Produce a fresh snapshot for one ticker.
    fn snapshot(&mut self, ticker: &Ticker) -> Result<MarketSnapshot>;
}
