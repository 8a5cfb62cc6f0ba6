//! Scan orchestration.
//!
//! Runs every snapshot through the score gate, builds signals for the
//! survivors, drops weak signals and ranks what is left.

use bsjp_common::config::ScannerConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::data::MarketSnapshot;

use super::funnel::Funnel;
use super::signal::{SignalBuilder, SignalResult};

// ============================================================================
// Thresholds
// ============================================================================

/// Gates applied during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanThresholds {
    /// Minimum composite score before a signal is built
    pub min_score: f64,
    /// Minimum strength for a built signal to be kept
    pub min_strength: u8,
}

impl Default for ScanThresholds {
    fn default() -> Self {
        Self {
            min_score: 50.0,
            min_strength: 2,
        }
    }
}

impl From<&ScannerConfig> for ScanThresholds {
    fn from(config: &ScannerConfig) -> Self {
        Self {
            min_score: config.min_score,
            min_strength: config.min_strength,
        }
    }
}

// ============================================================================
// Scan Result
// ============================================================================

/// Outcome of one pass over the universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Scan ID (timestamp-based)
    pub id: String,
    /// Buy signals, strongest first
    pub buy_signals: Vec<SignalResult>,
    /// Sell signals, strongest first
    pub sell_signals: Vec<SignalResult>,
    pub buy_funnel: Funnel,
    pub sell_funnel: Funnel,
    /// Snapshots scanned
    pub total_scanned: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_secs: f64,
}

impl ScanResult {
    /// Get the top N buy signals.
    pub fn top_buys(&self, n: usize) -> &[SignalResult] {
        &self.buy_signals[..n.min(self.buy_signals.len())]
    }

    /// Get the top N sell signals.
    pub fn top_sells(&self, n: usize) -> &[SignalResult] {
        &self.sell_signals[..n.min(self.sell_signals.len())]
    }

    /// Summary string for logging.
    pub fn summary(&self) -> String {
        format!(
            "Scanned {} stocks in {:.3}s: {} buy, {} sell signals",
            self.total_scanned,
            self.duration_secs,
            self.buy_signals.len(),
            self.sell_signals.len()
        )
    }
}

// ============================================================================
// Scan Orchestrator
// ============================================================================

/// Turns a universe of scored snapshots into two ranked signal lists.
///
/// Pure with respect to its input: scanning the same snapshots twice yields
/// the same lists.
#[derive(Debug, Clone, Default)]
pub struct ScanOrchestrator {
    thresholds: ScanThresholds,
    builder: SignalBuilder,
}

impl ScanOrchestrator {
    pub fn new(thresholds: ScanThresholds) -> Self {
        Self {
            thresholds,
            builder: SignalBuilder::new(),
        }
    }

    pub fn thresholds(&self) -> &ScanThresholds {
        &self.thresholds
    }

    fn passes_score(&self, score: Option<f64>) -> bool {
        score.unwrap_or(0.0) >= self.thresholds.min_score
    }

    /// Scan the universe in input order.
    pub fn scan(&self, universe: &[MarketSnapshot]) -> ScanResult {
        let started_at = Utc::now();
        let id = format!("scan_{}", started_at.format("%Y%m%d_%H%M%S%.3f"));

        let mut buy_signals = Vec::new();
        let mut sell_signals = Vec::new();
        let mut buy_scored = 0;
        let mut sell_scored = 0;

        let unscored = universe.iter().filter(|s| !s.is_scored()).count();
        if unscored > 0 {
            warn!(unscored, "Unscored snapshots count as zero");
        }

        for snapshot in universe {
            if self.passes_score(snapshot.afternoon_score) {
                buy_scored += 1;
                let signal = self.builder.build_buy_signal(snapshot);
                if signal.strength >= self.thresholds.min_strength {
                    buy_signals.push(signal);
                } else {
                    debug!(symbol = %snapshot.symbol, strength = signal.strength, "Buy signal too weak");
                }
            }

            if self.passes_score(snapshot.morning_score) {
                sell_scored += 1;
                let signal = self.builder.build_sell_signal(snapshot);
                if signal.strength >= self.thresholds.min_strength {
                    sell_signals.push(signal);
                } else {
                    debug!(symbol = %snapshot.symbol, strength = signal.strength, "Sell signal too weak");
                }
            }
        }

        // Stable: equal strengths keep universe order.
        buy_signals.sort_by(|a, b| b.strength.cmp(&a.strength));
        sell_signals.sort_by(|a, b| b.strength.cmp(&a.strength));

        let total = universe.len();
        let completed_at = Utc::now();
        let duration_secs = (completed_at - started_at).num_microseconds().unwrap_or(0) as f64 / 1e6;

        let result = ScanResult {
            id,
            buy_funnel: Funnel::from_counts(total, buy_scored, buy_signals.len()),
            sell_funnel: Funnel::from_counts(total, sell_scored, sell_signals.len()),
            buy_signals,
            sell_signals,
            total_scanned: total,
            started_at,
            completed_at,
            duration_secs,
        };

        info!(scan_id = %result.id, "{}", result.summary());
        result
    }
}
