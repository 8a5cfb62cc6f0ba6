//! Aggregate figures for one scan.

use serde::{Deserialize, Serialize};

use crate::data::MarketSnapshot;

use super::engine::ScanResult;
use super::signal::{SignalResult, MAX_STRENGTH, MIN_STRENGTH};

/// Number of distinct strength ratings.
const STRENGTH_LEVELS: usize = (MAX_STRENGTH - MIN_STRENGTH + 1) as usize;

/// Summary statistics over a universe and the scan run on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanStatistics {
    pub total_scanned: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    /// Buy signal count per strength; index 0 is strength 1
    pub buy_by_strength: [usize; STRENGTH_LEVELS],
    /// Sell signal count per strength; index 0 is strength 1
    pub sell_by_strength: [usize; STRENGTH_LEVELS],
    /// Closed flat or up
    pub advancers: usize,
    /// Closed down
    pub decliners: usize,
    pub avg_afternoon_score: f64,
    pub avg_morning_score: f64,
}

fn histogram(signals: &[SignalResult]) -> [usize; STRENGTH_LEVELS] {
    let mut counts = [0; STRENGTH_LEVELS];
    for signal in signals {
        let strength = signal.strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
        counts[(strength - MIN_STRENGTH) as usize] += 1;
    }
    counts
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

impl ScanStatistics {
    /// Compute statistics for `snapshots` and the `result` scanned from them.
    ///
    /// Unscored snapshots count as 0 in the score averages.
    pub fn compute(snapshots: &[MarketSnapshot], result: &ScanResult) -> Self {
        let advancers = snapshots.iter().filter(|s| s.is_advancer()).count();

        Self {
            total_scanned: snapshots.len(),
            buy_signals: result.buy_signals.len(),
            sell_signals: result.sell_signals.len(),
            buy_by_strength: histogram(&result.buy_signals),
            sell_by_strength: histogram(&result.sell_signals),
            advancers,
            decliners: snapshots.len() - advancers,
            avg_afternoon_score: average(
                snapshots.iter().map(|s| s.afternoon_score.unwrap_or(0.0)),
            ),
            avg_morning_score: average(snapshots.iter().map(|s| s.morning_score.unwrap_or(0.0))),
        }
    }

    /// Buy signals rated `strength`.
    pub fn buys_with_strength(&self, strength: u8) -> usize {
        Self::lookup(&self.buy_by_strength, strength)
    }

    /// Sell signals rated `strength`.
    pub fn sells_with_strength(&self, strength: u8) -> usize {
        Self::lookup(&self.sell_by_strength, strength)
    }

    fn lookup(counts: &[usize; STRENGTH_LEVELS], strength: u8) -> usize {
        if (MIN_STRENGTH..=MAX_STRENGTH).contains(&strength) {
            counts[(strength - MIN_STRENGTH) as usize]
        } else {
            0
        }
    }
}
