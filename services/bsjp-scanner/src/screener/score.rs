//! Composite scoring.
//!
//! Two independent 0-100 scores are derived from threshold rules on a
//! snapshot's indicators:
//!
//! - **Afternoon (buy)**: oversold, below its SMA20, heavy volume, moderate
//!   volatility, a mild red day and a positive gap.
//! - **Morning (sell)**: overbought, extended above its SMA20, heavy volume on
//!   a green day and a strong gap.
//!
//! Within one rule, tiers are ordered guards: the first matching tier wins.

use tracing::debug;

use crate::data::MarketSnapshot;

/// Upper bound for both composite scores.
pub const MAX_SCORE: f64 = 100.0;

/// Stateless scoring rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute and store both scores on `snapshot`.
    pub fn score(&self, snapshot: &mut MarketSnapshot) {
        let afternoon = self.afternoon_score(snapshot);
        let morning = self.morning_score(snapshot);
        snapshot.afternoon_score = Some(afternoon);
        snapshot.morning_score = Some(morning);

        debug!(
            symbol = %snapshot.symbol,
            afternoon_score = afternoon,
            morning_score = morning,
            "Snapshot scored"
        );
    }

    /// Buy-in-the-afternoon score.
    pub fn afternoon_score(&self, s: &MarketSnapshot) -> f64 {
        let mut score: f64 = 0.0;

        score += if s.rsi < 30.0 {
            25.0
        } else if s.rsi < 40.0 {
            15.0
        } else if s.rsi < 50.0 {
            5.0
        } else {
            0.0
        };

        score += if s.close < s.sma20 * 0.98 {
            20.0
        } else if s.close < s.sma20 {
            10.0
        } else {
            0.0
        };

        let volume = s.volume as f64;
        score += if volume > s.avg_volume * 1.5 {
            15.0
        } else if volume > s.avg_volume {
            8.0
        } else {
            0.0
        };

        if s.volatility > 2.0 && s.volatility < 4.0 {
            score += 15.0;
        }

        if s.change_percent > -3.0 && s.change_percent < -0.5 {
            score += 15.0;
        }

        if s.gap_percent > 0.5 {
            score += 10.0;
        }

        score.min(MAX_SCORE)
    }

    /// Sell-in-the-morning score.
    pub fn morning_score(&self, s: &MarketSnapshot) -> f64 {
        let mut score: f64 = 0.0;

        score += if s.rsi > 70.0 {
            25.0
        } else if s.rsi > 60.0 {
            15.0
        } else if s.rsi > 50.0 {
            5.0
        } else {
            0.0
        };

        score += if s.close > s.sma20 * 1.02 {
            20.0
        } else if s.close > s.sma20 {
            10.0
        } else {
            0.0
        };

        if s.volume as f64 > s.avg_volume * 1.3 && s.change_percent > 0.0 {
            score += 15.0;
        }

        score += if s.gap_percent > 1.0 {
            20.0
        } else if s.gap_percent > 0.5 {
            10.0
        } else {
            0.0
        };

        if s.change_percent > 1.0 {
            score += 10.0;
        }

        score.min(MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    /// Snapshot that triggers no rule on either side.
    fn neutral() -> MarketSnapshot {
        let mut s = MarketSnapshot::new("TEST", "Test Corp");
        s.rsi = 50.0;
        s.close = 1000.0;
        s.sma20 = 1000.0;
        s.volume = 1_000_000;
        s.avg_volume = 1_000_000.0;
        s.volatility = 1.0;
        s.change_percent = 0.0;
        s.gap_percent = 0.0;
        s
    }

    #[test]
    fn test_neutral_scores_zero() {
        let engine = ScoreEngine::new();
        let s = neutral();
        assert_eq!(engine.afternoon_score(&s), 0.0);
        assert_eq!(engine.morning_score(&s), 0.0);
    }

    #[test]
    fn test_afternoon_full_house() {
        let mut s = MarketSnapshot::new("BBCA", "Bank Central Asia");
        s.rsi = 25.0;
        s.close = 9800.0;
        s.sma20 = 10200.0;
        s.volume = 2_000_000;
        s.avg_volume = 1_000_000.0;
        s.volatility = 3.0;
        s.change_percent = -1.5;
        s.gap_percent = 0.8;

        assert_eq!(ScoreEngine::new().afternoon_score(&s), 100.0);
    }

    #[test]
    fn test_morning_scenario() {
        let mut s = MarketSnapshot::new("TLKM", "Telkom Indonesia");
        s.rsi = 75.0;
        s.close = 10500.0;
        s.sma20 = 10000.0;
        s.volume = 1_300_001;
        s.avg_volume = 1_000_000.0;
        s.change_percent = 2.0;
        s.gap_percent = 1.5;

        assert_eq!(ScoreEngine::new().morning_score(&s), 90.0);

        // The volume rule is strict: exactly 1.3x average does not count.
        s.volume = 1_300_000;
        assert_eq!(ScoreEngine::new().morning_score(&s), 75.0);
    }

    #[test]
    fn test_score_sets_both_fields() {
        let mut s = neutral();
        s.rsi = 35.0;
        ScoreEngine::new().score(&mut s);
        assert_eq!(s.afternoon_score, Some(15.0));
        assert_eq!(s.morning_score, Some(0.0));
    }

    #[test_case(29.9, 25.0 ; "below 30")]
    #[test_case(30.0, 15.0 ; "exactly 30")]
    #[test_case(39.9, 15.0 ; "below 40")]
    #[test_case(45.0, 5.0 ; "below 50")]
    #[test_case(50.0, 0.0 ; "at 50")]
    fn test_afternoon_rsi_tiers(rsi: f64, expected: f64) {
        let mut s = neutral();
        s.rsi = rsi;
        assert_eq!(ScoreEngine::new().afternoon_score(&s), expected);
    }

    #[test_case(980.0, 10.0 ; "just below sma")]
    #[test_case(979.0, 20.0 ; "more than 2 percent below")]
    #[test_case(1000.0, 0.0 ; "at sma")]
    fn test_afternoon_sma_tiers(close: f64, expected: f64) {
        let mut s = neutral();
        s.close = close;
        assert_eq!(ScoreEngine::new().afternoon_score(&s), expected);
    }

    #[test_case(1_500_001, 15.0 ; "above 1.5x")]
    #[test_case(1_500_000, 8.0 ; "exactly 1.5x")]
    #[test_case(1_000_001, 8.0 ; "above average")]
    fn test_afternoon_volume_tiers(volume: u64, expected: f64) {
        let mut s = neutral();
        s.volume = volume;
        assert_eq!(ScoreEngine::new().afternoon_score(&s), expected);
    }

    #[test_case(2.0, 0.0 ; "lower bound excluded")]
    #[test_case(3.0, 15.0 ; "inside")]
    #[test_case(4.0, 0.0 ; "upper bound excluded")]
    fn test_afternoon_volatility_window(volatility: f64, expected: f64) {
        let mut s = neutral();
        s.volatility = volatility;
        assert_eq!(ScoreEngine::new().afternoon_score(&s), expected);
    }

    #[test_case(-3.0, 0.0 ; "minus three excluded")]
    #[test_case(-1.0, 15.0 ; "mild red day")]
    #[test_case(-0.5, 0.0 ; "minus half excluded")]
    fn test_afternoon_change_window(change: f64, expected: f64) {
        let mut s = neutral();
        s.change_percent = change;
        assert_eq!(ScoreEngine::new().afternoon_score(&s), expected);
    }

    #[test_case(70.1, 25.0 ; "above 70")]
    #[test_case(70.0, 15.0 ; "exactly 70")]
    #[test_case(55.0, 5.0 ; "above 50")]
    fn test_morning_rsi_tiers(rsi: f64, expected: f64) {
        let mut s = neutral();
        s.rsi = rsi;
        assert_eq!(ScoreEngine::new().morning_score(&s), expected);
    }

    #[test_case(1.01, 20.0 ; "above 1")]
    #[test_case(1.0, 10.0 ; "exactly 1")]
    #[test_case(0.6, 10.0 ; "above half")]
    #[test_case(0.5, 0.0 ; "exactly half")]
    fn test_morning_gap_tiers(gap: f64, expected: f64) {
        let mut s = neutral();
        s.gap_percent = gap;
        assert_eq!(ScoreEngine::new().morning_score(&s), expected);
    }

    #[test]
    fn test_morning_volume_needs_green_day() {
        let mut s = neutral();
        s.volume = 2_000_000;
        s.change_percent = 0.0;
        assert_eq!(ScoreEngine::new().morning_score(&s), 0.0);

        s.change_percent = 0.5;
        assert_eq!(ScoreEngine::new().morning_score(&s), 15.0);
    }

    #[test]
    fn test_morning_maximum() {
        let mut s = neutral();
        s.rsi = 80.0;
        s.close = 1100.0;
        s.volume = 2_000_000;
        s.change_percent = 3.0;
        s.gap_percent = 2.0;
        assert_eq!(ScoreEngine::new().morning_score(&s), 90.0);
        assert!(ScoreEngine::new().morning_score(&s) <= MAX_SCORE);
    }
}
