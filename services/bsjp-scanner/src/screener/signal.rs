//! Directional trade signals built from scored snapshots.

use serde::{Deserialize, Serialize};

use crate::data::MarketSnapshot;

/// Lowest and highest strength rating.
pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 5;

/// Smallest risk (%) used as the buy-side R:R denominator.
const MIN_RISK_PERCENT: f64 = 0.1;

/// Fixed risk (%) assumed for sell-side R:R.
const SELL_ASSUMED_RISK_PERCENT: f64 = 2.0;

/// Signal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    /// Buy near the close
    BuyAfternoon,
    /// Sell at the next open
    SellMorning,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuyAfternoon => write!(f, "BUY (afternoon)"),
            Self::SellMorning => write!(f, "SELL (morning)"),
        }
    }
}

/// A directional signal for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub symbol: String,
    pub name: String,
    pub signal_type: SignalType,
    /// Last close
    pub current_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    /// Expected move to target (%), may be negative
    pub potential_gain: f64,
    /// May be negative
    pub risk_reward: f64,
    /// Confidence rating (1-5)
    pub strength: u8,
    /// Plain-text narrative, no styling
    pub reason: String,
}

/// Map a 0-100 score to a 1-5 rating. Missing scores rate as 0.
pub fn strength_from_score(score: Option<f64>) -> u8 {
    let raw = (score.unwrap_or(0.0) / 20.0).round();
    raw.clamp(f64::from(MIN_STRENGTH), f64::from(MAX_STRENGTH)) as u8
}

/// Converts scored snapshots into signals. Total: never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalBuilder;

impl SignalBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a buy-in-the-afternoon signal.
    pub fn build_buy_signal(&self, s: &MarketSnapshot) -> SignalResult {
        let current = s.close;
        let target = current * (1.0 + (s.volatility * 0.5).max(0.5) / 100.0);
        let stop_loss = s.low * 0.99;

        let potential_gain = (target - current) / current * 100.0;
        let risk = (current - stop_loss) / current * 100.0;
        let risk_reward = potential_gain / risk.max(MIN_RISK_PERCENT);

        let mut reason = format!("RSI={:.1}", s.rsi);
        if s.rsi < 40.0 {
            reason.push_str(" (oversold)");
        }
        reason.push_str(&format!(", Vol={:.0}M", s.volume as f64 / 1_000_000.0));
        if s.volume as f64 > s.avg_volume {
            reason.push_str(" (above avg)");
        }
        reason.push_str(&format!(", Gap={:.1}%", s.gap_percent));

        SignalResult {
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            signal_type: SignalType::BuyAfternoon,
            current_price: current,
            target_price: target,
            stop_loss,
            potential_gain,
            risk_reward,
            strength: strength_from_score(s.afternoon_score),
            reason,
        }
    }

    /// Build a sell-in-the-morning signal.
    ///
    /// R:R divides the expected gap by a fixed 2% risk and ignores the
    /// stop-loss distance.
    pub fn build_sell_signal(&self, s: &MarketSnapshot) -> SignalResult {
        let current = s.close;
        let target = current * (1.0 + s.gap_percent / 100.0);
        let stop_loss = current * 0.98;

        let potential_gain = s.gap_percent;
        let risk_reward = potential_gain / SELL_ASSUMED_RISK_PERCENT;

        let mut reason = format!("RSI={:.1}", s.rsi);
        if s.rsi > 60.0 {
            reason.push_str(" (overbought)");
        }
        reason.push_str(&format!(
            ", Expected gap={:.1}%, R:R={:.2}",
            s.gap_percent, risk_reward
        ));

        SignalResult {
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            signal_type: SignalType::SellMorning,
            current_price: current,
            target_price: target,
            stop_loss,
            potential_gain,
            risk_reward,
            strength: strength_from_score(s.morning_score),
            reason,
        }
    }
}
