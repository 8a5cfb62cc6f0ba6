//! Synthetic market data.
//!
//! Fabricates a plausible daily candle with indicators for any ticker.
//! The numbers carry no statistical meaning; they exist so the screener
//! has something to rank.

use anyhow::Result;
use bsjp_common::config::{GeneratorConfig, NumericRange};
use bsjp_common::{ResultExt, Validate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{MarketSnapshot, SnapshotSource, Ticker};
use crate::screener::ScoreEngine;

/// Half of the 3% intraday range added above and below the candle body.
const WICK_FRACTION: f64 = 0.03 * 0.5;

/// Random snapshot generator with an owned, seedable random source.
pub struct RandomMarketDataGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    engine: ScoreEngine,
}

impl RandomMarketDataGenerator {
    /// Create a generator. Uses `config.seed` when set, OS entropy otherwise.
    pub fn new(config: GeneratorConfig) -> bsjp_common::Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create with a specific seed for reproducible runs.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> bsjp_common::Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    // Every range is sampled half-open, so each must be non-empty.
    fn with_rng(config: GeneratorConfig, rng: StdRng) -> bsjp_common::Result<Self> {
        config.validate().context("Invalid generator configuration")?;
        Ok(Self {
            config,
            rng,
            engine: ScoreEngine::new(),
        })
    }

    fn draw(&mut self, range: NumericRange) -> f64 {
        self.rng.gen_range(range.min..range.max)
    }

    /// Generate one scored snapshot for `symbol`.
    pub fn generate(&mut self, symbol: &str, name: &str) -> MarketSnapshot {
        let cfg = self.config.clone();
        let mut data = MarketSnapshot::new(symbol, name);

        data.prev_close = self.draw(cfg.price_range);
        data.change_percent = self.draw(cfg.change_range);
        data.close = data.prev_close * (1.0 + data.change_percent / 100.0);

        let wick = (data.close * WICK_FRACTION).abs();
        data.open = data.close + self.draw(cfg.change_range) / 100.0 * data.close;
        data.high = data.open.max(data.close) + wick;
        data.low = data.open.min(data.close) - wick;

        data.volume = self.draw(cfg.volume_range) as u64;
        // 0.8x to 1.2x of today's volume
        let spread = cfg.change_range.max - cfg.change_range.min;
        let position = (self.draw(cfg.change_range) - cfg.change_range.min) / spread;
        data.avg_volume = data.volume as f64 * (0.8 + position * 0.4);

        data.rsi = self.draw(cfg.rsi_range);
        data.sma20 = data.close * (0.95 + (self.draw(cfg.rsi_range) - 50.0) / 500.0);
        data.ema9 = data.close * (0.98 + (self.draw(cfg.rsi_range) - 50.0) / 1000.0);
        data.volatility = self.draw(cfg.volatility_range);
        data.gap_percent = self.draw(cfg.gap_range);

        self.engine.score(&mut data);
        data
    }
}

impl SnapshotSource for RandomMarketDataGenerator {
    fn name(&self) -> &str {
        "random"
    }

    fn snapshot(&mut self, ticker: &Ticker) -> Result<MarketSnapshot> {
        Ok(self.generate(&ticker.symbol, &ticker.name))
    }
}
