//! Property tests over arbitrary snapshots.

use bsjp_scanner::screener::{ScanOrchestrator, ScoreEngine, SignalBuilder};
use bsjp_scanner::MarketSnapshot;
use proptest::prelude::*;

prop_compose! {
    fn arb_snapshot()(
        close in 50.0f64..60_000.0,
        body in -0.05f64..0.05,
        wick in 0.0f64..0.05,
        volume in 0u64..200_000_000,
        avg_factor in 0.1f64..3.0,
        rsi in 0.0f64..100.0,
        sma_factor in 0.8f64..1.2,
        volatility in 0.0f64..10.0,
        change in -10.0f64..10.0,
        gap in -5.0f64..5.0,
    ) -> MarketSnapshot {
        let open = close * (1.0 + body);
        let mut s = MarketSnapshot::new("T0000", "Generated Ticker");
        s.open = open;
        s.close = close;
        s.high = open.max(close) * (1.0 + wick);
        s.low = open.min(close) * (1.0 - wick);
        s.prev_close = close / (1.0 + change / 100.0);
        s.volume = volume;
        s.avg_volume = (volume.max(1) as f64) * avg_factor;
        s.rsi = rsi;
        s.sma20 = close * sma_factor;
        s.ema9 = close;
        s.volatility = volatility;
        s.change_percent = change;
        s.gap_percent = gap;
        ScoreEngine::new().score(&mut s);
        s
    }
}

/// Universe with unique symbols in input order.
fn arb_universe(max: usize) -> impl Strategy<Value = Vec<MarketSnapshot>> {
    prop::collection::vec(arb_snapshot(), 0..max).prop_map(|mut snapshots| {
        for (i, s) in snapshots.iter_mut().enumerate() {
            s.symbol = format!("T{i:04}");
        }
        snapshots
    })
}

fn position(universe: &[MarketSnapshot], symbol: &str) -> usize {
    universe
        .iter()
        .position(|s| s.symbol == symbol)
        .unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn scores_stay_in_range(s in arb_snapshot()) {
        let afternoon = s.afternoon_score.unwrap();
        let morning = s.morning_score.unwrap();
        prop_assert!((0.0..=100.0).contains(&afternoon));
        prop_assert!((0.0..=100.0).contains(&morning));
    }

    #[test]
    fn strength_is_one_to_five(s in arb_snapshot()) {
        let builder = SignalBuilder::new();
        let buy = builder.build_buy_signal(&s);
        let sell = builder.build_sell_signal(&s);
        prop_assert!((1..=5).contains(&buy.strength));
        prop_assert!((1..=5).contains(&sell.strength));
    }

    #[test]
    fn scan_respects_gates_and_order(universe in arb_universe(40)) {
        let result = ScanOrchestrator::default().scan(&universe);

        for signal in &result.buy_signals {
            prop_assert!(signal.strength >= 2);
        }
        for signal in &result.sell_signals {
            prop_assert!(signal.strength >= 2);
        }

        for list in [&result.buy_signals, &result.sell_signals] {
            for pair in list.windows(2) {
                prop_assert!(pair[0].strength >= pair[1].strength);
                if pair[0].strength == pair[1].strength {
                    prop_assert!(
                        position(&universe, &pair[0].symbol) < position(&universe, &pair[1].symbol)
                    );
                }
            }
        }

        for signal in &result.buy_signals {
            let source = universe.iter().find(|s| s.symbol == signal.symbol).unwrap();
            prop_assert!(source.afternoon_score.unwrap() >= 50.0);
        }
        for signal in &result.sell_signals {
            let source = universe.iter().find(|s| s.symbol == signal.symbol).unwrap();
            prop_assert!(source.morning_score.unwrap() >= 50.0);
        }
    }

    #[test]
    fn scan_twice_is_identical(universe in arb_universe(20)) {
        let orchestrator = ScanOrchestrator::default();
        let first = orchestrator.scan(&universe);
        let second = orchestrator.scan(&universe);
        prop_assert_eq!(first.buy_signals, second.buy_signals);
        prop_assert_eq!(first.sell_signals, second.sell_signals);
    }
}
