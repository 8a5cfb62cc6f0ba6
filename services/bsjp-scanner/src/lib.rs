//! BSJP Scanner Library
//!
//! Simulated stock-signal scanner for the *Beli Sore Jual Pagi* (buy in the
//! afternoon, sell in the morning) overnight-gap strategy on IDX stocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      bsjp-scanner                            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │
//! │  │  Market Data │──▶│  Screener    │──▶│  Report      │      │
//! │  │  (generator) │   │  (scoring)   │   │  (tables)    │      │
//! │  └──────────────┘   └──────────────┘   └──────────────┘      │
//! │          ▲                  ▲                                │
//! │          └──── ScannerService (refresh / scan) ───           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Concepts
//!
//! - **Afternoon score**: how attractive a stock is to buy into the close
//! - **Morning score**: how likely it is to gap up at the next open
//! - **Strength**: 1-5 rating derived from the relevant score
//!
//! All market data is synthetic.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod data;
pub mod screener;
pub mod service;

pub use data::{MarketSnapshot, RandomMarketDataGenerator, SnapshotSource, Ticker};
pub use screener::{
    ReportFormat, Renderer, ScanOrchestrator, ScanResult, ScanStatistics, ScanThresholds,
    ScoreEngine, SignalBuilder, SignalResult, SignalType,
};
pub use service::ScannerService;
