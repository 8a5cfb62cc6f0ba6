//! BSJP screener.
//!
//! Ranks candidates for the overnight-gap trade: buy near the close,
//! sell at the next open.
//!
//! # Pipeline
//!
//! ```text
//! SnapshotSource ──▶ ScoreEngine ──▶ ScanOrchestrator ──▶ Renderer
//!   (snapshot)      (two scores)    score gate            (tables / JSON)
//!                                   SignalBuilder
//!                                   strength gate
//!                                   stable sort
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use bsjp_scanner::screener::{ScanOrchestrator, ScanThresholds};
//!
//! let orchestrator = ScanOrchestrator::new(ScanThresholds::default());
//! let result = orchestrator.scan(&snapshots);
//! for signal in result.top_buys(5) {
//!     println!("{} {}", signal.symbol, signal.strength);
//! }
//! ```

pub mod engine;
pub mod funnel;
pub mod report;
pub mod score;
pub mod signal;
pub mod statistics;

pub use engine::{ScanOrchestrator, ScanResult, ScanThresholds};
pub use funnel::{FilterResult, FilterStage, Funnel};
pub use report::{ReportFormat, Renderer, ScanReport};
pub use score::ScoreEngine;
pub use signal::{SignalBuilder, SignalResult, SignalType};
pub use statistics::ScanStatistics;
