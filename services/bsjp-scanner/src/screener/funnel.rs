//! Per-direction filter funnel bookkeeping.

use serde::{Deserialize, Serialize};

// ============================================================================
// Filter Stage
// ============================================================================

/// Stage of the scan funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterStage {
    /// Input stage (whole universe)
    Input,
    /// Composite score at or above the minimum
    ScoreGate,
    /// Built signal strength at or above the minimum
    StrengthGate,
}

impl std::fmt::Display for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::ScoreGate => write!(f, "Score gate"),
            Self::StrengthGate => write!(f, "Strength gate"),
        }
    }
}

// ============================================================================
// Filter Result
// ============================================================================

/// Result of a filtering stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Stage name
    pub stage: FilterStage,
    /// Number of stocks that passed this stage
    pub passed: usize,
    /// Number of stocks eliminated at this stage
    pub eliminated: usize,
    /// Elimination rate (%)
    pub elimination_rate: f64,
}

impl FilterResult {
    pub fn new(stage: FilterStage, input_count: usize, passed_count: usize) -> Self {
        let eliminated = input_count.saturating_sub(passed_count);
        let elimination_rate = if input_count > 0 {
            (eliminated as f64 / input_count as f64) * 100.0
        } else {
            0.0
        };

        Self {
            stage,
            passed: passed_count,
            eliminated,
            elimination_rate,
        }
    }
}

/// Funnel for one signal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    pub stages: Vec<FilterResult>,
}

impl Funnel {
    /// Build the three-stage funnel from raw counts.
    pub fn from_counts(input: usize, score_passed: usize, strength_passed: usize) -> Self {
        Self {
            stages: vec![
                FilterResult::new(FilterStage::Input, input, input),
                FilterResult::new(FilterStage::ScoreGate, input, score_passed),
                FilterResult::new(FilterStage::StrengthGate, score_passed, strength_passed),
            ],
        }
    }

    /// Count that survived the final stage.
    pub fn passed(&self) -> usize {
        self.stages.last().map_or(0, |s| s.passed)
    }

    pub fn stage(&self, stage: FilterStage) -> Option<&FilterResult> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}
