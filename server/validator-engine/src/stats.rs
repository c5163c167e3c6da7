//! Process-wide validation counters.
//!
//! Counters are atomic so concurrent batch validation never loses updates;
//! they are monotonically non-decreasing and reset only on process restart.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::RiskLevel;

/// Shared mutable statistics aggregator. One `record` call per validation.
#[derive(Debug, Default)]
pub struct ValidatorStats {
  files_validated: AtomicU64,
  files_passed: AtomicU64,
  files_failed: AtomicU64,
  high_risk_count: AtomicU64,
}

/// Point-in-time copy of the counters, serializable for the CLI and API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
  pub files_validated: u64,
  pub files_passed: u64,
  pub files_failed: u64,
  pub high_risk_count: u64,
}

impl ValidatorStats {
  /// Record one finished validation. LOW and MEDIUM count as passed;
  /// HIGH counts as failed and high-risk.
  pub fn record(&self, level: RiskLevel) {
    self.files_validated.fetch_add(1, Ordering::Relaxed);
    if level == RiskLevel::High {
      self.files_failed.fetch_add(1, Ordering::Relaxed);
      self.high_risk_count.fetch_add(1, Ordering::Relaxed);
    } else {
      self.files_passed.fetch_add(1, Ordering::Relaxed);
    }
  }

  pub fn snapshot(&self) -> StatsSnapshot {
    StatsSnapshot {
      files_validated: self.files_validated.load(Ordering::Relaxed),
      files_passed: self.files_passed.load(Ordering::Relaxed),
      files_failed: self.files_failed.load(Ordering::Relaxed),
      high_risk_count: self.high_risk_count.load(Ordering::Relaxed),
    }
  }
}
