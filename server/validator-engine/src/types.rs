//! Core types for the validator engine (JSON contract with callers).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discrete risk classification derived from the composite score.
///
/// `Unknown` only exists before scoring completes; once the engine returns
/// a record, the level is always Low, Medium, or High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
  Unknown,
  Low,
  Medium,
  High,
}

impl std::fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::Unknown => "UNKNOWN",
      Self::Low => "LOW",
      Self::Medium => "MEDIUM",
      Self::High => "HIGH",
    };
    f.write_str(s)
  }
}

/// Per-file validation outcome. Mutable while the engine runs its stages,
/// treated as immutable by callers once returned.
///
/// Serializes flat: this is the response body the upload adapter and the
/// CLI both emit verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRecord {
  pub filepath: String,
  /// RFC 3339 creation time, set once at construction.
  pub timestamp: String,
  pub syntax_valid: bool,
  pub schema_valid: bool,
  pub content_ok: bool,
  /// Classifier probability in [0, 1]; 0 until the predictor stage runs.
  pub ml_risk_score: f64,
  /// Composite score in [0, 100]; meaningful only after scoring.
  pub final_risk_score: f64,
  pub risk_level: RiskLevel,
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
  /// Structured diagnostics keyed by label (e.g. "content_analysis").
  pub details: BTreeMap<String, serde_json::Value>,
}

impl ValidationRecord {
  pub fn new(filepath: impl Into<String>) -> Self {
    Self {
      filepath: filepath.into(),
      timestamp: Utc::now().to_rfc3339(),
      syntax_valid: false,
      schema_valid: false,
      content_ok: false,
      ml_risk_score: 0.0,
      final_risk_score: 0.0,
      risk_level: RiskLevel::Unknown,
      errors: Vec::new(),
      warnings: Vec::new(),
      details: BTreeMap::new(),
    }
  }

  /// LOW and MEDIUM results are considered safe to execute.
  pub fn is_safe(&self) -> bool {
    matches!(self.risk_level, RiskLevel::Low | RiskLevel::Medium)
  }
}
