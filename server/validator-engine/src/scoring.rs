//! Rule + ML score combination.
//!
//! Structural penalties are additive and independent, and they dominate:
//! one structural failure alone guarantees at least MEDIUM, two guarantee
//! HIGH regardless of the classifier. The ML probability is an additive
//! refinement, never an override-to-safe signal.

use crate::config::Config;
use crate::types::RiskLevel;

/// Combine stage outcomes and the classifier probability into a final
/// score in [0, 100] (rounded to 2 decimals) and a discrete level.
pub fn compute(
  config: &Config,
  syntax_ok: bool,
  schema_ok: bool,
  content_ok: bool,
  ml_risk: f64,
) -> (f64, RiskLevel) {
  let mut penalty = 0.0;
  if !syntax_ok {
    penalty += config.syntax_penalty;
  }
  if !schema_ok {
    penalty += config.schema_penalty;
  }
  if !content_ok {
    penalty += config.content_penalty;
  }

  let combined = (penalty + ml_risk).min(1.0);

  let level = if combined < config.low_threshold {
    RiskLevel::Low
  } else if combined < config.medium_threshold {
    RiskLevel::Medium
  } else {
    RiskLevel::High
  };

  let score = (combined * 100.0 * 100.0).round() / 100.0;
  (score, level)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn score(syntax: bool, schema: bool, content: bool, ml: f64) -> (f64, RiskLevel) {
    compute(&Config::default(), syntax, schema, content, ml)
  }

  #[test]
  fn clean_input_with_zero_ml_is_low_zero() {
    assert_eq!(score(true, true, true, 0.0), (0.0, RiskLevel::Low));
  }

  #[test]
  fn conformant_pipeline_with_small_ml_signal() {
    // combined = 0.1 -> 10.0, LOW.
    assert_eq!(score(true, true, true, 0.1), (10.0, RiskLevel::Low));
  }

  #[test]
  fn syntax_failure_alone_is_medium() {
    assert_eq!(score(false, true, true, 0.0), (40.0, RiskLevel::Medium));
  }

  #[test]
  fn schema_failure_plus_ml_signal() {
    // combined = 0.45 -> 45.0, MEDIUM.
    assert_eq!(score(true, false, true, 0.05), (45.0, RiskLevel::Medium));
  }

  #[test]
  fn compounding_failures_escalate() {
    // Syntax + content flagged: penalty 0.6.
    assert_eq!(score(false, true, false, 0.0), (60.0, RiskLevel::Medium));
    // Two structural failures guarantee HIGH even with ml = 0.
    assert_eq!(score(false, false, true, 0.0), (80.0, RiskLevel::High));
    // All three may sum above 1; combined is capped.
    assert_eq!(score(false, false, false, 0.9), (100.0, RiskLevel::High));
  }

  #[test]
  fn score_is_bounded() {
    for &syntax in &[true, false] {
      for &schema in &[true, false] {
        for &content in &[true, false] {
          for &ml in &[0.0, 0.33, 1.0] {
            let (s, _) = score(syntax, schema, content, ml);
            assert!((0.0..=100.0).contains(&s), "out of bounds: {}", s);
          }
        }
      }
    }
  }

  #[test]
  fn score_is_monotone_in_each_input() {
    for &schema in &[true, false] {
      for &content in &[true, false] {
        for &ml in &[0.0, 0.2, 0.5] {
          let (ok, _) = score(true, schema, content, ml);
          let (bad, _) = score(false, schema, content, ml);
          assert!(bad >= ok, "syntax failure must not lower the score");
        }
      }
    }
    let (low_ml, _) = score(true, true, true, 0.1);
    let (high_ml, _) = score(true, true, true, 0.6);
    assert!(high_ml > low_ml);
  }

  #[test]
  fn threshold_edges() {
    // Exactly at the LOW boundary is MEDIUM; at the MEDIUM boundary is HIGH.
    assert_eq!(score(true, true, true, 0.30).1, RiskLevel::Medium);
    assert_eq!(score(true, true, true, 0.70).1, RiskLevel::High);
    assert_eq!(score(true, true, true, 0.29).1, RiskLevel::Low);
  }

  #[test]
  fn score_rounds_to_two_decimals() {
    let (s, _) = score(true, true, true, 0.123456);
    assert_eq!(s, 12.35);
  }
}
