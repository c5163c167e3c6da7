//! Scoring configuration with sane defaults.

/// Tunable penalties and level thresholds for risk scoring.
#[derive(Debug, Clone)]
pub struct Config {
  /// Penalty added when the input fails to parse.
  pub syntax_penalty: f64,
  /// Penalty added when the parsed value violates the schema.
  pub schema_penalty: f64,
  /// Penalty added when content heuristics flag the input.
  pub content_penalty: f64,
  /// Combined score below this is LOW.
  pub low_threshold: f64,
  /// Combined score below this is MEDIUM; at or above is HIGH.
  pub medium_threshold: f64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      syntax_penalty: 0.4,
      schema_penalty: 0.4,
      content_penalty: 0.2,
      low_threshold: 0.30,
      medium_threshold: 0.70,
    }
  }
}
