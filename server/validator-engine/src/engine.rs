//! Core orchestrator: sequences the validation stages per file, owns the
//! process-wide statistics, and is the sole entry point for adapters.
//!
//! Every call returns a [`ValidationRecord`]. Unexpected failures (I/O and
//! anything a stage did not already capture) short-circuit to a terminal
//! HIGH-risk record instead of propagating.

use log::{debug, warn};
use serde_json::Value;
use std::path::Path;

use crate::config::Config;
use crate::content::{BaselineAnalyzer, ContentAnalyzer};
use crate::features;
use crate::predictor::RiskPredictor;
use crate::schema::SchemaValidator;
use crate::scoring;
use crate::stats::{StatsSnapshot, ValidatorStats};
use crate::syntax;
use crate::types::{RiskLevel, ValidationRecord};

/// The validation engine. The schema, model artifact, and analyzer are
/// loaded once and read-only, so `&self` validation is safe to run
/// concurrently; statistics updates are atomic.
pub struct Engine {
  config: Config,
  schema: SchemaValidator,
  analyzer: Box<dyn ContentAnalyzer + Send + Sync>,
  predictor: Option<RiskPredictor>,
  stats: ValidatorStats,
}

impl Engine {
  /// Build an engine with default scoring config and the baseline content
  /// analyzer. A missing predictor degrades to fail-open scoring.
  pub fn new(schema: SchemaValidator, predictor: Option<RiskPredictor>) -> Self {
    Self::with_config(Config::default(), schema, predictor)
  }

  pub fn with_config(
    config: Config,
    schema: SchemaValidator,
    predictor: Option<RiskPredictor>,
  ) -> Self {
    Self {
      config,
      schema,
      analyzer: Box::new(BaselineAnalyzer),
      predictor,
      stats: ValidatorStats::default(),
    }
  }

  /// Swap the content heuristics strategy; the stage contract is fixed.
  pub fn with_analyzer(mut self, analyzer: Box<dyn ContentAnalyzer + Send + Sync>) -> Self {
    self.analyzer = analyzer;
    self
  }

  /// Validate a file on disk. Read failures take the terminal HIGH path.
  pub fn validate_file(&self, path: &Path) -> ValidationRecord {
    let mut record = ValidationRecord::new(path.display().to_string());
    match std::fs::read(path) {
      Ok(bytes) => self.run_stages(&mut record, &bytes),
      Err(e) => self.fail_terminal(&mut record, format!("read {}: {}", path.display(), e)),
    }
    record
  }

  /// Validate an in-memory buffer (the upload adapter's entry point).
  pub fn validate_bytes(&self, name: &str, bytes: &[u8]) -> ValidationRecord {
    let mut record = ValidationRecord::new(name);
    self.run_stages(&mut record, bytes);
    record
  }

  pub fn stats(&self) -> StatsSnapshot {
    self.stats.snapshot()
  }

  fn run_stages(&self, record: &mut ValidationRecord, bytes: &[u8]) {
    // Parse exactly once; every later stage works on this value.
    let data = match syntax::parse(bytes) {
      Ok(value) => {
        record.syntax_valid = true;
        Some(value)
      }
      Err(msg) => {
        record.errors.push(msg);
        None
      }
    };

    // Schema and content never run without a parsed value; a skipped
    // stage contributes no penalty.
    let mut schema_ok = true;
    let mut content_ok = true;

    if let Some(data) = &data {
      let (ok, violations) = self.schema.validate(data);
      record.schema_valid = ok;
      record.errors.extend(violations);
      schema_ok = ok;

      let report = self.analyzer.analyze(data);
      content_ok = !report.has_secrets_keywords && report.suspicious_patterns.is_empty();
      record.content_ok = content_ok;
      record.details.insert(
        "content_analysis".to_string(),
        serde_json::to_value(&report).unwrap_or(Value::Null),
      );
    }

    // Prediction fails open to a zero contribution, always with an
    // explicit warning so the gap is never mistaken for a safe verdict.
    record.ml_risk_score = if let Some(data) = &data {
      let features = features::extract(data, Some(bytes.len() as u64));
      record.details.insert(
        "features".to_string(),
        serde_json::to_value(features.to_map()).unwrap_or(Value::Null),
      );
      match &self.predictor {
        Some(predictor) => match predictor.predict_risk(&features) {
          Ok(probability) => {
            record.details.insert(
              "model".to_string(),
              serde_json::json!({
                "version": predictor.version(),
                "digest": predictor.digest(),
              }),
            );
            probability
          }
          Err(e) => {
            warn!("{}: scoring without ml: {}", record.filepath, e);
            record.warnings.push(format!("ml model skipped: {}", e));
            0.0
          }
        },
        None => {
          record
            .warnings
            .push("ml model skipped: no model loaded".to_string());
          0.0
        }
      }
    } else {
      record
        .warnings
        .push("ml model skipped: input not parseable".to_string());
      0.0
    };

    let (score, level) = scoring::compute(
      &self.config,
      record.syntax_valid,
      schema_ok,
      content_ok,
      record.ml_risk_score,
    );
    record.final_risk_score = score;
    record.risk_level = level;

    debug!(
      "{}: syntax={} schema={} content={} ml={:.3} -> {:.2} {:?}",
      record.filepath,
      record.syntax_valid,
      schema_ok,
      content_ok,
      record.ml_risk_score,
      score,
      level
    );

    self.stats.record(level);
  }

  /// Terminal-failure shortcut: preserve the message, force HIGH, count
  /// the file exactly once.
  fn fail_terminal(&self, record: &mut ValidationRecord, message: String) {
    warn!("{}: terminal failure: {}", record.filepath, message);
    record.errors.push(message);
    record.risk_level = RiskLevel::High;
    self.stats.record(RiskLevel::High);
  }
}
