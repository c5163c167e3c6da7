//! Content heuristics: pluggable risk indicators over parsed config data.
//!
//! The engine only depends on the [`ContentAnalyzer`] trait, so stronger
//! detectors can be swapped in without touching the orchestrator.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Fixed output contract for every analyzer implementation.
#[derive(Debug, Clone, Serialize)]
pub struct ContentReport {
  /// Proportional to serialized size; a cheap proxy, not a guarantee of
  /// semantic complexity.
  pub complexity_score: f64,
  pub has_secrets_keywords: bool,
  pub suspicious_patterns: Vec<String>,
}

/// Heuristic scan of parsed content for risk indicators.
pub trait ContentAnalyzer {
  fn analyze(&self, data: &Value) -> ContentReport;
}

fn complexity_score(data: &Value) -> f64 {
  data.to_string().len() as f64 / 1000.0
}

/// Default analyzer: reports size-based complexity and nothing else.
#[derive(Debug, Default)]
pub struct BaselineAnalyzer;

impl ContentAnalyzer for BaselineAnalyzer {
  fn analyze(&self, data: &Value) -> ContentReport {
    ContentReport {
      complexity_score: complexity_score(data),
      has_secrets_keywords: false,
      suspicious_patterns: Vec::new(),
    }
  }
}

/// Keyword analyzer: flags credential-like keys and shell-injection-prone
/// command fragments in leaf strings.
#[derive(Debug, Default)]
pub struct KeywordAnalyzer;

const CREDENTIAL_TOKENS: &[&str] = &[
  "password",
  "passwd",
  "secret",
  "api_key",
  "apikey",
  "token",
  "credential",
  "private_key",
  "access_key",
];

const SHELL_FRAGMENTS: &[&str] = &["| sh", "| bash", "rm -rf", "$(", "`", "eval ", "curl ", "wget "];

impl KeywordAnalyzer {
  fn scan(value: &Value, secrets: &mut bool, patterns: &mut BTreeSet<String>) {
    match value {
      Value::Object(map) => {
        for (key, child) in map {
          let k = key.to_lowercase();
          if CREDENTIAL_TOKENS.iter().any(|t| k.contains(t)) {
            *secrets = true;
            patterns.insert(format!("credential-like key: {}", key));
          }
          Self::scan(child, secrets, patterns);
        }
      }
      Value::Array(items) => {
        for item in items {
          Self::scan(item, secrets, patterns);
        }
      }
      Value::String(s) => {
        let lower = s.to_lowercase();
        for fragment in SHELL_FRAGMENTS {
          if lower.contains(fragment) {
            patterns.insert(format!("shell-prone fragment {:?} in: {}", fragment, s));
          }
        }
      }
      _ => {}
    }
  }
}

impl ContentAnalyzer for KeywordAnalyzer {
  fn analyze(&self, data: &Value) -> ContentReport {
    let mut secrets = false;
    let mut patterns = BTreeSet::new();
    Self::scan(data, &mut secrets, &mut patterns);
    ContentReport {
      complexity_score: complexity_score(data),
      has_secrets_keywords: secrets,
      suspicious_patterns: patterns.into_iter().collect(),
    }
  }
}
