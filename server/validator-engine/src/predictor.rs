//! Risk prediction from a pre-trained classifier + scaler artifact.
//!
//! The artifact is a single JSON document holding a standard scaler and a
//! logistic-regression classifier, versioned together and loaded once at
//! startup. Inference is deterministic for a fixed artifact and feature
//! vector. A feature-shape mismatch is a per-file recoverable condition,
//! not a startup failure: the caller fails open to a zero contribution and
//! records a warning.

use serde::Deserialize;
use std::path::Path;

use crate::error::EngineError;
use crate::features::{Features, FEATURE_NAMES};

#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
  pub mean: Vec<f64>,
  pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Classifier {
  pub coefficients: Vec<f64>,
  pub intercept: f64,
}

/// Classifier + scaler pair, versioned together.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
  pub version: String,
  pub feature_names: Vec<String>,
  pub scaler: Scaler,
  pub classifier: Classifier,
}

/// Immutable, read-only predictor shared across concurrent validations.
pub struct RiskPredictor {
  artifact: ModelArtifact,
  /// blake3 digest of the artifact file, for audit trails.
  digest: String,
}

impl RiskPredictor {
  /// Load the artifact pair once at startup.
  ///
  /// Internal inconsistency (mismatched array lengths, zero scale) is an
  /// unrecoverable load error; it is not the same condition as a per-file
  /// feature-shape mismatch.
  pub fn from_file(path: &Path) -> Result<Self, EngineError> {
    let raw = std::fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&raw)?;

    let n = artifact.feature_names.len();
    if artifact.scaler.mean.len() != n
      || artifact.scaler.scale.len() != n
      || artifact.classifier.coefficients.len() != n
    {
      return Err(EngineError::model(format!(
        "inconsistent artifact {:?}: {} feature names, {} means, {} scales, {} coefficients",
        path,
        n,
        artifact.scaler.mean.len(),
        artifact.scaler.scale.len(),
        artifact.classifier.coefficients.len()
      )));
    }
    if artifact.scaler.scale.iter().any(|s| *s == 0.0) {
      return Err(EngineError::model(format!(
        "artifact {:?} has a zero scale entry",
        path
      )));
    }

    let digest = blake3::hash(&raw).to_hex();
    Ok(Self {
      artifact,
      digest: format!("model-{}", &digest[..16]),
    })
  }

  pub fn version(&self) -> &str {
    &self.artifact.version
  }

  pub fn digest(&self) -> &str {
    &self.digest
  }

  /// Scale the feature vector and return the classifier's risk-class
  /// probability in [0, 1].
  ///
  /// Errors when the artifact's feature shape does not match what the
  /// extractor produces; the caller treats that as fail-open.
  pub fn predict_risk(&self, features: &Features) -> Result<f64, EngineError> {
    if self.artifact.feature_names != FEATURE_NAMES {
      return Err(EngineError::model(format!(
        "feature shape mismatch: model expects {:?}, extractor produces {:?}",
        self.artifact.feature_names, FEATURE_NAMES
      )));
    }

    let vector = features.as_vector();
    let mut z = self.artifact.classifier.intercept;
    for (i, x) in vector.iter().enumerate() {
      let scaled = (x - self.artifact.scaler.mean[i]) / self.artifact.scaler.scale[i];
      z += self.artifact.classifier.coefficients[i] * scaled;
    }

    let probability = 1.0 / (1.0 + (-z).exp());
    Ok(probability.clamp(0.0, 1.0))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn artifact_json(feature_names: &str) -> String {
    format!(
      r#"{{
        "version": "2024.1",
        "feature_names": {},
        "scaler": {{"mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]}},
        "classifier": {{"coefficients": [0.0, 0.0, 0.0], "intercept": 0.0}}
      }}"#,
      feature_names
    )
  }

  fn write_artifact(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
  }

  fn features() -> Features {
    Features {
      file_size_kb: 1.5,
      num_keys: 2.0,
      depth: 2.0,
    }
  }

  #[test]
  fn zero_coefficients_give_half_probability() {
    let file = write_artifact(&artifact_json(r#"["file_size_kb", "num_keys", "depth"]"#));
    let predictor = RiskPredictor::from_file(file.path()).unwrap();
    let p = predictor.predict_risk(&features()).unwrap();
    assert!((p - 0.5).abs() < 1e-12);
    assert_eq!(predictor.version(), "2024.1");
    assert!(predictor.digest().starts_with("model-"));
  }

  #[test]
  fn prediction_is_deterministic() {
    let file = write_artifact(&artifact_json(r#"["file_size_kb", "num_keys", "depth"]"#));
    let predictor = RiskPredictor::from_file(file.path()).unwrap();
    let a = predictor.predict_risk(&features()).unwrap();
    let b = predictor.predict_risk(&features()).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn feature_name_mismatch_is_recoverable_error() {
    let file = write_artifact(&artifact_json(r#"["file_size_kb", "num_keys", "entropy"]"#));
    let predictor = RiskPredictor::from_file(file.path()).unwrap();
    let err = predictor.predict_risk(&features()).unwrap_err();
    assert!(err.to_string().contains("feature shape mismatch"));
  }

  #[test]
  fn inconsistent_artifact_fails_to_load() {
    let json = r#"{
      "version": "bad",
      "feature_names": ["file_size_kb", "num_keys", "depth"],
      "scaler": {"mean": [0.0], "scale": [1.0, 1.0, 1.0]},
      "classifier": {"coefficients": [0.0, 0.0, 0.0], "intercept": 0.0}
    }"#;
    let file = write_artifact(json);
    assert!(RiskPredictor::from_file(file.path()).is_err());
  }

  #[test]
  fn zero_scale_fails_to_load() {
    let json = r#"{
      "version": "bad",
      "feature_names": ["file_size_kb", "num_keys", "depth"],
      "scaler": {"mean": [0.0, 0.0, 0.0], "scale": [1.0, 0.0, 1.0]},
      "classifier": {"coefficients": [0.0, 0.0, 0.0], "intercept": 0.0}
    }"#;
    let file = write_artifact(json);
    assert!(RiskPredictor::from_file(file.path()).is_err());
  }

  #[test]
  fn positive_coefficients_raise_probability_with_size() {
    let json = r#"{
      "version": "2024.1",
      "feature_names": ["file_size_kb", "num_keys", "depth"],
      "scaler": {"mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]},
      "classifier": {"coefficients": [1.0, 0.0, 0.0], "intercept": 0.0}
    }"#;
    let file = write_artifact(json);
    let predictor = RiskPredictor::from_file(file.path()).unwrap();

    let small = Features {
      file_size_kb: 0.1,
      num_keys: 0.0,
      depth: 1.0,
    };
    let large = Features {
      file_size_kb: 10.0,
      num_keys: 0.0,
      depth: 1.0,
    };
    let p_small = predictor.predict_risk(&small).unwrap();
    let p_large = predictor.predict_risk(&large).unwrap();
    assert!(p_large > p_small);
    assert!((0.0..=1.0).contains(&p_small));
    assert!((0.0..=1.0).contains(&p_large));
  }
}
