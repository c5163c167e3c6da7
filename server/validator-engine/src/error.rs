//! Structured error types for the validator engine.
//!
//! These cover startup loading (schema/model artifacts) and the one
//! per-file recoverable condition (model inference). Per-file validation
//! itself never surfaces an error: the engine folds failures into the
//! returned record instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("schema: {0}")]
  Schema(String),

  #[error("model: {0}")]
  Model(String),
}

impl EngineError {
  pub fn schema(msg: impl Into<String>) -> Self {
    Self::Schema(msg.into())
  }

  pub fn model(msg: impl Into<String>) -> Self {
    Self::Model(msg.into())
  }
}
