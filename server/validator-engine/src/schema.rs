//! Schema validation against a fixed structural contract.
//!
//! The schema document (JSON Schema Draft 7) is compiled once at startup;
//! validation collects every violation, not just the first, so a failing
//! record is actionable in one pass.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::path::Path;

use crate::error::EngineError;

/// Embedded default contract for CI pipeline configs.
const DEFAULT_SCHEMA: &str = include_str!("../schema/pipeline_schema.json");

/// Validates parsed values against a compiled JSON Schema.
pub struct SchemaValidator {
  compiled: JSONSchema,
}

impl SchemaValidator {
  /// Compile a schema document. Fails only at startup, never per file.
  pub fn new(schema: &Value) -> Result<Self, EngineError> {
    let compiled = JSONSchema::options()
      .with_draft(Draft::Draft7)
      .compile(schema)
      .map_err(|e| EngineError::schema(format!("failed to compile schema: {}", e)))?;
    Ok(Self { compiled })
  }

  /// Load and compile a schema document from an external file.
  pub fn from_file(path: &Path) -> Result<Self, EngineError> {
    let raw = std::fs::read_to_string(path)?;
    let schema: Value = serde_json::from_str(&raw)?;
    Self::new(&schema)
  }

  /// The embedded default pipeline schema.
  pub fn default_pipeline() -> Result<Self, EngineError> {
    let schema: Value = serde_json::from_str(DEFAULT_SCHEMA)?;
    Self::new(&schema)
  }

  /// Validate a parsed value. Returns `(ok, violations)` with one
  /// human-readable message per violation, each carrying the instance path.
  pub fn validate(&self, data: &Value) -> (bool, Vec<String>) {
    match self.compiled.validate(data) {
      Ok(()) => (true, Vec::new()),
      Err(violations) => {
        let errors: Vec<String> = violations
          .map(|e| format!("schema violation: {} at {}", e, e.instance_path))
          .collect();
        (false, errors)
      }
    }
  }
}
