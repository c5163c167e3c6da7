//! Syntax validation: the single point of parsing.
//!
//! Every downstream stage works on the value returned here; nothing else
//! in the engine parses the input again. Invalid UTF-8 folds into the same
//! syntax-invalid path as malformed JSON.

use serde_json::Value;

/// Parse raw input bytes as JSON.
///
/// Returns the parsed value, or a single descriptive error carrying the
/// parser's failure location and reason. Pure and deterministic.
pub fn parse(bytes: &[u8]) -> Result<Value, String> {
  serde_json::from_slice(bytes).map_err(|e| format!("JSON syntax error: {}", e))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_valid_json() {
    let value = parse(br#"{"stage":"build","steps":["a","b"]}"#).unwrap();
    assert_eq!(value["stage"], "build");
  }

  #[test]
  fn truncated_input_reports_location() {
    let err = parse(br#"{"stage":"#).unwrap_err();
    assert!(err.starts_with("JSON syntax error:"), "got: {}", err);
    assert!(err.contains("line"), "should carry parser location: {}", err);
  }

  #[test]
  fn invalid_utf8_is_a_syntax_error() {
    let err = parse(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap_err();
    assert!(err.starts_with("JSON syntax error:"));
  }

  #[test]
  fn scalar_documents_parse() {
    assert_eq!(parse(b"42").unwrap(), serde_json::json!(42));
    assert_eq!(parse(b"null").unwrap(), Value::Null);
  }
}
