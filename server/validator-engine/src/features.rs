//! Fixed-shape feature extraction for the risk classifier.
//!
//! Total over any value the syntax validator accepts: extraction never
//! fails, it only produces zeros for absent information.

use serde_json::Value;
use std::collections::BTreeMap;

/// Feature order the classifier artifact must match.
pub const FEATURE_NAMES: [&str; 3] = ["file_size_kb", "num_keys", "depth"];

/// Numeric summary of a parsed document, in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
  pub file_size_kb: f64,
  pub num_keys: f64,
  pub depth: f64,
}

impl Features {
  pub fn as_vector(&self) -> [f64; 3] {
    [self.file_size_kb, self.num_keys, self.depth]
  }

  pub fn to_map(&self) -> BTreeMap<String, f64> {
    FEATURE_NAMES
      .iter()
      .zip(self.as_vector())
      .map(|(name, value)| (name.to_string(), value))
      .collect()
  }
}

/// Extract features from a parsed value plus source size metadata.
///
/// `size_bytes` is the source length when known (file size or buffer
/// length); `file_size_kb` is 0 when the source is unavailable.
pub fn extract(data: &Value, size_bytes: Option<u64>) -> Features {
  Features {
    file_size_kb: size_bytes.map(|b| b as f64 / 1024.0).unwrap_or(0.0),
    num_keys: data.as_object().map(|m| m.len() as f64).unwrap_or(0.0),
    depth: depth(data, 1) as f64,
  }
}

/// Maximum nesting depth, depth-first. A scalar is depth 1; an empty
/// container has the depth at which it occurs; a container's depth is the
/// maximum over its immediate children, each one level deeper.
fn depth(value: &Value, level: u64) -> u64 {
  match value {
    Value::Object(map) => map
      .values()
      .map(|v| depth(v, level + 1))
      .max()
      .unwrap_or(level),
    Value::Array(items) => items
      .iter()
      .map(|v| depth(v, level + 1))
      .max()
      .unwrap_or(level),
    _ => level,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn scalar_depth_is_one() {
    assert_eq!(extract(&json!(42), None).depth, 1.0);
    assert_eq!(extract(&json!("s"), None).depth, 1.0);
    assert_eq!(extract(&json!(null), None).depth, 1.0);
  }

  #[test]
  fn empty_container_depth_is_one() {
    assert_eq!(extract(&json!({}), None).depth, 1.0);
    assert_eq!(extract(&json!([]), None).depth, 1.0);
  }

  #[test]
  fn nested_object_depth() {
    // root=1, nested object=2, leaf=3.
    assert_eq!(extract(&json!({"a": {"b": 1}}), None).depth, 3.0);
  }

  #[test]
  fn empty_container_counts_at_its_own_level() {
    // The inner {} sits at level 2 and has no children.
    assert_eq!(extract(&json!({"a": {}}), None).depth, 2.0);
    assert_eq!(extract(&json!({"a": [[]]}), None).depth, 3.0);
  }

  #[test]
  fn num_keys_counts_top_level_object_keys_only() {
    let f = extract(&json!({"a": 1, "b": {"c": 2, "d": 3}}), None);
    assert_eq!(f.num_keys, 2.0);
    assert_eq!(extract(&json!([1, 2, 3]), None).num_keys, 0.0);
    assert_eq!(extract(&json!("scalar"), None).num_keys, 0.0);
  }

  #[test]
  fn file_size_kb_from_source_bytes() {
    assert_eq!(extract(&json!({}), Some(2048)).file_size_kb, 2.0);
    assert_eq!(extract(&json!({}), None).file_size_kb, 0.0);
  }

  #[test]
  fn map_preserves_feature_order_names() {
    let map = extract(&json!({"a": 1}), Some(1024)).to_map();
    let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["depth", "file_size_kb", "num_keys"]);
    assert_eq!(map["file_size_kb"], 1.0);
  }
}
