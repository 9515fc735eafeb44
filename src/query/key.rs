//! Structured cache keys for queries.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// An ordered tuple of JSON-serializable segments identifying a cacheable
/// request, e.g. `["products", "list", {filters}]`.
///
/// Two keys are equal iff their segments are structurally equal; maps compare
/// by sorted entries, so insertion order never matters. Invalidation matches
/// on segment prefixes: `["products"]` covers every product query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryKey {
  segments: Vec<Value>,
}

impl QueryKey {
  /// Start a key with a single string segment.
  pub fn new(root: impl Into<String>) -> Self {
    Self {
      segments: vec![Value::String(root.into())],
    }
  }

  /// Append a segment. Any JSON-serializable value works; structs become
  /// object segments.
  pub fn push(mut self, segment: impl Serialize) -> Self {
    let value =
      serde_json::to_value(segment).expect("query key segments must be JSON-serializable");
    self.segments.push(value);
    self
  }

  pub fn segments(&self) -> &[Value] {
    &self.segments
  }

  /// Segment-wise prefix test: `["products"]` is a prefix of
  /// `["products", "list", {...}]` but not of `["orders"]`.
  pub fn starts_with(&self, prefix: &QueryKey) -> bool {
    self.segments.len() >= prefix.segments.len()
      && self.segments[..prefix.segments.len()] == prefix.segments[..]
  }

  /// Stable, fixed-length identity for the entry map.
  ///
  /// SHA-256 over the canonical JSON form; `serde_json` keeps object keys
  /// sorted, so structurally equal keys always digest alike.
  pub fn digest(&self) -> String {
    let canonical = serde_json::to_string(&self.segments)
      .expect("query key segments must be JSON-serializable");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
  }
}

impl fmt::Display for QueryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> = self
      .segments
      .iter()
      .map(|s| match s {
        Value::String(s) => s.clone(),
        other => other.to_string(),
      })
      .collect();
    write!(f, "{}", parts.join(":"))
  }
}

/// Key factories, one per backend resource.
///
/// Keeping these in one place makes prefix relationships explicit: every
/// product key starts with [`products`](keys::products), so invalidating that
/// prefix covers every list page and every detail entry.
pub mod keys {
  use super::QueryKey;
  use crate::api::types::ProductFilters;

  pub fn products() -> QueryKey {
    QueryKey::new("products")
  }

  pub fn product_list(filters: &ProductFilters) -> QueryKey {
    products().push("list").push(filters)
  }

  pub fn product_detail(id: u64) -> QueryKey {
    products().push("detail").push(id)
  }

  pub fn cart() -> QueryKey {
    QueryKey::new("cart")
  }

  pub fn orders() -> QueryKey {
    QueryKey::new("orders")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::ProductFilters;

  #[test]
  fn test_equal_keys_share_digest() {
    let a = keys::product_list(&ProductFilters {
      search: Some("shoes".to_string()),
      ..Default::default()
    });
    let b = keys::product_list(&ProductFilters {
      search: Some("shoes".to_string()),
      ..Default::default()
    });
    assert_eq!(a, b);
    assert_eq!(a.digest(), b.digest());
  }

  #[test]
  fn test_different_filters_differ() {
    let a = keys::product_list(&ProductFilters::default());
    let b = keys::product_list(&ProductFilters {
      page: Some(2),
      ..Default::default()
    });
    assert_ne!(a, b);
    assert_ne!(a.digest(), b.digest());
  }

  #[test]
  fn test_prefix_matching() {
    let list = keys::product_list(&ProductFilters::default());
    let detail = keys::product_detail(9);

    assert!(list.starts_with(&keys::products()));
    assert!(detail.starts_with(&keys::products()));
    assert!(!keys::orders().starts_with(&keys::products()));
    assert!(!keys::products().starts_with(&list));
  }

  #[test]
  fn test_prefix_requires_whole_segments() {
    let a = QueryKey::new("products");
    let b = QueryKey::new("prod");
    assert!(!a.starts_with(&b));
  }

  #[test]
  fn test_display_is_readable() {
    assert_eq!(keys::product_detail(3).to_string(), "products:detail:3");
  }
}
