//! Serde types matching the storefront API's JSON bodies.
//!
//! These mirror the backend's wire shapes directly; list views consume them
//! as-is rather than converting through separate domain structs, since the
//! backend already returns display-ready fields.

use serde::{Deserialize, Serialize};

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDimensions {
  pub length: f64,
  pub width: f64,
  pub height: f64,
  pub unit: String,
}

/// A catalog product. Price fields arrive as strings (backend formats them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  pub name: String,
  pub sku: String,
  #[serde(default)]
  pub description: String,
  pub price: String,
  #[serde(default)]
  pub cost_price: String,
  #[serde(default)]
  pub stock_quantity: i64,
  #[serde(default)]
  pub low_stock_threshold: i64,
  #[serde(default)]
  pub weight: String,
  pub dimensions: Option<ProductDimensions>,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub primary_image: String,
  #[serde(default)]
  pub is_active: bool,
  #[serde(default)]
  pub is_featured: bool,
  #[serde(default)]
  pub brand: String,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
}

/// One page of the product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
  pub products: Vec<Product>,
  pub total: u64,
  #[serde(default)]
  pub page: u32,
  #[serde(default)]
  pub page_size: u32,
}

impl ProductPage {
  /// Total number of pages given the page size this page was fetched with.
  pub fn total_pages(&self) -> u32 {
    if self.page_size == 0 {
      return 0;
    }
    self.total.div_ceil(self.page_size as u64) as u32
  }
}

/// Filters for the product listing endpoint.
///
/// Unset fields are omitted from both the request query string and the query
/// cache key, so two filter sets differing only in unset fields hash alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub page_size: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub brand: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_price: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_price: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags: Option<String>,
}

impl ProductFilters {
  pub const DEFAULT_PAGE: u32 = 1;
  pub const DEFAULT_PAGE_SIZE: u32 = 20;

  /// Query parameters in the order the backend documents them.
  ///
  /// `is_active`, `page` and `page_size` always appear (with defaults when
  /// unset); the remaining filters appear only when set.
  pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
      (
        "is_active",
        self.is_active.unwrap_or(true).to_string(),
      ),
      ("page", self.page.unwrap_or(Self::DEFAULT_PAGE).to_string()),
      (
        "page_size",
        self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE).to_string(),
      ),
    ];

    if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
      pairs.push(("search", search.to_string()));
    }
    if let Some(category) = self.category.as_deref().filter(|s| !s.is_empty()) {
      pairs.push(("category", category.to_string()));
    }
    if let Some(brand) = self.brand.as_deref().filter(|s| !s.is_empty()) {
      pairs.push(("brand", brand.to_string()));
    }
    if let Some(min_price) = self.min_price {
      pairs.push(("min_price", min_price.to_string()));
    }
    if let Some(max_price) = self.max_price {
      pairs.push(("max_price", max_price.to_string()));
    }
    if let Some(tags) = self.tags.as_deref().filter(|s| !s.is_empty()) {
      pairs.push(("tags", tags.to_string()));
    }

    pairs
  }
}

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
  pub product_id: u64,
  #[serde(default)]
  pub product_name: String,
  pub quantity: u32,
  #[serde(default)]
  pub unit_price: f64,
  pub subtotal: f64,
  #[serde(default)]
  pub primary_image: String,
}

/// Snapshot of the session cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
  pub items: Vec<CartItem>,
  pub item_count: u32,
  pub total: f64,
  /// Pre-formatted total, when the backend supplies one.
  #[serde(default)]
  pub total_formatted: Option<String>,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: u64,
  pub product_id: u64,
  #[serde(default)]
  pub product_name: String,
  pub quantity: u32,
  #[serde(default)]
  pub unit_price: f64,
  pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub address: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: u64,
  #[serde(default)]
  pub session_id: String,
  pub voucher_code: Option<String>,
  pub total_amount: f64,
  pub status: String,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub items: Vec<OrderItem>,
  pub shipping_address: Option<ShippingAddress>,
}

// ============================================================================
// Chat
// ============================================================================

/// How the backend routed a chat query across its agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
  Single,
  Sequential,
  Parallel,
}

impl RoutingMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      RoutingMode::Single => "single",
      RoutingMode::Sequential => "sequential",
      RoutingMode::Parallel => "parallel",
    }
  }
}

/// Metadata attached to a retrieved source snippet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMetadata {
  pub primary_image: Option<String>,
  pub product_id: Option<u64>,
  pub tags: Option<String>,
  pub price: Option<f64>,
  pub brand: Option<String>,
  pub category: Option<String>,
  pub is_featured: Option<bool>,
  pub is_active: Option<bool>,
  /// Which corpus the snippet came from (e.g. "product").
  pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSource {
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub metadata: SourceMetadata,
  #[serde(default)]
  pub similarity: f64,
}

impl ChatSource {
  /// True when the snippet cites a concrete catalog product.
  pub fn is_product(&self) -> bool {
    self.metadata.source.as_deref() == Some("product") && self.metadata.product_id.is_some()
  }
}

/// Assistant reply to a chat query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
  pub answer: String,
  #[serde(default)]
  pub agents_used: Vec<String>,
  pub routing_mode: RoutingMode,
  #[serde(default)]
  pub sources: Vec<ChatSource>,
  /// Opaque identifier to pass back on the next query for continuity.
  pub session_id: String,
  #[serde(default)]
  pub elapsed_time_seconds: f64,
}

impl ChatReply {
  /// Whether the order agent took part in answering, meaning the cart may
  /// have changed server-side.
  pub fn touched_orders(&self) -> bool {
    self.agents_used.iter().any(|a| a == "order")
  }
}

/// Request body for `/user/query`.
#[derive(Debug, Serialize)]
pub struct ChatQuery<'a> {
  pub query: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub session_id: Option<&'a str>,
}

// ============================================================================
// Vouchers
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
  pub id: u64,
  pub code: String,
  pub amount: f64,
  #[serde(default)]
  pub is_used: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query_pairs_defaults_only() {
    let pairs = ProductFilters::default().query_pairs();
    assert_eq!(
      pairs,
      vec![
        ("is_active", "true".to_string()),
        ("page", "1".to_string()),
        ("page_size", "20".to_string()),
      ]
    );
  }

  #[test]
  fn test_query_pairs_includes_set_filters_and_omits_unset() {
    let filters = ProductFilters {
      search: Some("shoes".to_string()),
      min_price: Some(20.0),
      max_price: Some(100.0),
      ..Default::default()
    };
    let pairs = filters.query_pairs();

    let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    let query = query.join("&");
    assert_eq!(
      query,
      "is_active=true&page=1&page_size=20&search=shoes&min_price=20&max_price=100"
    );
    assert!(!query.contains("category"));
    assert!(!query.contains("brand"));
    assert!(!query.contains("tags"));
  }

  #[test]
  fn test_query_pairs_ignores_empty_strings() {
    let filters = ProductFilters {
      search: Some(String::new()),
      category: Some(String::new()),
      ..Default::default()
    };
    assert_eq!(filters.query_pairs().len(), 3);
  }

  #[test]
  fn test_total_pages_rounds_up() {
    let page = ProductPage {
      products: Vec::new(),
      total: 41,
      page: 1,
      page_size: 20,
    };
    assert_eq!(page.total_pages(), 3);
  }

  #[test]
  fn test_chat_reply_touched_orders() {
    let reply: ChatReply = serde_json::from_value(serde_json::json!({
      "answer": "Added to cart.",
      "agents_used": ["order"],
      "routing_mode": "single",
      "sources": [],
      "session_id": "abc-123",
    }))
    .unwrap();
    assert!(reply.touched_orders());
    assert_eq!(reply.routing_mode, RoutingMode::Single);
  }

  #[test]
  fn test_product_source_detection() {
    let source: ChatSource = serde_json::from_value(serde_json::json!({
      "content": "Aero Glide 2 running shoe",
      "metadata": {"source": "product", "product_id": 7, "price": 89.0},
      "similarity": 0.91,
    }))
    .unwrap();
    assert!(source.is_product());

    let faq: ChatSource = serde_json::from_value(serde_json::json!({
      "content": "Returns accepted within 30 days",
      "metadata": {"source": "faq"},
      "similarity": 0.4,
    }))
    .unwrap();
    assert!(!faq.is_product());
  }
}
