use ratatui::prelude::Color;

use crate::api::types::Cart;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut)
  }
}

/// Format an amount as US dollars, e.g. `$40.00`
pub fn format_usd(amount: f64) -> String {
  format!("${:.2}", amount)
}

/// Get the display color for an order status
pub fn order_status_color(status: &str) -> Color {
  match status.to_lowercase().as_str() {
    "completed" => Color::Green,
    "pending" => Color::Yellow,
    "cancelled" => Color::Red,
    _ => Color::Gray,
  }
}

/// Badge and total strings for the cart indicator in the header.
///
/// The backend's pre-formatted total wins when present; otherwise the raw
/// total is formatted locally.
pub fn cart_summary(cart: Option<&Cart>) -> (String, String) {
  match cart {
    Some(cart) => {
      let total = cart
        .total_formatted
        .clone()
        .unwrap_or_else(|| format_usd(cart.total));
      (cart.item_count.to_string(), total)
    }
    None => ("0".to_string(), format_usd(0.0)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::{Cart, CartItem};

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_format_usd() {
    assert_eq!(format_usd(40.0), "$40.00");
    assert_eq!(format_usd(89.5), "$89.50");
    assert_eq!(format_usd(0.0), "$0.00");
  }

  #[test]
  fn test_order_status_colors() {
    assert_eq!(order_status_color("Completed"), Color::Green);
    assert_eq!(order_status_color("pending"), Color::Yellow);
    assert_eq!(order_status_color("cancelled"), Color::Red);
    assert_eq!(order_status_color("shipped"), Color::Gray);
  }

  #[test]
  fn test_cart_summary_renders_badge_and_total() {
    let cart = Cart {
      items: vec![CartItem {
        product_id: 1,
        product_name: "Aero Glide".to_string(),
        quantity: 2,
        unit_price: 20.0,
        subtotal: 40.0,
        primary_image: String::new(),
      }],
      item_count: 2,
      total: 40.0,
      total_formatted: None,
    };

    let (badge, total) = cart_summary(Some(&cart));
    assert_eq!(badge, "2");
    assert_eq!(total, "$40.00");
  }

  #[test]
  fn test_cart_summary_prefers_backend_formatting() {
    let cart = Cart {
      items: Vec::new(),
      item_count: 3,
      total: 99.9,
      total_formatted: Some("$99.90".to_string()),
    };
    assert_eq!(cart_summary(Some(&cart)).1, "$99.90");
  }

  #[test]
  fn test_cart_summary_when_absent() {
    assert_eq!(cart_summary(None), ("0".to_string(), "$0.00".to_string()));
  }
}
