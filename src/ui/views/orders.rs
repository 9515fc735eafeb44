use crate::api::types::Order;
use crate::api::ApiClient;
use crate::query::{keys, QueryHandle, QueryOptions, QueryStatus, QueryStore};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{format_usd, order_status_color, truncate};
use crate::ui::view::{View, ViewAction};
use chrono::DateTime;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::collections::HashSet;
use std::time::Duration;

/// View for the session's order history
pub struct OrdersView {
  handle: QueryHandle<Vec<Order>>,
  list_state: ListState,
  expanded: HashSet<u64>,
}

impl OrdersView {
  pub fn new(api: ApiClient, store: QueryStore, stale_time: Duration) -> Self {
    // Orders refresh on every visit and whenever the terminal regains focus,
    // since checkout happens out-of-band through the assistant.
    let handle = store.subscribe(
      keys::orders(),
      move || {
        let api = api.clone();
        async move { api.list_orders().await }
      },
      QueryOptions::default()
        .with_stale_time(stale_time)
        .with_refetch_on_mount()
        .with_refetch_on_focus(),
    );

    Self {
      handle,
      list_state: ListState::default(),
      expanded: HashSet::new(),
    }
  }

  fn toggle_selected(&mut self) {
    let Some(orders) = self.handle.data() else {
      return;
    };
    if let Some(order) = orders.get(self.list_state.selected().unwrap_or(0)) {
      if !self.expanded.remove(&order.id) {
        self.expanded.insert(order.id);
      }
    }
  }

  fn move_selection(&mut self, delta: i32) {
    let len = self.handle.data().map(|o| o.len()).unwrap_or(0);
    if len == 0 {
      return;
    }
    let current = self.list_state.selected().unwrap_or(0) as i32;
    self
      .list_state
      .select(Some((current + delta).rem_euclid(len as i32) as usize));
  }

  /// Rows for one order. Expanded orders contribute extra item and address
  /// rows, so selection is tracked per order and highlighted manually.
  fn order_lines(&self, order: &Order, selected: bool) -> Vec<ListItem<'static>> {
    let date = format_date(&order.created_at);
    let voucher = order
      .voucher_code
      .as_deref()
      .map(|code| format!("  voucher {}", code))
      .unwrap_or_default();

    let marker = if selected { "> " } else { "  " };
    let header_style = if selected {
      Style::default().bg(Color::DarkGray)
    } else {
      Style::default()
    };

    let mut items = vec![ListItem::new(
      Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("#{:<6}", order.id), Style::default().fg(Color::Cyan)),
        Span::styled(
          format!("{:<12}", truncate(&order.status, 12)),
          Style::default().fg(order_status_color(&order.status)),
        ),
        Span::styled(
          format!("{:>10}", format_usd(order.total_amount)),
          Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(Color::White)),
        Span::styled(voucher, Style::default().fg(Color::Yellow)),
      ])
      .style(header_style),
    )];

    if self.expanded.contains(&order.id) {
      for item in &order.items {
        items.push(ListItem::new(Line::from(vec![
          Span::raw("    "),
          Span::styled(
            format!("{:<34}", truncate(&item.product_name, 34)),
            Style::default().fg(Color::White),
          ),
          Span::styled(
            format!("x{:<3}", item.quantity),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(
            format!("{:>10}", format_usd(item.subtotal)),
            Style::default().fg(Color::Green),
          ),
        ])));
      }
      if let Some(address) = &order.shipping_address {
        items.push(ListItem::new(Line::from(Span::styled(
          format!(
            "    ship to: {}, {}, {} {}",
            address.full_name, address.address, address.city, address.zip_code
          ),
          Style::default().fg(Color::DarkGray),
        ))));
      }
    }

    items
  }
}

impl View for OrdersView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::Enter => self.toggle_selected(),
      KeyCode::Char('r') => self.handle.refetch(),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let snapshot = self.handle.snapshot();
    let orders = snapshot.data().cloned().unwrap_or_default();
    ensure_valid_selection(&mut self.list_state, orders.len());

    let title = match snapshot.status {
      QueryStatus::Loading => " Orders (loading...) ".to_string(),
      QueryStatus::Error => {
        let message = snapshot
          .error
          .as_ref()
          .map(|e| e.to_string())
          .unwrap_or_default();
        format!(" Orders (error: {}) ", truncate(&message, 48))
      }
      _ => format!(" Orders ({}) ", orders.len()),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if orders.is_empty() {
      let content = if snapshot.is_loading() {
        "Loading your orders..."
      } else if snapshot.is_error() {
        "Failed to load orders. Press 'r' to retry."
      } else {
        "No orders yet. Ask the assistant to order something!"
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let selected = self.list_state.selected().unwrap_or(0);
    let items: Vec<ListItem> = orders
      .iter()
      .enumerate()
      .flat_map(|(i, o)| self.order_lines(o, i == selected))
      .collect();

    frame.render_widget(List::new(items).block(block), area);
  }

  fn breadcrumb_label(&self) -> String {
    "Orders".to_string()
  }

  fn tick(&mut self) {
    self.handle.poll();
  }
}

/// Render a backend timestamp as a short local-style date, falling back to
/// the raw string when it does not parse.
fn format_date(raw: &str) -> String {
  DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
    .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_date_rfc3339() {
    assert_eq!(
      format_date("2026-08-01T14:30:00+00:00"),
      "Aug 01, 2026 14:30"
    );
  }

  #[test]
  fn test_format_date_falls_back_to_raw() {
    assert_eq!(format_date("yesterday"), "yesterday");
  }
}
