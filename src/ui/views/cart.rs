use crate::api::types::Cart;
use crate::api::ApiClient;
use crate::query::{keys, QueryHandle, QueryOptions, QueryStatus, QueryStore};
use crate::ui::renderfns::{format_usd, truncate};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use std::time::Duration;

/// Read-only view of the current cart.
///
/// Shares its cache entry with the header's cart indicator; both observe the
/// same key, so an assistant-triggered invalidation refreshes them together.
pub struct CartView {
  handle: QueryHandle<Cart>,
}

impl CartView {
  /// `refetch_interval` must match the header's cart subscription: the entry
  /// keeps the latest subscriber's options, so omitting it here would stop
  /// the badge's background polling after a visit to this view.
  pub fn new(
    api: ApiClient,
    store: QueryStore,
    stale_time: Duration,
    refetch_interval: Duration,
  ) -> Self {
    let handle = store.subscribe(
      keys::cart(),
      move || {
        let api = api.clone();
        async move { api.get_cart().await }
      },
      QueryOptions::default()
        .with_stale_time(stale_time)
        .with_refetch_interval(refetch_interval)
        .with_refetch_on_mount(),
    );

    Self { handle }
  }
}

impl View for CartView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => ViewAction::Pop,
      KeyCode::Char('r') => {
        self.handle.refetch();
        ViewAction::None
      }
      _ => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let snapshot = self.handle.snapshot();

    let title = match snapshot.status {
      QueryStatus::Loading => " Cart (loading...) ".to_string(),
      QueryStatus::Error => " Cart (error) ".to_string(),
      _ => snapshot
        .data()
        .map(|cart| format!(" Cart ({} items) ", cart.item_count))
        .unwrap_or_else(|| " Cart ".to_string()),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let Some(cart) = snapshot.data() else {
      let content = if snapshot.is_error() {
        "Failed to load the cart. Press 'r' to retry."
      } else {
        "Loading cart..."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    };

    if cart.items.is_empty() {
      let paragraph =
        Paragraph::new("Your cart is empty. Ask the assistant to add some products!")
          .block(block)
          .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let mut items: Vec<ListItem> = cart
      .items
      .iter()
      .map(|item| {
        ListItem::new(Line::from(vec![
          Span::styled(
            format!("{:<36}", truncate(&item.product_name, 36)),
            Style::default().fg(Color::White),
          ),
          Span::styled(
            format!("qty {:<3}", item.quantity),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(
            format!("{:>10}", format_usd(item.subtotal)),
            Style::default().fg(Color::Green),
          ),
        ]))
      })
      .collect();

    let total = cart
      .total_formatted
      .clone()
      .unwrap_or_else(|| format_usd(cart.total));
    items.push(ListItem::new(Line::raw("")));
    items.push(ListItem::new(Line::from(vec![
      Span::styled("Total: ", Style::default().fg(Color::White).bold()),
      Span::styled(total, Style::default().fg(Color::Green).bold()),
    ])));

    frame.render_widget(List::new(items).block(block), area);
  }

  fn breadcrumb_label(&self) -> String {
    "Cart".to_string()
  }

  fn tick(&mut self) {
    self.handle.poll();
  }
}
