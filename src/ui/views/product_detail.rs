use crate::api::types::Product;
use crate::api::ApiClient;
use crate::query::{keys, QueryHandle, QueryOptions, QueryStore};
use crate::ui::renderfns::format_usd;
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Duration;

/// View for displaying full product details
pub struct ProductDetailView {
  id: u64,
  name_hint: String,
  handle: QueryHandle<Product>,
  scroll: u16,
}

impl ProductDetailView {
  pub fn new(
    id: u64,
    name_hint: String,
    api: ApiClient,
    store: QueryStore,
    stale_time: Duration,
  ) -> Self {
    let handle = store.subscribe(
      keys::product_detail(id),
      move || {
        let api = api.clone();
        async move { api.get_product(id).await }
      },
      QueryOptions::default().with_stale_time(stale_time),
    );

    Self {
      id,
      name_hint,
      handle,
      scroll: 0,
    }
  }

  fn detail_lines(product: &Product) -> Vec<Line<'static>> {
    let price = product
      .price
      .parse::<f64>()
      .map(format_usd)
      .unwrap_or_else(|_| product.price.clone());

    let mut lines = vec![
      Line::from(vec![
        Span::styled(
          product.name.clone(),
          Style::default().fg(Color::White).bold(),
        ),
        Span::raw("  "),
        Span::styled(
          if product.is_featured { "featured" } else { "" },
          Style::default().fg(Color::Yellow),
        ),
      ]),
      Line::from(vec![
        Span::styled("SKU: ", Style::default().fg(Color::DarkGray)),
        Span::raw(product.sku.clone()),
        Span::styled("   Brand: ", Style::default().fg(Color::DarkGray)),
        Span::styled(product.brand.clone(), Style::default().fg(Color::Cyan)),
        Span::styled("   Category: ", Style::default().fg(Color::DarkGray)),
        Span::styled(product.category.clone(), Style::default().fg(Color::Magenta)),
      ]),
      Line::from(vec![
        Span::styled("Price: ", Style::default().fg(Color::DarkGray)),
        Span::styled(price, Style::default().fg(Color::Green).bold()),
      ]),
      Line::from(vec![
        Span::styled("Stock: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{}", product.stock_quantity),
          if product.stock_quantity <= product.low_stock_threshold {
            Style::default().fg(Color::Red)
          } else {
            Style::default().fg(Color::White)
          },
        ),
        Span::styled(
          if product.stock_quantity <= product.low_stock_threshold {
            "  (low stock)"
          } else {
            ""
          },
          Style::default().fg(Color::Red),
        ),
      ]),
    ];

    if let Some(dims) = &product.dimensions {
      lines.push(Line::from(vec![
        Span::styled("Size: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
          "{} x {} x {} {}   Weight: {}",
          dims.length, dims.width, dims.height, dims.unit, product.weight
        )),
      ]));
    }

    if !product.tags.is_empty() {
      lines.push(Line::from(vec![
        Span::styled("Tags: ", Style::default().fg(Color::DarkGray)),
        Span::raw(product.tags.join(", ")),
      ]));
    }

    if !product.primary_image.is_empty() {
      lines.push(Line::from(vec![
        Span::styled("Image: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
          product.primary_image.clone(),
          Style::default().fg(Color::Blue),
        ),
      ]));
    }

    lines.push(Line::raw(""));
    for text_line in product.description.lines() {
      lines.push(Line::raw(text_line.to_string()));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
      format!("added {}   updated {}", product.created_at, product.updated_at),
      Style::default().fg(Color::DarkGray),
    )));

    lines
  }
}

impl View for ProductDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Char('r') => self.handle.refetch(),
      KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let snapshot = self.handle.snapshot();

    let title = if snapshot.is_loading() {
      format!(" {} (loading...) ", self.name_hint)
    } else {
      format!(" {} ", self.name_hint)
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Stale data stays on screen while a refetch runs; only a fetch that
    // never produced data shows the placeholder states.
    if let Some(product) = snapshot.data() {
      let paragraph = Paragraph::new(Self::detail_lines(product))
        .wrap(Wrap { trim: false })
        .scroll((self.scroll, 0));
      frame.render_widget(paragraph, inner);
      return;
    }

    if let Some(error) = &snapshot.error {
      let message = if error.is_not_found() {
        format!("{}\n\nPress 'q' to go back.", error)
      } else {
        format!("Error: {}\n\nPress 'r' to retry.", error)
      };
      let paragraph = Paragraph::new(message).style(Style::default().fg(Color::Red));
      frame.render_widget(paragraph, inner);
      return;
    }

    let paragraph =
      Paragraph::new("Loading product...").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, inner);
  }

  fn breadcrumb_label(&self) -> String {
    if self.name_hint.is_empty() {
      format!("Product {}", self.id)
    } else {
      self.name_hint.clone()
    }
  }

  fn tick(&mut self) {
    self.handle.poll();
  }
}
