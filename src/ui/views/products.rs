use crate::api::types::{Product, ProductFilters, ProductPage};
use crate::api::ApiClient;
use crate::query::{keys, QueryHandle, QueryOptions, QueryStatus, QueryStore};
use crate::ui::components::{InputResult, KeyResult, SearchEvent, SearchInput, TextInput};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{format_usd, truncate};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::ProductDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use std::time::Duration;

/// Which product filter a prompt edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterField {
  Category,
  Brand,
  Tags,
  MinPrice,
  MaxPrice,
}

impl FilterField {
  fn label(&self) -> &'static str {
    match self {
      FilterField::Category => "Category",
      FilterField::Brand => "Brand",
      FilterField::Tags => "Tags",
      FilterField::MinPrice => "Min price",
      FilterField::MaxPrice => "Max price",
    }
  }
}

struct FilterPrompt {
  field: FilterField,
  input: TextInput,
}

/// View for browsing the product catalog with filters and pagination
pub struct ProductListView {
  api: ApiClient,
  store: QueryStore,
  stale_time: Duration,
  filters: ProductFilters,
  handle: QueryHandle<ProductPage>,
  list_state: ratatui::widgets::ListState,
  search: SearchInput,
  prompt: Option<FilterPrompt>,
}

impl ProductListView {
  pub fn new(api: ApiClient, store: QueryStore, stale_time: Duration) -> Self {
    let filters = ProductFilters {
      page: Some(ProductFilters::DEFAULT_PAGE),
      page_size: Some(ProductFilters::DEFAULT_PAGE_SIZE),
      is_active: Some(true),
      ..Default::default()
    };

    let handle = Self::subscribe(&api, &store, &filters, stale_time);

    Self {
      api,
      store,
      stale_time,
      filters,
      handle,
      list_state: Default::default(),
      search: SearchInput::new(),
      prompt: None,
    }
  }

  /// Register interest in the current filter set. The listing refetches on
  /// every (re)mount so page flips give immediate feedback.
  fn subscribe(
    api: &ApiClient,
    store: &QueryStore,
    filters: &ProductFilters,
    stale_time: Duration,
  ) -> QueryHandle<ProductPage> {
    let api = api.clone();
    let filters_for_fetch = filters.clone();
    store.subscribe(
      keys::product_list(filters),
      move || {
        let api = api.clone();
        let filters = filters_for_fetch.clone();
        async move { api.list_products(&filters).await }
      },
      QueryOptions::default()
        .with_stale_time(stale_time)
        .with_refetch_on_mount(),
    )
  }

  /// Swap the subscription after a filter change. Dropping the old handle
  /// unsubscribes it; the entry lingers in the store for quick back-nav.
  fn resubscribe(&mut self) {
    self.handle = Self::subscribe(&self.api, &self.store, &self.filters, self.stale_time);
    self.list_state.select(Some(0));
  }

  fn products(&mut self) -> Vec<Product> {
    self
      .handle
      .data()
      .map(|page| page.products.clone())
      .unwrap_or_default()
  }

  fn page(&self) -> u32 {
    self.filters.page.unwrap_or(ProductFilters::DEFAULT_PAGE)
  }

  fn set_page(&mut self, page: u32) {
    self.filters.page = Some(page.max(1));
    self.resubscribe();
  }

  fn apply_filter(&mut self, field: FilterField, value: String) {
    let value = value.trim().to_string();
    let text = (!value.is_empty()).then_some(value.clone());
    match field {
      FilterField::Category => self.filters.category = text,
      FilterField::Brand => self.filters.brand = text,
      FilterField::Tags => self.filters.tags = text,
      FilterField::MinPrice => self.filters.min_price = value.parse().ok(),
      FilterField::MaxPrice => self.filters.max_price = value.parse().ok(),
    }
    self.filters.page = Some(1);
    self.resubscribe();
  }

  fn clear_filters(&mut self) {
    let page_size = self.filters.page_size;
    self.filters = ProductFilters {
      page: Some(1),
      page_size,
      is_active: Some(true),
      ..Default::default()
    };
    self.resubscribe();
  }

  fn move_selection(&mut self, delta: i32, len: usize) {
    if len == 0 {
      return;
    }
    let current = self.list_state.selected().unwrap_or(0) as i32;
    let next = (current + delta).rem_euclid(len as i32) as usize;
    self.list_state.select(Some(next));
  }

  fn active_filter_summary(&self) -> String {
    let mut parts = Vec::new();
    if let Some(search) = &self.filters.search {
      parts.push(format!("search: {}", search));
    }
    if let Some(category) = &self.filters.category {
      parts.push(format!("category: {}", category));
    }
    if let Some(brand) = &self.filters.brand {
      parts.push(format!("brand: {}", brand));
    }
    if let Some(min) = self.filters.min_price {
      parts.push(format!("min: {}", min));
    }
    if let Some(max) = self.filters.max_price {
      parts.push(format!("max: {}", max));
    }
    if let Some(tags) = &self.filters.tags {
      parts.push(format!("tags: {}", tags));
    }
    parts.join("  ")
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let snapshot = self.handle.snapshot();
    let products = self.products();
    ensure_valid_selection(&mut self.list_state, products.len());

    let position = snapshot
      .data()
      .map(|page| format!("page {}/{}, {} items", self.page(), page.total_pages(), page.total))
      .unwrap_or_default();

    let title = match snapshot.status {
      QueryStatus::Loading if position.is_empty() => " Products (loading...) ".to_string(),
      QueryStatus::Loading => format!(" Products ({}) (refreshing...) ", position),
      QueryStatus::Error => {
        let message = snapshot
          .error
          .as_ref()
          .map(|e| e.to_string())
          .unwrap_or_default();
        format!(" Products (error: {}) ", truncate(&message, 48))
      }
      _ => format!(" Products ({}) ", position),
    };

    let block = Block::default()
      .title(title)
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if products.is_empty() {
      let content = if snapshot.is_loading() {
        "Loading products..."
      } else if snapshot.is_error() {
        "Failed to load products. Press 'r' to retry."
      } else {
        "No products match the current filters. Press 'x' to clear them."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = products
      .iter()
      .map(|product| {
        let price = product
          .price
          .parse::<f64>()
          .map(format_usd)
          .unwrap_or_else(|_| product.price.clone());
        let marker = if product.is_featured { "*" } else { " " };

        let line = Line::from(vec![
          Span::styled(marker, Style::default().fg(Color::Yellow)),
          Span::raw(" "),
          Span::styled(
            format!("{:<34}", truncate(&product.name, 34)),
            Style::default().fg(Color::White),
          ),
          Span::styled(
            format!("{:<16}", truncate(&product.brand, 16)),
            Style::default().fg(Color::Cyan),
          ),
          Span::styled(
            format!("{:<16}", truncate(&product.category, 16)),
            Style::default().fg(Color::Magenta),
          ),
          Span::styled(format!("{:>10}", price), Style::default().fg(Color::Green)),
          Span::styled(
            format!("  stock {:>4}", product.stock_quantity),
            if product.stock_quantity <= product.low_stock_threshold {
              Style::default().fg(Color::Red)
            } else {
              Style::default().fg(Color::DarkGray)
            },
          ),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::DarkGray).bold())
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
    let summary = self.active_filter_summary();
    let hint = if summary.is_empty() {
      "no filters  (/ search, c category, b brand, t tags, < min, > max, [ ] page)".to_string()
    } else {
      format!("{}  (x clears)", summary)
    };

    let paragraph = Paragraph::new(Line::from(vec![
      Span::raw(" "),
      Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(paragraph, area);
  }

  fn render_prompt(&self, frame: &mut Frame, area: Rect) {
    let Some(prompt) = &self.prompt else {
      return;
    };

    let width = (area.width / 2).clamp(24, 48).min(area.width);
    let overlay = Rect {
      x: area.x + (area.width.saturating_sub(width)) / 2,
      y: area.y + 1,
      width,
      height: 3,
    };

    let block = Block::default()
      .title(format!(" {} ", prompt.field.label()))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(prompt.input.value().to_string()).block(block);

    frame.render_widget(Clear, overlay);
    frame.render_widget(paragraph, overlay);
  }

  fn open_prompt(&mut self, field: FilterField) {
    self.prompt = Some(FilterPrompt {
      field,
      input: TextInput::new(),
    });
  }
}

impl View for ProductListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // Filter prompt swallows input while open
    if let Some(prompt) = &mut self.prompt {
      match prompt.input.handle_key(key) {
        InputResult::Submitted(value) => {
          let field = prompt.field;
          self.prompt = None;
          self.apply_filter(field, value);
        }
        InputResult::Cancelled => self.prompt = None,
        _ => {}
      }
      return ViewAction::None;
    }

    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(term)) => {
        // Cancelling the overlay clears an applied search
        if term.is_empty() && self.filters.search.is_some() {
          self.filters.search = None;
          self.filters.page = Some(1);
          self.resubscribe();
        }
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) => {
        let term = self.search.query().trim().to_string();
        self.filters.search = (!term.is_empty()).then_some(term);
        self.filters.page = Some(1);
        self.resubscribe();
        return ViewAction::None;
      }
      KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    let len = self.handle.data().map(|p| p.products.len()).unwrap_or(0);
    match key.code {
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1, len),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, len),
      KeyCode::Enter => {
        if let Some(page) = self.handle.data() {
          if let Some(product) = page.products.get(self.list_state.selected().unwrap_or(0)) {
            return ViewAction::Push(Box::new(ProductDetailView::new(
              product.id,
              product.name.clone(),
              self.api.clone(),
              self.store.clone(),
              self.stale_time,
            )));
          }
        }
      }
      KeyCode::Char(']') => {
        let total_pages = self.handle.data().map(|p| p.total_pages()).unwrap_or(0);
        if self.page() < total_pages {
          self.set_page(self.page() + 1);
        }
      }
      KeyCode::Char('[') => {
        if self.page() > 1 {
          self.set_page(self.page() - 1);
        }
      }
      KeyCode::Char('c') => self.open_prompt(FilterField::Category),
      KeyCode::Char('b') => self.open_prompt(FilterField::Brand),
      KeyCode::Char('t') => self.open_prompt(FilterField::Tags),
      KeyCode::Char('<') => self.open_prompt(FilterField::MinPrice),
      KeyCode::Char('>') => self.open_prompt(FilterField::MaxPrice),
      KeyCode::Char('x') => self.clear_filters(),
      KeyCode::Char('r') => self.handle.refetch(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }

    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(1)])
      .split(area);

    self.render_list(frame, chunks[0]);
    self.render_filter_bar(frame, chunks[1]);
    self.search.render_overlay(frame, area);
    self.render_prompt(frame, area);
  }

  fn breadcrumb_label(&self) -> String {
    match &self.filters.search {
      Some(search) => format!("Products [{}]", search),
      None => "Products".to_string(),
    }
  }

  fn tick(&mut self) {
    self.handle.poll();
  }
}
