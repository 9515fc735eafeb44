use crate::api::types::Cart;
use crate::api::ApiClient;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::query::{keys, QueryHandle, QueryOptions, QueryStore};
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::renderfns::{draw_footer, draw_header};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{CartView, ChatView, OrdersView, ProductListView, SlidesView};
use color_eyre::{eyre::eyre, Result};
use crossterm::event::{
  DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyModifiers,
};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  views: Vec<Box<dyn View>>,

  /// Command palette (`:` prompt)
  command: CommandInput,

  /// Application configuration
  config: Config,

  /// Storefront API client
  api: ApiClient,

  /// Shared query cache, injected into every view
  store: QueryStore,

  /// Cart indicator subscription; polled every 30s for the header badge
  cart: QueryHandle<Cart>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(config: Config) -> Result<Self> {
    let api = ApiClient::new(&config).map_err(|e| eyre!("Failed to create API client: {}", e))?;
    let store = QueryStore::with_gc_time(config.cache.gc_time());

    let cart_api = api.clone();
    let cart = store.subscribe(
      keys::cart(),
      move || {
        let api = cart_api.clone();
        async move { api.get_cart().await }
      },
      QueryOptions::default()
        .with_stale_time(config.cache.stale_time())
        .with_refetch_interval(config.cache.cart_refetch_interval()),
    );

    let root = ProductListView::new(api.clone(), store.clone(), config.cache.stale_time());

    Ok(Self {
      views: vec![Box::new(root)],
      command: CommandInput::new(),
      config,
      api,
      store,
      cart,
      should_quit: false,
    })
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));

    // Main loop
    while !self.should_quit {
      terminal.draw(|frame| self.draw(frame))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    stdout().execute(DisableFocusChange)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Header
        Constraint::Min(1),    // Main content
        Constraint::Length(1), // Footer
      ])
      .split(frame.area());

    let cart = self.cart.snapshot();
    draw_header(
      frame,
      chunks[0],
      self.config.title.as_deref().unwrap_or(""),
      &self.config.api.base_url,
      cart.data.as_deref(),
    );

    if let Some(view) = self.views.last_mut() {
      view.render(frame, chunks[1]);
    }

    let breadcrumb: Vec<String> = self.views.iter().map(|v| v.breadcrumb_label()).collect();
    draw_footer(frame, chunks[2], &breadcrumb);

    self.command.render_overlay(frame, chunks[1]);
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {
        self.store.tick();
        self.cart.poll();
        if let Some(view) = self.views.last_mut() {
          view.tick();
        }
      }
      Event::FocusGained => self.store.notify_focus(),
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    // Ctrl-C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Command palette first; it swallows input while open
    match self.command.handle_key(key) {
      KeyResult::Event(CommandEvent::Submitted(cmd)) => {
        self.execute_command(&cmd);
        return;
      }
      KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    let action = match self.views.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::None,
    };

    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => self.views.push(view),
      ViewAction::Pop => {
        if self.views.len() > 1 {
          self.views.pop();
        } else {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    let stale_time = self.config.cache.stale_time();
    let root: Option<Box<dyn View>> = match cmd {
      "products" => Some(Box::new(ProductListView::new(
        self.api.clone(),
        self.store.clone(),
        stale_time,
      ))),
      "cart" => Some(Box::new(CartView::new(
        self.api.clone(),
        self.store.clone(),
        stale_time,
        self.config.cache.cart_refetch_interval(),
      ))),
      "orders" => Some(Box::new(OrdersView::new(
        self.api.clone(),
        self.store.clone(),
        stale_time,
      ))),
      "chat" => Some(Box::new(ChatView::new(self.api.clone(), self.store.clone()))),
      "slides" => Some(Box::new(SlidesView::new(&self.config.slides.dir))),
      "quit" => {
        self.should_quit = true;
        None
      }
      _ => None, // Unknown command
    };

    if let Some(root) = root {
      self.views.clear();
      self.views.push(root);
    }
  }
}
