use crate::api::types::{ChatReply, ChatSource, RoutingMode, Voucher};
use crate::api::{ApiClient, ApiError};
use crate::chat::{self, MAX_QUERY_WORDS};
use crate::query::{keys, QueryStore};
use crate::ui::components::{InputResult, TextInput};
use crate::ui::renderfns::format_usd;
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::warn;

/// Progressive status shown while the backend is thinking. The router can
/// chain several agents, so replies regularly take a while.
const LOADING_STEPS: &[&str] = &[
  "",
  "Analyzing your request...",
  "Consulting the agents...",
  "Searching the catalog...",
  "Gathering recommendations...",
  "Finalizing response...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
  User,
  Assistant,
}

struct ChatMessage {
  role: Role,
  content: String,
  sources: Vec<ChatSource>,
  agents_used: Vec<String>,
  routing_mode: Option<RoutingMode>,
  elapsed_seconds: Option<f64>,
}

impl ChatMessage {
  fn user(content: String) -> Self {
    Self {
      role: Role::User,
      content,
      sources: Vec::new(),
      agents_used: Vec::new(),
      routing_mode: None,
      elapsed_seconds: None,
    }
  }

  fn assistant(content: String) -> Self {
    Self {
      role: Role::Assistant,
      content,
      sources: Vec::new(),
      agents_used: Vec::new(),
      routing_mode: None,
      elapsed_seconds: None,
    }
  }

  fn from_reply(reply: ChatReply) -> Self {
    Self {
      role: Role::Assistant,
      content: reply.answer,
      sources: reply.sources,
      agents_used: reply.agents_used,
      routing_mode: Some(reply.routing_mode),
      elapsed_seconds: Some(reply.elapsed_time_seconds),
    }
  }
}

/// Conversational assistant view.
///
/// Sending is imperative (no caching), so replies arrive over a one-shot
/// channel polled on tick. When a reply involved the order agent, the cart
/// prefix is invalidated so the header badge catches up.
pub struct ChatView {
  api: ApiClient,
  store: QueryStore,
  messages: Vec<ChatMessage>,
  input: TextInput,
  session_id: Option<String>,
  pending: Option<mpsc::UnboundedReceiver<Result<ChatReply, ApiError>>>,
  pending_since: Option<Instant>,
  voucher: Option<Voucher>,
  voucher_pending: Option<mpsc::UnboundedReceiver<Result<Voucher, ApiError>>>,
  notice: Option<String>,
  scroll_up: u16,
}

impl ChatView {
  pub fn new(api: ApiClient, store: QueryStore) -> Self {
    Self {
      api,
      store,
      messages: Vec::new(),
      input: TextInput::new(),
      session_id: None,
      pending: None,
      pending_since: None,
      voucher: None,
      voucher_pending: None,
      notice: None,
      scroll_up: 0,
    }
  }

  fn submit(&mut self) {
    if self.pending.is_some() {
      return;
    }

    let text = self.input.value().trim().to_string();
    if let Err(err) = chat::validate_query(&text) {
      // Blocked client-side; nothing is sent to the backend.
      self.notice = Some(err.to_string());
      return;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    self.pending = Some(rx);
    self.pending_since = Some(Instant::now());
    self.notice = None;

    let api = self.api.clone();
    let session_id = self.session_id.clone();
    let query = text.clone();
    tokio::spawn(async move {
      let result = api.send_chat_message(&query, session_id.as_deref()).await;
      // Ignore send errors - the view may have been closed
      let _ = tx.send(result);
    });

    self.messages.push(ChatMessage::user(text));
    self.input.clear();
    self.scroll_up = 0;
  }

  fn generate_voucher(&mut self) {
    if self.voucher_pending.is_some() {
      return;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    self.voucher_pending = Some(rx);

    let api = self.api.clone();
    tokio::spawn(async move {
      let _ = tx.send(api.generate_voucher().await);
    });
  }

  fn poll_pending(&mut self) {
    if let Some(rx) = &mut self.pending {
      match rx.try_recv() {
        Ok(Ok(reply)) => {
          self.session_id = Some(reply.session_id.clone());
          if reply.touched_orders() {
            // The order agent may have changed the cart server-side.
            self.store.invalidate(&keys::cart());
          }
          self.messages.push(ChatMessage::from_reply(reply));
          self.pending = None;
          self.pending_since = None;
        }
        Ok(Err(err)) => {
          warn!(error = %err, "chat query failed");
          self
            .messages
            .push(ChatMessage::assistant(
              "Sorry, I encountered an error. Please try again.".to_string(),
            ));
          self.pending = None;
          self.pending_since = None;
        }
        Err(mpsc::error::TryRecvError::Empty) => {}
        Err(mpsc::error::TryRecvError::Disconnected) => {
          self.pending = None;
          self.pending_since = None;
        }
      }
    }

    if let Some(rx) = &mut self.voucher_pending {
      match rx.try_recv() {
        Ok(Ok(voucher)) => {
          self.voucher = Some(voucher);
          self.voucher_pending = None;
        }
        Ok(Err(err)) => {
          warn!(error = %err, "voucher generation failed");
          self.messages.push(ChatMessage::assistant(
            "Sorry, I encountered an error generating your voucher. Please try again.".to_string(),
          ));
          self.voucher_pending = None;
        }
        Err(mpsc::error::TryRecvError::Empty) => {}
        Err(mpsc::error::TryRecvError::Disconnected) => self.voucher_pending = None,
      }
    }
  }

  fn transcript(&self) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if self.messages.is_empty() {
      lines.push(Line::from(Span::styled(
        "Welcome to Shoplytic! Ask about products, orders, or recommendations.",
        Style::default().fg(Color::DarkGray),
      )));
      lines.push(Line::from(Span::styled(
        "Try: \"Show me running shoes\" or \"Recommend something under $100\"",
        Style::default().fg(Color::DarkGray),
      )));
    }

    for message in &self.messages {
      match message.role {
        Role::User => {
          lines.push(Line::from(Span::styled(
            "You",
            Style::default().fg(Color::Yellow).bold(),
          )));
        }
        Role::Assistant => {
          lines.push(Line::from(Span::styled(
            "Assistant",
            Style::default().fg(Color::Cyan).bold(),
          )));
        }
      }

      lines.extend(chat::transcript_lines(&message.content));

      let product_sources: Vec<&ChatSource> =
        message.sources.iter().filter(|s| s.is_product()).collect();
      if !product_sources.is_empty() {
        lines.push(Line::from(Span::styled(
          "Related products:",
          Style::default().fg(Color::DarkGray),
        )));
        for source in product_sources.iter().take(3) {
          let brand = source.metadata.brand.clone().unwrap_or_default();
          let price = source
            .metadata
            .price
            .map(format_usd)
            .unwrap_or_default();
          lines.push(Line::from(vec![
            Span::raw("  - "),
            Span::styled(brand, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(price, Style::default().fg(Color::Green)),
          ]));
        }
      }

      if !message.agents_used.is_empty() {
        let mode = message
          .routing_mode
          .map(|m| m.as_str())
          .unwrap_or_default();
        let elapsed = message
          .elapsed_seconds
          .map(|s| format!(" · {:.1}s", s))
          .unwrap_or_default();
        lines.push(Line::from(Span::styled(
          format!(
            "agent: {} · {}{}",
            message.agents_used.join(", "),
            mode,
            elapsed
          ),
          Style::default().fg(Color::DarkGray),
        )));
      }

      lines.push(Line::raw(""));
    }

    if self.pending.is_some() {
      let step = self
        .pending_since
        .map(|since| (since.elapsed().as_secs() / 3) as usize)
        .unwrap_or(0)
        .min(LOADING_STEPS.len() - 1);
      let text = if LOADING_STEPS[step].is_empty() {
        "...".to_string()
      } else {
        format!("{} ...", LOADING_STEPS[step])
      };
      lines.push(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray).italic(),
      )));
    }

    if let Some(notice) = &self.notice {
      lines.push(Line::from(Span::styled(
        notice.clone(),
        Style::default().fg(Color::Red),
      )));
    }

    lines
  }

  fn render_voucher_banner(&self, frame: &mut Frame, area: Rect) {
    let Some(voucher) = &self.voucher else {
      return;
    };

    let line = Line::from(vec![
      Span::styled(" Voucher ", Style::default().fg(Color::Black).bg(Color::Yellow)),
      Span::raw(" "),
      Span::styled(
        format_usd(voucher.amount),
        Style::default().fg(Color::Green).bold(),
      ),
      Span::raw("  code: "),
      Span::styled(voucher.code.clone(), Style::default().fg(Color::Yellow).bold()),
      Span::styled("   (Ctrl-G for a new one)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
  }
}

impl View for ChatView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if key.code == KeyCode::Char('g') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.generate_voucher();
      return ViewAction::None;
    }

    match key.code {
      KeyCode::PageUp => {
        self.scroll_up = self.scroll_up.saturating_add(5);
        return ViewAction::None;
      }
      KeyCode::PageDown => {
        self.scroll_up = self.scroll_up.saturating_sub(5);
        return ViewAction::None;
      }
      _ => {}
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(_) => self.submit(),
      InputResult::Cancelled => return ViewAction::Pop,
      InputResult::Consumed => {
        // Typing clears a stale validation notice
        if self.notice.is_some() && chat::word_count(self.input.value()) <= MAX_QUERY_WORDS {
          self.notice = None;
        }
      }
      InputResult::NotHandled => {}
    }

    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let banner_height = if self.voucher.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(banner_height),
        Constraint::Min(1),
        Constraint::Length(3),
      ])
      .split(area);

    self.render_voucher_banner(frame, chunks[0]);

    let lines = self.transcript();
    let total = lines.len() as u16;
    let visible = chunks[1].height;
    let scroll = total
      .saturating_sub(visible)
      .saturating_sub(self.scroll_up);
    let transcript = Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .scroll((scroll, 0));
    frame.render_widget(transcript, chunks[1]);

    let words = chat::word_count(self.input.value());
    let counter_style = if words > MAX_QUERY_WORDS {
      Style::default().fg(Color::Red)
    } else if words > MAX_QUERY_WORDS * 4 / 5 {
      Style::default().fg(Color::Yellow)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let input_block = Block::default()
      .borders(Borders::ALL)
      .border_style(if self.pending.is_some() {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default().fg(Color::Cyan)
      })
      .title(" Ask about products, orders... ")
      .title_bottom(
        Line::from(Span::styled(
          format!(" {}/{} words ", words, MAX_QUERY_WORDS),
          counter_style,
        ))
        .right_aligned(),
      );

    let input = Paragraph::new(self.input.value().to_string()).block(input_block);
    frame.render_widget(input, chunks[2]);
  }

  fn breadcrumb_label(&self) -> String {
    "Assistant".to_string()
  }

  fn tick(&mut self) {
    self.poll_pending();
  }
}
