use crate::chat::transcript_lines;
use crate::slides::{parse_deck, Slide, SlideLayout};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::path::Path;
use tracing::warn;

/// Filenames checked inside the configured slides directory, in preference
/// order.
const PRIMARY_DECK: &str = "SLIDES.md";
const SECONDARY_DECK: &str = "GOOGLE_SLIDES_CONTENT.md";

/// Presentation view over the bundled markdown decks
pub struct SlidesView {
  slides: Vec<Slide>,
  current: usize,
}

impl SlidesView {
  pub fn new(dir: &Path) -> Self {
    let primary = read_deck(&dir.join(PRIMARY_DECK));
    let secondary = read_deck(&dir.join(SECONDARY_DECK));
    let slides = parse_deck(&primary, &secondary);

    Self { slides, current: 0 }
  }

  fn next(&mut self) {
    if !self.slides.is_empty() {
      self.current = (self.current + 1).min(self.slides.len() - 1);
    }
  }

  fn prev(&mut self) {
    self.current = self.current.saturating_sub(1);
  }

  fn render_slide(&self, frame: &mut Frame, area: Rect, slide: &Slide) {
    match slide.layout {
      SlideLayout::Title => {
        let chunks = Layout::default()
          .direction(Direction::Vertical)
          .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2),
            Constraint::Min(1),
          ])
          .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
          slide.title.clone(),
          Style::default().fg(Color::Cyan).bold(),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let body = Paragraph::new(transcript_lines(&slide.body))
          .alignment(Alignment::Center)
          .wrap(Wrap { trim: true });
        frame.render_widget(body, chunks[2]);
      }
      SlideLayout::Content => {
        let body = Paragraph::new(transcript_lines(&slide.body)).wrap(Wrap { trim: false });
        frame.render_widget(body, area);
      }
      SlideLayout::TwoColumn | SlideLayout::ThreeColumn => {
        let count = slide.layout.column_count();
        let constraints = vec![Constraint::Ratio(1, count as u32); count];
        let columns = Layout::default()
          .direction(Direction::Horizontal)
          .constraints(constraints)
          .split(area);

        for (i, column_area) in columns.iter().enumerate() {
          let content = slide.columns.get(i).map(String::as_str).unwrap_or("");
          let mut paragraph =
            Paragraph::new(transcript_lines(content)).wrap(Wrap { trim: false });
          if i > 0 {
            paragraph = paragraph.block(
              Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(Color::DarkGray)),
            );
          }
          frame.render_widget(paragraph, *column_area);
        }
      }
    }
  }
}

impl View for SlidesView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char(' ') => self.next(),
      KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => self.prev(),
      KeyCode::Home => self.current = 0,
      KeyCode::End => self.current = self.slides.len().saturating_sub(1),
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    if self.slides.is_empty() {
      let block = Block::default()
        .title(" Slides ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
      let paragraph = Paragraph::new(
        "No slides found. Place SLIDES.md or GOOGLE_SLIDES_CONTENT.md in the slides directory.",
      )
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let slide = &self.slides[self.current];
    let counter = format!(" {} / {} ", self.current + 1, self.slides.len());

    let block = Block::default()
      .title(format!(" {} ", slide.title))
      .title_alignment(Alignment::Center)
      .title_bottom(Line::from(counter).right_aligned())
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    self.render_slide(frame, inner, slide);
  }

  fn breadcrumb_label(&self) -> String {
    "Slides".to_string()
  }
}

/// Read a deck file, treating a missing file as an empty deck.
fn read_deck(path: &Path) -> String {
  match std::fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(err) => {
      warn!(path = %path.display(), error = %err, "slide deck not readable");
      String::new()
    }
  }
}
