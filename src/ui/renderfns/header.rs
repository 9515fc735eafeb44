use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::api::types::Cart;

use super::utils::cart_summary;

/// Draw the header bar with logo, backend, cart indicator and shortcuts
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, base_url: &str, cart: Option<&Cart>) {
  let domain = extract_domain(base_url);
  let shown_title = if title.is_empty() { "shoply" } else { title };
  let (badge, total) = cart_summary(cart);

  let header = Line::from(vec![
    Span::styled(
      format!(" {} ", shown_title),
      Style::default().fg(Color::Cyan).bold(),
    ),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", domain), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(" Cart[", Style::default().fg(Color::White)),
    Span::styled(badge, Style::default().fg(Color::Yellow).bold()),
    Span::styled("] ", Style::default().fg(Color::White)),
    Span::styled(total, Style::default().fg(Color::Green)),
    Span::raw("  "),
    // Shortcuts - keys highlighted, descriptions dimmed
    Span::styled("<:>", Style::default().fg(Color::Cyan)),
    Span::styled(" command", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("</>", Style::default().fg(Color::Cyan)),
    Span::styled(" search", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<q>", Style::default().fg(Color::Cyan)),
    Span::styled(" back", Style::default().fg(Color::DarkGray)),
  ]);

  let paragraph = Paragraph::new(header).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Extract domain from the backend URL
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_domain() {
    assert_eq!(
      extract_domain("https://agentic-ecommerce.onrender.com"),
      "agentic-ecommerce.onrender.com"
    );
    assert_eq!(
      extract_domain("http://localhost:8000/api"),
      "localhost:8000"
    );
    assert_eq!(extract_domain("weird"), "weird");
  }
}
