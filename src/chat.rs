//! Chat transcript formatting and input bounds.
//!
//! The assistant answers in a constrained markdown subset: `**bold**` spans
//! and `1.`-style numbered list lines. This module turns that into styled
//! terminal lines, and bounds outgoing queries to a word limit before they
//! are submitted. The limit is advisory UX only; the backend performs its
//! own validation.

use ratatui::prelude::*;

use crate::api::ApiError;

/// Maximum words accepted in a single chat query.
pub const MAX_QUERY_WORDS: usize = 200;

/// Whitespace-separated word count, the same measure the limit uses.
pub fn word_count(text: &str) -> usize {
  text.split_whitespace().count()
}

/// Client-side check applied before a query is sent.
///
/// Over-limit and empty inputs are rejected with [`ApiError::Validation`]
/// and never reach the backend.
pub fn validate_query(text: &str) -> Result<(), ApiError> {
  if text.trim().is_empty() {
    return Err(ApiError::Validation("message is empty".to_string()));
  }

  let words = word_count(text);
  if words > MAX_QUERY_WORDS {
    return Err(ApiError::Validation(format!(
      "message is {} words, over the {} word limit",
      words, MAX_QUERY_WORDS
    )));
  }

  Ok(())
}

/// Render assistant text as terminal lines: bold spans for `**…**`, a
/// highlighted marker and indent for numbered list lines.
pub fn transcript_lines(content: &str) -> Vec<Line<'static>> {
  content
    .lines()
    .map(|line| match split_list_marker(line) {
      Some((marker, rest)) => {
        let mut spans = vec![
          Span::raw("  "),
          Span::styled(format!("{} ", marker), Style::default().fg(Color::Cyan)),
        ];
        spans.extend(bold_spans(rest));
        Line::from(spans)
      }
      None => Line::from(bold_spans(line)),
    })
    .collect()
}

/// Split a leading `N.` list marker off a line, if present.
fn split_list_marker(line: &str) -> Option<(&str, &str)> {
  let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
  if digits == 0 {
    return None;
  }
  let after = &line[digits..];
  if let Some(rest) = after.strip_prefix(". ") {
    Some((&line[..digits + 1], rest))
  } else {
    None
  }
}

/// Alternate raw and bold spans around `**` markers.
///
/// An unterminated marker is rendered literally rather than swallowing the
/// rest of the line.
fn bold_spans(text: &str) -> Vec<Span<'static>> {
  let chunks: Vec<&str> = text.split("**").collect();
  let balanced = chunks.len() % 2 == 1;

  let mut spans = Vec::new();
  for (i, chunk) in chunks.iter().enumerate() {
    let inside_marker = i % 2 == 1;
    if inside_marker && !balanced && i + 1 == chunks.len() {
      spans.push(Span::raw(format!("**{}", chunk)));
      continue;
    }
    if chunk.is_empty() {
      continue;
    }
    if inside_marker {
      spans.push(Span::styled(
        chunk.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
      ));
    } else {
      spans.push(Span::raw(chunk.to_string()));
    }
  }

  if spans.is_empty() {
    spans.push(Span::raw(""));
  }
  spans
}

#[cfg(test)]
mod tests {
  use super::*;

  fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
  }

  #[test]
  fn test_word_limit_boundary() {
    assert!(validate_query(&words(200)).is_ok());
    assert!(validate_query(&words(201)).is_err());
  }

  #[test]
  fn test_word_limit_error_is_validation() {
    let err = validate_query(&words(201)).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
  }

  #[test]
  fn test_empty_input_rejected() {
    assert!(validate_query("   ").is_err());
  }

  #[test]
  fn test_word_count_collapses_whitespace() {
    assert_eq!(word_count("  running   shoes \n under $100 "), 4);
  }

  #[test]
  fn test_bold_spans() {
    let spans = bold_spans("our **top pick** today");
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].content, "our ");
    assert_eq!(spans[1].content, "top pick");
    assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[2].content, " today");
  }

  #[test]
  fn test_unterminated_bold_rendered_literally() {
    let spans = bold_spans("oops **unclosed");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[1].content, "**unclosed");
    assert!(!spans[1].style.add_modifier.contains(Modifier::BOLD));
  }

  #[test]
  fn test_numbered_list_line() {
    let lines = transcript_lines("Here you go:\n1. **Aero Glide** running shoe\n2. Trail Max");
    assert_eq!(lines.len(), 3);

    let list_line = &lines[1];
    assert_eq!(list_line.spans[1].content, "1. ");
    assert_eq!(list_line.spans[2].content, "Aero Glide");
    assert!(list_line.spans[2].style.add_modifier.contains(Modifier::BOLD));
  }

  #[test]
  fn test_plain_digits_are_not_a_list() {
    let lines = transcript_lines("2 items in stock");
    assert_eq!(lines[0].spans.len(), 1);
    assert_eq!(lines[0].spans[0].content, "2 items in stock");
  }
}
