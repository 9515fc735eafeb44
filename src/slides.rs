//! Best-effort parser for the bundled presentation decks.
//!
//! Two alternative markdown sources exist: `SLIDES.md` (preferred) with
//! `## Slide N:` sections, and `GOOGLE_SLIDES_CONTENT.md` with `## SLIDE N:`
//! sections and fenced title blocks. Layout and column structure are picked
//! by keyword heuristics with a documented fallback order: labeled column
//! sections first, then an equal split of the remaining content lines.
//!
//! This is formatting, not a core algorithm; the only contract is a
//! non-empty, plausible slide sequence for non-empty well-formed input.

use once_cell::sync::Lazy;
use regex::Regex;

/// How a slide's content should be arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
  Title,
  Content,
  TwoColumn,
  ThreeColumn,
}

impl SlideLayout {
  pub fn column_count(&self) -> usize {
    match self {
      SlideLayout::TwoColumn => 2,
      SlideLayout::ThreeColumn => 3,
      _ => 1,
    }
  }
}

#[derive(Debug, Clone)]
pub struct Slide {
  pub title: String,
  pub body: String,
  pub layout: SlideLayout,
  /// Populated for two/three column layouts; one string per column.
  pub columns: Vec<String>,
}

static PRIMARY_HEADING: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?m)^## Slide \d+:").expect("static regex"));
static SECONDARY_HEADING: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?m)^## SLIDE \d+:").expect("static regex"));
static PRIMARY_TITLE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"### Title:\s*\*\*(.+?)\*\*").expect("static regex"));
static SECONDARY_TITLE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?s)\*\*Title[^:*]*:\*\*\s*```\s*(.+?)\s*```").expect("static regex"));

/// Parse the deck, preferring the primary source and falling back to the
/// secondary one when the primary has no slide sections.
pub fn parse_deck(primary: &str, secondary: &str) -> Vec<Slide> {
  if PRIMARY_HEADING.is_match(primary) {
    return parse_primary(primary);
  }
  parse_secondary(secondary)
}

fn parse_primary(text: &str) -> Vec<Slide> {
  PRIMARY_HEADING
    .split(text)
    .skip(1)
    .enumerate()
    .map(|(i, section)| {
      let section = section.trim();
      let title = PRIMARY_TITLE
        .captures(section)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| heading_title(section));
      let layout = primary_layout(i, section);
      build_slide(title, section, layout)
    })
    .collect()
}

fn parse_secondary(text: &str) -> Vec<Slide> {
  SECONDARY_HEADING
    .split(text)
    .skip(1)
    .map(|section| {
      let section = section.trim();
      let title = SECONDARY_TITLE
        .captures(section)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| heading_title(section));
      let layout = secondary_layout(section);
      build_slide(title, section, layout)
    })
    .collect()
}

/// Fall back to the remainder of the heading line when no explicit title
/// block is present.
fn heading_title(section: &str) -> String {
  let first = section.lines().next().unwrap_or("").trim();
  if first.is_empty() {
    "Untitled".to_string()
  } else {
    first.to_string()
  }
}

fn primary_layout(index: usize, section: &str) -> SlideLayout {
  if index == 0 && (section.contains("Introduction") || section.contains("Title")) {
    SlideLayout::Title
  } else if section.contains("Two Agent Cards")
    || (section.contains("Left") && section.contains("Right"))
  {
    SlideLayout::TwoColumn
  } else if section.contains("Three") && section.contains("Column") {
    SlideLayout::ThreeColumn
  } else {
    SlideLayout::Content
  }
}

fn secondary_layout(section: &str) -> SlideLayout {
  if section.contains("Title Only") || section.contains("Title Slide") {
    SlideLayout::Title
  } else if section.contains("Two Content")
    || (section.contains("Left Column") && section.contains("Right Column"))
  {
    SlideLayout::TwoColumn
  } else if section.contains("Three Columns")
    || (section.contains("Column 1") && section.contains("Column 2") && section.contains("Column 3"))
  {
    SlideLayout::ThreeColumn
  } else {
    SlideLayout::Content
  }
}

fn build_slide(title: String, section: &str, layout: SlideLayout) -> Slide {
  let body = clean_body(section);
  let columns = match layout {
    SlideLayout::TwoColumn => split_columns(&body, &["left", "right"]),
    SlideLayout::ThreeColumn => split_columns(&body, &["column 1", "column 2", "column 3"]),
    _ => Vec::new(),
  };

  Slide {
    title,
    body,
    layout,
    columns,
  }
}

/// Strip metadata lines (title/layout declarations) from a section.
fn clean_body(section: &str) -> String {
  section
    .lines()
    .skip(1) // heading remainder
    .filter(|line| {
      let t = line.trim_start();
      !t.starts_with("### Title:") && !t.starts_with("### Layout:") && !t.starts_with("**Title")
    })
    .collect::<Vec<_>>()
    .join("\n")
    .trim()
    .to_string()
}

/// Split a body into labeled columns; if no label matches, fall back to an
/// equal split of the content lines.
fn split_columns(body: &str, labels: &[&str]) -> Vec<String> {
  let mut columns: Vec<String> = vec![String::new(); labels.len()];
  let mut current: Option<usize> = None;
  let mut matched = false;

  for line in body.lines() {
    let plain = line
      .trim_start()
      .trim_start_matches(['*', '-', '#', ' '])
      .to_lowercase();

    let label_idx = labels
      .iter()
      .position(|label| plain.starts_with(label) && plain.contains(':'));
    if let Some(idx) = label_idx {
      current = Some(idx);
      matched = true;
      // Keep any content trailing the label on the same line
      if let Some(pos) = line.find(':') {
        let rest = line[pos + 1..].trim();
        if !rest.is_empty() {
          columns[idx].push_str(rest);
          columns[idx].push('\n');
        }
      }
      continue;
    }

    if let Some(idx) = current {
      columns[idx].push_str(line);
      columns[idx].push('\n');
    }
  }

  if matched {
    return columns.into_iter().map(|c| c.trim().to_string()).collect();
  }

  equal_split(body, labels.len())
}

/// Last-resort column content: content lines chunked into equal parts.
fn equal_split(body: &str, parts: usize) -> Vec<String> {
  let lines: Vec<&str> = body
    .lines()
    .filter(|line| {
      let t = line.trim();
      !t.is_empty() && !t.starts_with('#')
    })
    .collect();

  let chunk = lines.len().div_ceil(parts).max(1);
  let mut columns: Vec<String> = lines.chunks(chunk).map(|c| c.join("\n")).collect();
  columns.resize(parts, String::new());
  columns
}

#[cfg(test)]
mod tests {
  use super::*;

  const PRIMARY: &str = "\
# Deck

## Slide 1: Introduction

### Title: **Shoplytic in Five Minutes**

Welcome to the walkthrough.

## Slide 2: Architecture

### Title: **Two Agent Cards**

Left Column:
- General info agent
- Answers catalog questions

Right Column:
- Order agent
- Builds the cart

## Slide 3: Takeaways

### Title: **What We Learned**

- Cache aggressively
- Let the backend route
";

  const SECONDARY: &str = "\
## SLIDE 1: Opening

### Layout: Title Only

**Title (large):**
```
Shoplytic
```

Subtitle text here.

## SLIDE 2: Pipeline

### Layout: Three Columns

Column 1: retrieval
Column 2: routing
Column 3: answer
";

  #[test]
  fn test_primary_deck_parses() {
    let slides = parse_deck(PRIMARY, "");
    assert_eq!(slides.len(), 3);
    assert_eq!(slides[0].title, "Shoplytic in Five Minutes");
    assert_eq!(slides[0].layout, SlideLayout::Title);
    assert_eq!(slides[2].title, "What We Learned");
  }

  #[test]
  fn test_labeled_columns_are_extracted() {
    let slides = parse_deck(PRIMARY, "");
    let slide = &slides[1];
    assert_eq!(slide.layout, SlideLayout::TwoColumn);
    assert_eq!(slide.columns.len(), 2);
    assert!(slide.columns[0].contains("General info agent"));
    assert!(slide.columns[1].contains("Order agent"));
  }

  #[test]
  fn test_secondary_deck_used_when_primary_empty() {
    let slides = parse_deck("no slide sections here", SECONDARY);
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].title, "Shoplytic");
    assert_eq!(slides[0].layout, SlideLayout::Title);
    assert_eq!(slides[1].layout, SlideLayout::ThreeColumn);
    assert!(slides[1].columns[0].contains("retrieval"));
    assert!(slides[1].columns[2].contains("answer"));
  }

  #[test]
  fn test_unlabeled_columns_fall_back_to_equal_split() {
    let doc = "\
## Slide 1: Split

Left and Right comparison without labels.
alpha
beta
gamma
delta
";
    let slides = parse_deck(doc, "");
    assert_eq!(slides[0].layout, SlideLayout::TwoColumn);
    assert_eq!(slides[0].columns.len(), 2);
    assert!(!slides[0].columns[0].is_empty());
    assert!(!slides[0].columns[1].is_empty());
  }

  #[test]
  fn test_empty_input_yields_no_slides() {
    assert!(parse_deck("", "").is_empty());
  }

  #[test]
  fn test_metadata_lines_removed_from_body() {
    let slides = parse_deck(PRIMARY, "");
    assert!(!slides[0].body.contains("### Title:"));
    assert!(slides[0].body.contains("Welcome to the walkthrough."));
  }
}
