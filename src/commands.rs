/// Available commands and autocomplete logic

#[derive(Debug, Clone)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "products",
    aliases: &["p", "product", "browse"],
    description: "Browse the product catalog",
  },
  Command {
    name: "cart",
    aliases: &["ca"],
    description: "Review the cart",
  },
  Command {
    name: "orders",
    aliases: &["o", "order", "history"],
    description: "Order history",
  },
  Command {
    name: "chat",
    aliases: &["c", "assistant", "ask"],
    description: "Talk to the shopping assistant",
  },
  Command {
    name: "slides",
    aliases: &["s", "deck", "presentation"],
    description: "Present the bundled slide deck",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit shoply",
  },
];

/// Get autocomplete suggestions for a given input
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input_lower = input.to_lowercase();

  if input_lower.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&Command, u32)> = Vec::new();

  for cmd in COMMANDS {
    let priority = if cmd.name == input_lower {
      0
    } else if cmd.aliases.contains(&input_lower.as_str()) {
      1
    } else if cmd.name.starts_with(&input_lower) {
      2
    } else if cmd.aliases.iter().any(|a| a.starts_with(&input_lower)) {
      3
    } else if cmd.name.contains(&input_lower) {
      4
    } else if cmd.aliases.iter().any(|a| a.contains(&input_lower)) {
      5
    } else {
      continue;
    };
    matches.push((cmd, priority));
  }

  // Sort by priority
  matches.sort_by_key(|(_, priority)| *priority);

  matches.into_iter().map(|(cmd, _)| cmd).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_returns_all() {
    let suggestions = get_suggestions("");
    assert_eq!(suggestions.len(), COMMANDS.len());
  }

  #[test]
  fn test_exact_match() {
    let suggestions = get_suggestions("products");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "products");
  }

  #[test]
  fn test_alias_match() {
    let suggestions = get_suggestions("o");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "orders");
  }

  #[test]
  fn test_prefix_match() {
    let suggestions = get_suggestions("sl");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "slides");
  }

  #[test]
  fn test_fuzzy_match() {
    let suggestions = get_suggestions("duct");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].name, "products");
  }

  #[test]
  fn test_alias_beats_prefix() {
    // "c" is an alias of chat and a prefix of cart
    let suggestions = get_suggestions("c");
    assert_eq!(suggestions[0].name, "chat");
  }
}
