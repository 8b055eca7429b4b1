pub fn help_text() -> String {
    [
        "",
        "🥗 Food Commands:",
        "  search <query>        - Search foods (FatSecret, falling back to the local database)",
        "  food <id>             - Show nutrition details for a food id",
        "  parse <description>   - Extract calories and macros from a FatSecret description",
        "  categories            - List local database categories",
        "  category <name>       - List local foods in a category",
        "",
        "⚙️ System Commands:",
        "  help                  - Show this help message",
        "  exit | quit           - Leave the prompt",
        "",
    ]
    .join("\n")
}

pub fn is_exit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_food_command() {
        let help = help_text();
        for command in ["search", "food", "parse", "categories", "category"] {
            assert!(help.contains(&format!("  {} ", command)), "missing {}", command);
        }
    }

    #[test]
    fn test_exit_words() {
        assert!(is_exit("exit"));
        assert!(is_exit("QUIT"));
        assert!(!is_exit("search exit"));
    }
}
