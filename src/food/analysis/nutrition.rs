use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

const SEGMENT_DELIMITER: &str = " - ";
const NUTRITION_MARKER: &str = "Calories:";

lazy_static! {
    static ref CALORIES: Regex = label_pattern("Calories");
    static ref PROTEIN: Regex = label_pattern("Protein");
    static ref CARBS: Regex = label_pattern("Carbs");
    static ref FAT: Regex = label_pattern("Fat");
}

fn label_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"{}:\s*(\d+(?:\.\d+)?|\.\d+)", label)).expect("macro label pattern is valid")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedMacros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Pull calories and macros out of a FatSecret food description such as
/// `"Per 100g - Calories: 52kcal | Fat: 0.17g | Carbs: 13.81g | Protein: 0.26g"`.
///
/// The nutrition part starts at the first `" - "` segment mentioning
/// `Calories:`. Anything missing or unreadable is reported as 0.
pub fn parse_food_description(description: &str) -> ParsedMacros {
    let segments: Vec<&str> = description.split(SEGMENT_DELIMITER).collect();
    let nutrition = segments
        .iter()
        .position(|segment| segment.contains(NUTRITION_MARKER))
        .map(|start| segments[start..].join(SEGMENT_DELIMITER))
        .unwrap_or_default();

    ParsedMacros {
        calories: extract(&CALORIES, &nutrition),
        protein: extract(&PROTEIN, &nutrition),
        carbs: extract(&CARBS, &nutrition),
        fat: extract(&FAT, &nutrition),
    }
}

fn extract(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().parse().ok())
        .unwrap_or(0.0)
}
