use crate::food::analysis::nutrition::{parse_food_description, ParsedMacros};
use crate::food::analysis::search::{FoodDetails, FoodSearchService, FoodSource, SearchedFood};
use crate::food::api::local::{self, FoodItem};
use crate::food::api::FoodDetail;

pub async fn handle_command(input: &str, service: &FoodSearchService, max_results: usize) -> Result<String, String> {
    let input = input.trim();
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command.to_lowercase().as_str() {
        "search" => {
            if rest.is_empty() {
                return Err("Please specify a food to search. Usage: search <query>".to_string());
            }
            Ok(format_search(rest, service, max_results).await)
        }
        "food" => {
            if rest.is_empty() {
                return Err("Please specify a food id. Usage: food <id>".to_string());
            }
            match service.details(rest).await {
                Some(FoodDetails::Local(food)) => Ok(format_local_food(food)),
                Some(FoodDetails::FatSecret(detail)) => Ok(format_detail(&detail)),
                None => Err(format!("No food found for id '{}'", rest)),
            }
        }
        "parse" => Ok(format_macros(&parse_food_description(rest))),
        "categories" => Ok(format!("🗂️ Categories: {}", local::all_categories().join(", "))),
        "category" => {
            let foods = local::get_foods_by_category(rest);
            if foods.is_empty() {
                return Err(format!("No foods in category '{}'. Type 'categories' to list them.", rest));
            }
            Ok(foods
                .into_iter()
                .map(|food| format!("• [{}] {}", food.id, food.name))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        _ => Err(format!("Unknown command '{}'. Type 'help' for available commands.", command)),
    }
}

async fn format_search(query: &str, service: &FoodSearchService, max_results: usize) -> String {
    let outcome = service.search(query, max_results).await;

    if outcome.foods.is_empty() {
        return format!("No foods found for \"{}\"", query);
    }

    let source = match outcome.source {
        FoodSource::FatSecret => "Powered by FatSecret",
        FoodSource::Local => "Local Database",
    };

    let mut info = format!("🔍 {} result(s) for \"{}\" ({})\n", outcome.foods.len(), query, source);
    for food in &outcome.foods {
        match food {
            SearchedFood::FatSecret { food, macros } => {
                let brand = food
                    .brand_name
                    .as_ref()
                    .map(|brand| format!(" ({})", brand))
                    .unwrap_or_default();
                info.push_str(&format!("\n• [{}] {}{} [{}]\n  {}\n", food.id, food.name, brand, food.food_type, format_macros(macros)));
            }
            SearchedFood::Local(food) => {
                info.push_str(&format!(
                    "\n• [{}] {} [{}]\n  {}\n",
                    food.id, food.name, food.category, food.serving.description
                ));
                info.push_str(&format!(
                    "  {}\n",
                    format_macros(&ParsedMacros {
                        calories: food.nutrition.calories,
                        protein: food.nutrition.protein,
                        carbs: food.nutrition.carbs,
                        fat: food.nutrition.fat,
                    })
                ));
            }
        }
    }
    info
}

fn format_macros(macros: &ParsedMacros) -> String {
    format!(
        "Cal: {} | P: {}g | C: {}g | F: {}g",
        macros.calories, macros.protein, macros.carbs, macros.fat
    )
}

fn format_local_food(food: &FoodItem) -> String {
    let mut info = format!("🍽️ {}", food.name);
    if let Some(brand) = food.brand {
        info.push_str(&format!(" ({})", brand));
    }
    info.push_str(&format!("\nCategory: {}\nServing: {}\n", food.category, food.serving.description));

    let nutrition = &food.nutrition;
    info.push_str(&format!("• Calories: {}\n", nutrition.calories));
    info.push_str(&format!("• Protein: {} g\n", nutrition.protein));
    info.push_str(&format!("• Carbs: {} g\n", nutrition.carbs));
    info.push_str(&format!("• Fat: {} g\n", nutrition.fat));

    let optional = [
        ("Fiber", nutrition.fiber, "g"),
        ("Sugar", nutrition.sugar, "g"),
        ("Sodium", nutrition.sodium, "mg"),
        ("Cholesterol", nutrition.cholesterol, "mg"),
    ];
    for (name, value, unit) in optional {
        if let Some(value) = value {
            info.push_str(&format!("• {}: {} {}\n", name, value, unit));
        }
    }
    info
}

fn format_detail(detail: &FoodDetail) -> String {
    let mut info = format!("🍽️ {} [{}]", detail.name, detail.food_type);
    if let Some(brand) = &detail.brand_name {
        info.push_str(&format!(" ({})", brand));
    }
    info.push('\n');

    for serving in &detail.servings {
        info.push_str(&format!(
            "\n{}:\n• Calories: {}\n• Protein: {} g\n• Carbs: {} g\n• Fat: {} g\n",
            serving.serving_description, serving.calories, serving.protein, serving.carbohydrate, serving.fat
        ));
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::{FatSecretClient, FatSecretConfig};

    fn offline_service() -> FoodSearchService {
        FoodSearchService::new(FatSecretClient::new(FatSecretConfig::new("", "")))
    }

    #[tokio::test]
    async fn test_parse_command() {
        let output = handle_command("parse Calories: 250 - Fat: 10.5g - Protein: 20g", &offline_service(), 20)
            .await
            .unwrap();
        assert_eq!(output, "Cal: 250 | P: 20g | C: 0g | F: 10.5g");
    }

    #[tokio::test]
    async fn test_search_command_uses_local_database_offline() {
        let output = handle_command("search chicken", &offline_service(), 20).await.unwrap();
        assert!(output.contains("Local Database"));
        assert!(output.contains("[protein-001] Chicken Breast"));
    }

    #[tokio::test]
    async fn test_search_without_query_is_rejected() {
        assert!(handle_command("search   ", &offline_service(), 20).await.is_err());
    }

    #[tokio::test]
    async fn test_food_command_for_local_id() {
        let output = handle_command("food protein-004", &offline_service(), 20).await.unwrap();
        assert!(output.starts_with("🍽️ Eggs"));
        assert!(output.contains("• Cholesterol: 186 mg"));
    }

    #[tokio::test]
    async fn test_unknown_food_id() {
        let err = handle_command("food 999999", &offline_service(), 20).await.unwrap_err();
        assert!(err.contains("999999"));
    }

    #[tokio::test]
    async fn test_category_commands() {
        let service = offline_service();
        let categories = handle_command("categories", &service, 20).await.unwrap();
        assert!(categories.contains("Nuts & Seeds"));

        let oils = handle_command("category Oils & Fats", &service, 20).await.unwrap();
        assert!(oils.contains("[oil-001] Olive Oil"));
        assert!(!oils.contains("Avocado"));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let err = handle_command("recipe pizza", &offline_service(), 20).await.unwrap_err();
        assert!(err.contains("help"));
    }
}
