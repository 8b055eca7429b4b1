use serde::Serialize;

/// Built-in catalogue used when FatSecret is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodItem {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<&'static str>,
    pub category: &'static str,
    pub serving: Serving,
    pub nutrition: Nutrition,
    #[serde(rename = "searchTerms")]
    pub search_terms: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Serving {
    pub amount: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

impl Serving {
    const fn new(amount: f64, unit: &'static str, description: &'static str) -> Self {
        Self { amount, unit, description }
    }
}

/// Grams, except sodium and cholesterol which are milligrams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
}

impl Nutrition {
    const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber: None,
            sugar: None,
            sodium: None,
            cholesterol: None,
        }
    }

    const fn fiber(self, grams: f64) -> Self {
        Self { fiber: Some(grams), ..self }
    }

    const fn sugar(self, grams: f64) -> Self {
        Self { sugar: Some(grams), ..self }
    }

    const fn sodium(self, milligrams: f64) -> Self {
        Self { sodium: Some(milligrams), ..self }
    }

    const fn cholesterol(self, milligrams: f64) -> Self {
        Self { cholesterol: Some(milligrams), ..self }
    }
}

pub static FOOD_DATABASE: &[FoodItem] = &[
    FoodItem {
        id: "fruit-001",
        name: "Apple",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "medium", "1 medium apple (182g)"),
        nutrition: Nutrition::new(95.0, 0.5, 25.0, 0.3).fiber(4.4).sugar(19.0),
        search_terms: &["apple", "apples", "fruit"],
    },
    FoodItem {
        id: "fruit-002",
        name: "Banana",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "medium", "1 medium banana (118g)"),
        nutrition: Nutrition::new(105.0, 1.3, 27.0, 0.4).fiber(3.1).sugar(14.0),
        search_terms: &["banana", "bananas", "fruit"],
    },
    FoodItem {
        id: "fruit-003",
        name: "Orange",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "medium", "1 medium orange (131g)"),
        nutrition: Nutrition::new(62.0, 1.2, 15.0, 0.2).fiber(3.1).sugar(12.0),
        search_terms: &["orange", "oranges", "citrus", "fruit"],
    },
    FoodItem {
        id: "fruit-004",
        name: "Strawberries",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "cup", "1 cup halved (152g)"),
        nutrition: Nutrition::new(49.0, 1.0, 12.0, 0.5).fiber(3.0).sugar(7.0),
        search_terms: &["strawberry", "strawberries", "berries", "fruit"],
    },
    FoodItem {
        id: "fruit-005",
        name: "Blueberries",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "cup", "1 cup (148g)"),
        nutrition: Nutrition::new(84.0, 1.1, 21.0, 0.5).fiber(3.6).sugar(15.0),
        search_terms: &["blueberry", "blueberries", "berries", "fruit"],
    },
    FoodItem {
        id: "fruit-006",
        name: "Grapes",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "cup", "1 cup (151g)"),
        nutrition: Nutrition::new(104.0, 1.1, 27.0, 0.2).fiber(1.4).sugar(23.0),
        search_terms: &["grape", "grapes", "fruit"],
    },
    FoodItem {
        id: "fruit-007",
        name: "Watermelon",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "cup", "1 cup diced (152g)"),
        nutrition: Nutrition::new(46.0, 0.9, 12.0, 0.2).fiber(0.6).sugar(9.0),
        search_terms: &["watermelon", "melon", "fruit"],
    },
    FoodItem {
        id: "fruit-008",
        name: "Mango",
        brand: None,
        category: "Fruits",
        serving: Serving::new(1.0, "cup", "1 cup sliced (165g)"),
        nutrition: Nutrition::new(99.0, 1.4, 25.0, 0.6).fiber(2.6).sugar(23.0),
        search_terms: &["mango", "mangoes", "fruit", "tropical"],
    },
    FoodItem {
        id: "veg-001",
        name: "Broccoli",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "cup", "1 cup chopped (91g)"),
        nutrition: Nutrition::new(31.0, 2.6, 6.0, 0.3).fiber(2.4).sugar(1.5),
        search_terms: &["broccoli", "vegetable", "green"],
    },
    FoodItem {
        id: "veg-002",
        name: "Carrots",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "medium", "1 medium carrot (61g)"),
        nutrition: Nutrition::new(25.0, 0.6, 6.0, 0.1).fiber(1.7).sugar(3.0),
        search_terms: &["carrot", "carrots", "vegetable", "orange"],
    },
    FoodItem {
        id: "veg-003",
        name: "Spinach",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "cup", "1 cup raw (30g)"),
        nutrition: Nutrition::new(7.0, 0.9, 1.1, 0.1).fiber(0.7).sugar(0.1),
        search_terms: &["spinach", "leafy green", "vegetable", "greens"],
    },
    FoodItem {
        id: "veg-004",
        name: "Bell Pepper",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "medium", "1 medium pepper (119g)"),
        nutrition: Nutrition::new(30.0, 1.2, 7.0, 0.3).fiber(2.5).sugar(4.2),
        search_terms: &["pepper", "bell pepper", "capsicum", "vegetable"],
    },
    FoodItem {
        id: "veg-005",
        name: "Tomato",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "medium", "1 medium tomato (123g)"),
        nutrition: Nutrition::new(22.0, 1.1, 4.8, 0.2).fiber(1.5).sugar(3.2),
        search_terms: &["tomato", "tomatoes", "vegetable"],
    },
    FoodItem {
        id: "veg-006",
        name: "Cucumber",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "cup", "1 cup sliced (119g)"),
        nutrition: Nutrition::new(16.0, 0.8, 3.8, 0.1).fiber(0.6).sugar(1.9),
        search_terms: &["cucumber", "vegetable"],
    },
    FoodItem {
        id: "veg-007",
        name: "Sweet Potato",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "medium", "1 medium baked (114g)"),
        nutrition: Nutrition::new(103.0, 2.3, 24.0, 0.2).fiber(3.8).sugar(7.4),
        search_terms: &["sweet potato", "yam", "vegetable", "potato"],
    },
    FoodItem {
        id: "veg-008",
        name: "Lettuce",
        brand: None,
        category: "Vegetables",
        serving: Serving::new(1.0, "cup", "1 cup shredded (47g)"),
        nutrition: Nutrition::new(7.0, 0.5, 1.2, 0.1).fiber(0.6).sugar(0.5),
        search_terms: &["lettuce", "salad", "greens", "vegetable"],
    },
    FoodItem {
        id: "protein-001",
        name: "Chicken Breast",
        brand: Some("Generic"),
        category: "Proteins",
        serving: Serving::new(100.0, "g", "100g cooked, skinless"),
        nutrition: Nutrition::new(165.0, 31.0, 0.0, 3.6).sodium(74.0).cholesterol(85.0),
        search_terms: &["chicken", "chicken breast", "poultry", "meat", "protein"],
    },
    FoodItem {
        id: "protein-002",
        name: "Salmon",
        brand: None,
        category: "Proteins",
        serving: Serving::new(100.0, "g", "100g cooked"),
        nutrition: Nutrition::new(206.0, 22.0, 0.0, 13.0).sodium(59.0).cholesterol(63.0),
        search_terms: &["salmon", "fish", "seafood", "protein"],
    },
    FoodItem {
        id: "protein-003",
        name: "Ground Beef (90% lean)",
        brand: None,
        category: "Proteins",
        serving: Serving::new(100.0, "g", "100g cooked"),
        nutrition: Nutrition::new(176.0, 25.0, 0.0, 8.0).sodium(72.0).cholesterol(77.0),
        search_terms: &["beef", "ground beef", "mince", "meat", "protein"],
    },
    FoodItem {
        id: "protein-004",
        name: "Eggs",
        brand: None,
        category: "Proteins",
        serving: Serving::new(1.0, "large", "1 large egg (50g)"),
        nutrition: Nutrition::new(72.0, 6.3, 0.4, 4.8).sodium(71.0).cholesterol(186.0),
        search_terms: &["egg", "eggs", "protein"],
    },
    FoodItem {
        id: "protein-005",
        name: "Tofu (Firm)",
        brand: None,
        category: "Proteins",
        serving: Serving::new(100.0, "g", "100g firm tofu"),
        nutrition: Nutrition::new(144.0, 17.0, 3.0, 9.0).sodium(14.0),
        search_terms: &["tofu", "soy", "protein", "vegetarian", "vegan"],
    },
    FoodItem {
        id: "protein-006",
        name: "Greek Yogurt (Non-fat)",
        brand: Some("Generic"),
        category: "Dairy",
        serving: Serving::new(170.0, "g", "1 container (170g)"),
        nutrition: Nutrition::new(100.0, 18.0, 7.0, 0.0).sugar(6.0).sodium(65.0),
        search_terms: &["yogurt", "greek yogurt", "dairy", "protein"],
    },
    FoodItem {
        id: "protein-007",
        name: "Tuna (Canned in Water)",
        brand: Some("Generic"),
        category: "Proteins",
        serving: Serving::new(85.0, "g", "1 can drained (85g)"),
        nutrition: Nutrition::new(99.0, 22.0, 0.0, 1.0).sodium(318.0),
        search_terms: &["tuna", "fish", "canned tuna", "seafood", "protein"],
    },
    FoodItem {
        id: "protein-008",
        name: "Lentils (Cooked)",
        brand: None,
        category: "Proteins",
        serving: Serving::new(1.0, "cup", "1 cup cooked (198g)"),
        nutrition: Nutrition::new(230.0, 18.0, 40.0, 0.8).fiber(16.0).sodium(4.0),
        search_terms: &["lentils", "legumes", "beans", "protein", "vegetarian"],
    },
    FoodItem {
        id: "grain-001",
        name: "Brown Rice (Cooked)",
        brand: None,
        category: "Grains",
        serving: Serving::new(1.0, "cup", "1 cup cooked (195g)"),
        nutrition: Nutrition::new(218.0, 4.5, 46.0, 1.6).fiber(3.5),
        search_terms: &["rice", "brown rice", "grain", "carb"],
    },
    FoodItem {
        id: "grain-002",
        name: "White Rice (Cooked)",
        brand: None,
        category: "Grains",
        serving: Serving::new(1.0, "cup", "1 cup cooked (158g)"),
        nutrition: Nutrition::new(205.0, 4.2, 45.0, 0.4).fiber(0.6),
        search_terms: &["rice", "white rice", "grain", "carb"],
    },
    FoodItem {
        id: "grain-003",
        name: "Quinoa (Cooked)",
        brand: None,
        category: "Grains",
        serving: Serving::new(1.0, "cup", "1 cup cooked (185g)"),
        nutrition: Nutrition::new(222.0, 8.0, 39.0, 3.6).fiber(5.0),
        search_terms: &["quinoa", "grain", "carb", "protein"],
    },
    FoodItem {
        id: "grain-004",
        name: "Oats (Dry)",
        brand: None,
        category: "Grains",
        serving: Serving::new(0.5, "cup", "1/2 cup dry (40g)"),
        nutrition: Nutrition::new(150.0, 5.0, 27.0, 3.0).fiber(4.0),
        search_terms: &["oats", "oatmeal", "porridge", "grain", "breakfast"],
    },
    FoodItem {
        id: "grain-005",
        name: "Whole Wheat Bread",
        brand: Some("Generic"),
        category: "Grains",
        serving: Serving::new(1.0, "slice", "1 slice (28g)"),
        nutrition: Nutrition::new(80.0, 4.0, 14.0, 1.0).fiber(2.0).sodium(140.0),
        search_terms: &["bread", "wheat bread", "whole wheat", "grain"],
    },
    FoodItem {
        id: "grain-006",
        name: "Pasta (Whole Wheat, Cooked)",
        brand: None,
        category: "Grains",
        serving: Serving::new(1.0, "cup", "1 cup cooked (140g)"),
        nutrition: Nutrition::new(174.0, 7.5, 37.0, 0.8).fiber(6.0),
        search_terms: &["pasta", "noodles", "spaghetti", "grain", "carb"],
    },
    FoodItem {
        id: "grain-007",
        name: "Sweet Corn",
        brand: None,
        category: "Grains",
        serving: Serving::new(1.0, "cup", "1 cup kernels (154g)"),
        nutrition: Nutrition::new(125.0, 4.7, 27.0, 1.8).fiber(3.6).sugar(9.0),
        search_terms: &["corn", "sweet corn", "vegetable", "grain"],
    },
    FoodItem {
        id: "nuts-001",
        name: "Almonds",
        brand: None,
        category: "Nuts & Seeds",
        serving: Serving::new(28.0, "g", "1 oz (28g), about 23 almonds"),
        nutrition: Nutrition::new(164.0, 6.0, 6.0, 14.0).fiber(3.5),
        search_terms: &["almonds", "nuts", "snack"],
    },
    FoodItem {
        id: "nuts-002",
        name: "Peanut Butter",
        brand: Some("Generic"),
        category: "Nuts & Seeds",
        serving: Serving::new(2.0, "tbsp", "2 tablespoons (32g)"),
        nutrition: Nutrition::new(188.0, 8.0, 7.0, 16.0).fiber(2.0).sugar(3.0),
        search_terms: &["peanut butter", "peanuts", "nut butter", "spread"],
    },
    FoodItem {
        id: "nuts-003",
        name: "Walnuts",
        brand: None,
        category: "Nuts & Seeds",
        serving: Serving::new(28.0, "g", "1 oz (28g), about 14 halves"),
        nutrition: Nutrition::new(185.0, 4.3, 3.9, 18.5).fiber(1.9),
        search_terms: &["walnuts", "nuts", "snack"],
    },
    FoodItem {
        id: "nuts-004",
        name: "Chia Seeds",
        brand: None,
        category: "Nuts & Seeds",
        serving: Serving::new(28.0, "g", "2 tablespoons (28g)"),
        nutrition: Nutrition::new(138.0, 4.7, 12.0, 8.7).fiber(9.8),
        search_terms: &["chia seeds", "seeds", "superfood"],
    },
    FoodItem {
        id: "dairy-001",
        name: "Milk (2% Fat)",
        brand: Some("Generic"),
        category: "Dairy",
        serving: Serving::new(1.0, "cup", "1 cup (244g)"),
        nutrition: Nutrition::new(122.0, 8.0, 12.0, 4.8).sugar(12.0).sodium(115.0),
        search_terms: &["milk", "dairy", "2%"],
    },
    FoodItem {
        id: "dairy-002",
        name: "Cheddar Cheese",
        brand: Some("Generic"),
        category: "Dairy",
        serving: Serving::new(28.0, "g", "1 oz (28g)"),
        nutrition: Nutrition::new(114.0, 7.0, 0.4, 9.4).sodium(176.0).cholesterol(30.0),
        search_terms: &["cheese", "cheddar", "dairy"],
    },
    FoodItem {
        id: "dairy-003",
        name: "Cottage Cheese (Low-fat)",
        brand: Some("Generic"),
        category: "Dairy",
        serving: Serving::new(1.0, "cup", "1 cup (226g)"),
        nutrition: Nutrition::new(163.0, 28.0, 6.0, 2.3).sodium(918.0),
        search_terms: &["cottage cheese", "cheese", "dairy", "protein"],
    },
    FoodItem {
        id: "dairy-004",
        name: "Almond Milk (Unsweetened)",
        brand: Some("Generic"),
        category: "Dairy Alternatives",
        serving: Serving::new(1.0, "cup", "1 cup (240ml)"),
        nutrition: Nutrition::new(30.0, 1.0, 1.0, 2.5).sodium(170.0),
        search_terms: &["almond milk", "milk alternative", "vegan", "dairy free"],
    },
    FoodItem {
        id: "oil-001",
        name: "Olive Oil",
        brand: None,
        category: "Oils & Fats",
        serving: Serving::new(1.0, "tbsp", "1 tablespoon (14g)"),
        nutrition: Nutrition::new(119.0, 0.0, 0.0, 13.5),
        search_terms: &["olive oil", "oil", "fat", "cooking"],
    },
    FoodItem {
        id: "oil-002",
        name: "Butter",
        brand: Some("Generic"),
        category: "Oils & Fats",
        serving: Serving::new(1.0, "tbsp", "1 tablespoon (14g)"),
        nutrition: Nutrition::new(102.0, 0.1, 0.0, 11.5).sodium(91.0).cholesterol(31.0),
        search_terms: &["butter", "fat", "dairy"],
    },
    FoodItem {
        id: "oil-003",
        name: "Avocado",
        brand: None,
        category: "Fruits",
        serving: Serving::new(0.5, "medium", "1/2 medium avocado (100g)"),
        nutrition: Nutrition::new(160.0, 2.0, 8.5, 14.7).fiber(6.7).sugar(0.7),
        search_terms: &["avocado", "fruit", "healthy fat"],
    },
];

fn match_score(food: &FoodItem, query: &str) -> u32 {
    let mut score = 0;

    let name = food.name.to_lowercase();
    if name == query {
        score += 100;
    } else if name.starts_with(query) {
        score += 50;
    } else if name.contains(query) {
        score += 25;
    }

    for term in food.search_terms {
        if *term == query {
            score += 75;
        } else if term.starts_with(query) {
            score += 35;
        } else if term.contains(query) {
            score += 15;
        }
    }

    if food
        .brand
        .map_or(false, |brand| brand.to_lowercase().contains(query))
    {
        score += 10;
    }

    score
}

/// Rank catalogue entries against `query`, best first. Equal scores keep
/// catalogue order.
pub fn search_foods(query: &str, max_results: usize) -> Vec<&'static FoodItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&'static FoodItem, u32)> = FOOD_DATABASE
        .iter()
        .map(|food| (food, match_score(food, &query)))
        .filter(|(_, score)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(max_results)
        .map(|(food, _)| food)
        .collect()
}

pub fn get_food_by_id(id: &str) -> Option<&'static FoodItem> {
    FOOD_DATABASE.iter().find(|food| food.id == id)
}

pub fn get_foods_by_category(category: &str) -> Vec<&'static FoodItem> {
    FOOD_DATABASE
        .iter()
        .filter(|food| food.category == category)
        .collect()
}

pub fn all_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for food in FOOD_DATABASE {
        if !categories.contains(&food.category) {
            categories.push(food.category);
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(foods: &[&FoodItem]) -> Vec<&'static str> {
        foods.iter().map(|food| food.id).collect()
    }

    #[test]
    fn test_catalogue_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for food in FOOD_DATABASE {
            assert!(seen.insert(food.id), "duplicate id {}", food.id);
        }
        assert_eq!(FOOD_DATABASE.len(), 42);
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let results = search_foods("Apple", 20);
        assert_eq!(results[0].id, "fruit-001");
        assert_eq!(match_score(results[0], "apple"), 100 + 75 + 35);
    }

    #[test]
    fn test_query_is_trimmed_and_lowercased() {
        assert_eq!(ids(&search_foods("  SALMON ", 20)), vec!["protein-002"]);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        assert!(search_foods("", 20).is_empty());
        assert!(search_foods("   ", 20).is_empty());
    }

    #[test]
    fn test_ties_keep_catalogue_order() {
        let results = search_foods("rice", 20);
        assert_eq!(ids(&results), vec!["grain-001", "grain-002"]);
    }

    #[test]
    fn test_max_results_truncates() {
        assert_eq!(search_foods("fruit", 3).len(), 3);
        assert!(search_foods("fruit", 20).len() > 3);
    }

    #[test]
    fn test_brand_match_scores() {
        let results = search_foods("generic", 50);
        assert!(!results.is_empty());
        assert!(results.iter().all(|food| food.brand == Some("Generic")));
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(search_foods("xylophone", 20).is_empty());
    }

    #[test]
    fn test_lookup_by_id_and_category() {
        let eggs = get_food_by_id("protein-004").unwrap();
        assert_eq!(eggs.name, "Eggs");
        assert_eq!(eggs.nutrition.cholesterol, Some(186.0));
        assert!(get_food_by_id("missing").is_none());

        let dairy = get_foods_by_category("Dairy");
        assert!(dairy.iter().any(|food| food.id == "protein-006"));
        assert!(dairy.iter().all(|food| food.category == "Dairy"));
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let categories = all_categories();
        assert_eq!(categories[0], "Fruits");
        assert_eq!(categories[1], "Vegetables");
        assert_eq!(categories.iter().filter(|c| **c == "Fruits").count(), 1);
        assert!(categories.contains(&"Dairy Alternatives"));
    }
}
