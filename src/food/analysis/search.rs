use crate::food::analysis::nutrition::{parse_food_description, ParsedMacros};
use crate::food::api::fatsecret::{FatSecretClient, FoodDetail, FoodSearchResult};
use crate::food::api::local::{self, FoodItem};
use crate::food::error::FoodApiError;
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    FatSecret,
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchedFood {
    FatSecret {
        #[serde(flatten)]
        food: FoodSearchResult,
        macros: ParsedMacros,
    },
    Local(&'static FoodItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub source: FoodSource,
    pub foods: Vec<SearchedFood>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FoodDetails {
    FatSecret(FoodDetail),
    Local(&'static FoodItem),
}

/// Searches FatSecret first and falls back to the built-in catalogue when
/// it is unconfigured, failing, or has nothing to offer.
#[derive(Debug, Clone)]
pub struct FoodSearchService {
    fatsecret: FatSecretClient,
}

impl FoodSearchService {
    pub fn new(fatsecret: FatSecretClient) -> Self {
        Self { fatsecret }
    }

    pub async fn search(&self, query: &str, max_results: usize) -> SearchOutcome {
        if self.fatsecret.is_configured() {
            match self.fatsecret.search_foods(query, max_results).await {
                Ok(foods) if !foods.is_empty() => {
                    return SearchOutcome {
                        source: FoodSource::FatSecret,
                        foods: foods
                            .into_iter()
                            .map(|food| {
                                let macros = parse_food_description(&food.description);
                                SearchedFood::FatSecret { food, macros }
                            })
                            .collect(),
                    };
                }
                Ok(_) => info!("FatSecret had no results for \"{}\", using local database", query),
                Err(e) => warn!("{}, using local database", e),
            }
        }

        SearchOutcome {
            source: FoodSource::Local,
            foods: local::search_foods(query, max_results)
                .into_iter()
                .map(SearchedFood::Local)
                .collect(),
        }
    }

    pub async fn details(&self, id: &str) -> Option<FoodDetails> {
        if let Some(food) = local::get_food_by_id(id) {
            return Some(FoodDetails::Local(food));
        }

        match self.fatsecret.get_food_details(id).await {
            Ok(detail) => detail.map(FoodDetails::FatSecret),
            Err(FoodApiError::Config) => None,
            Err(e) => {
                warn!("Food details for {} unavailable: {}", id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::config::FatSecretConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "token",
                "token_type": "Bearer",
                "expires_in": 86400
            })))
            .mount(server)
            .await;
    }

    fn service_for(server: &MockServer) -> FoodSearchService {
        FoodSearchService::new(FatSecretClient::new(
            FatSecretConfig::new("id", "secret").with_base_url(&server.uri()),
        ))
    }

    fn unconfigured() -> FoodSearchService {
        FoodSearchService::new(FatSecretClient::new(FatSecretConfig::new("", "")))
    }

    #[tokio::test]
    async fn test_unconfigured_search_uses_local_database() {
        let outcome = unconfigured().search("banana", 20).await;
        assert_eq!(outcome.source, FoodSource::Local);
        assert_eq!(outcome.foods.len(), 1);
        match &outcome.foods[0] {
            SearchedFood::Local(food) => assert_eq!(food.id, "fruit-002"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fatsecret_results_carry_parsed_macros() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/rest/server.api"))
            .and(body_string_contains("method=foods.search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "foods": {"food": {
                    "food_id": "35755",
                    "food_name": "Bananas",
                    "food_type": "Generic",
                    "food_description": "Per 100g - Calories: 89kcal | Fat: 0.33g | Carbs: 22.84g | Protein: 1.09g"
                }}
            })))
            .mount(&server)
            .await;

        let outcome = service_for(&server).search("banana", 20).await;
        assert_eq!(outcome.source, FoodSource::FatSecret);
        match &outcome.foods[0] {
            SearchedFood::FatSecret { food, macros } => {
                assert_eq!(food.id, "35755");
                assert_eq!(macros.calories, 89.0);
                assert_eq!(macros.protein, 1.09);
            }
            other => panic!("unexpected result {:?}", other),
        }

        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["source"], "fatsecret");
        assert_eq!(body["foods"][0]["food_name"], "Bananas");
        assert_eq!(body["foods"][0]["macros"]["carbs"], 22.84);
    }

    #[tokio::test]
    async fn test_search_error_falls_back_to_local() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/rest/server.api"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = service_for(&server).search("almonds", 20).await;
        assert_eq!(outcome.source, FoodSource::Local);
        assert_eq!(outcome.foods.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_fatsecret_result_falls_back_to_local() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/rest/server.api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foods": {}})))
            .mount(&server)
            .await;

        let outcome = service_for(&server).search("tofu", 20).await;
        assert_eq!(outcome.source, FoodSource::Local);
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["source"], "local");
        assert_eq!(body["foods"][0]["id"], "protein-005");
        assert_eq!(body["foods"][0]["nutrition"]["protein"], 17.0);
    }

    #[tokio::test]
    async fn test_local_ids_resolve_without_fatsecret() {
        match unconfigured().details("veg-003").await {
            Some(FoodDetails::Local(food)) => assert_eq!(food.name, "Spinach"),
            other => panic!("unexpected details {:?}", other),
        }
        assert!(unconfigured().details("33691").await.is_none());
    }

    #[tokio::test]
    async fn test_remote_details_failure_is_absent() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        Mock::given(method("POST"))
            .and(path("/rest/server.api"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(service_for(&server).details("33691").await.is_none());
    }
}
