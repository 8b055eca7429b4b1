use crate::food::config::FatSecretConfig;
use crate::food::error::FoodApiError;
use chrono::Utc;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

pub const DEFAULT_MAX_RESULTS: usize = 20;

// Tokens are treated as expired one minute before upstream says they are.
const TOKEN_EXPIRY_MARGIN_MS: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSearchResult {
    #[serde(rename = "food_id")]
    pub id: String,
    #[serde(rename = "food_name")]
    pub name: String,
    pub food_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(rename = "food_description", default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    #[serde(rename = "food_id")]
    pub id: String,
    #[serde(rename = "food_name")]
    pub name: String,
    pub food_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "servings_from_wire")]
    pub servings: Vec<ServingRecord>,
}

/// Nutrients for one serving size. Values are the decimal strings upstream
/// sends; nothing is converted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingRecord {
    pub serving_id: String,
    pub serving_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_serving_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_serving_unit: Option<String>,
    pub calories: String,
    pub carbohydrate: String,
    pub protein: String,
    pub fat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyunsaturated_fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monounsaturated_fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<String>,
}

/// FatSecret collapses single-element lists into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServingsWire {
    #[serde(default)]
    serving: Option<OneOrMany<ServingRecord>>,
}

fn servings_from_wire<'de, D>(deserializer: D) -> Result<Vec<ServingRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = ServingsWire::deserialize(deserializer)?;
    Ok(wire.serving.map(Vec::from).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    code: serde_json::Value,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Option<FoodsPage>,
    #[serde(default)]
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct FoodsPage {
    #[serde(default)]
    food: Option<OneOrMany<FoodSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(default)]
    food: Option<FoodDetail>,
    #[serde(default)]
    error: Option<UpstreamError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CachedToken {
    pub(crate) access_token: String,
    pub(crate) expires_at_ms: i64,
}

impl CachedToken {
    fn issued(access_token: String, expires_in_secs: i64, now_ms: i64) -> Self {
        Self {
            access_token,
            expires_at_ms: now_ms
                .saturating_add(expires_in_secs.saturating_mul(1000))
                .saturating_sub(TOKEN_EXPIRY_MARGIN_MS),
        }
    }

    fn is_valid_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Client for the FatSecret platform API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cached
/// token. Concurrent refreshes are not coalesced, the last one to finish
/// stays in the cache.
#[derive(Debug, Clone)]
pub struct FatSecretClient {
    config: FatSecretConfig,
    client: Client,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl FatSecretClient {
    pub fn new(config: FatSecretConfig) -> Self {
        if config.is_configured() {
            info!("FatSecret API initialized successfully");
        } else {
            warn!("FatSecret API credentials not configured. Food search will use fallback data.");
        }

        Self {
            config,
            client: Client::new(),
            token: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn cached_token(&self, now_ms: i64) -> Option<String> {
        self.token
            .lock()
            .as_ref()
            .filter(|token| token.is_valid_at(now_ms))
            .map(|token| token.access_token.clone())
    }

    async fn get_access_token(&self) -> Result<String, FoodApiError> {
        if let Some(token) = self.cached_token(now_ms()) {
            return Ok(token);
        }

        if !self.config.is_configured() {
            error!("FatSecret OAuth error: credentials missing");
            return Err(FoodApiError::Auth);
        }

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "basic")])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("FatSecret OAuth error: {}", e);
                FoodApiError::Auth
            })?;

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("FatSecret OAuth error: invalid token response: {}", e);
            FoodApiError::Auth
        })?;

        debug!("FatSecret: {} token issued, expires in {}s", token.token_type, token.expires_in);

        let cached = CachedToken::issued(token.access_token, token.expires_in, now_ms());
        let access_token = cached.access_token.clone();
        *self.token.lock() = Some(cached);

        Ok(access_token)
    }

    async fn call(&self, token: &str, params: &[(&str, &str)]) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(&self.config.api_url)
            .bearer_auth(token)
            .form(params)
            .send()
            .await?
            .error_for_status()
    }

    pub async fn search_foods(&self, query: &str, max_results: usize) -> Result<Vec<FoodSearchResult>, FoodApiError> {
        if !self.config.is_configured() {
            return Err(FoodApiError::Config);
        }

        info!("FatSecret: Searching for \"{}\"...", query);
        let token = self.get_access_token().await?;
        debug!("FatSecret: Access token obtained");

        let max_results = max_results.to_string();
        let params = [
            ("method", "foods.search"),
            ("search_expression", query),
            ("format", "json"),
            ("max_results", max_results.as_str()),
        ];

        let response = self.call(&token, &params).await.map_err(|e| {
            error!("FatSecret search error: {}", e);
            FoodApiError::Search
        })?;

        let body: SearchResponse = response.json().await.map_err(|e| {
            error!("FatSecret search error: invalid response: {}", e);
            FoodApiError::Search
        })?;

        if let Some(err) = body.error {
            warn!("FatSecret search returned error {}: {}", err.code, err.message);
        }

        match body.foods.and_then(|page| page.food) {
            Some(found) => {
                let foods = Vec::from(found);
                info!("FatSecret: Found {} foods", foods.len());
                Ok(foods)
            }
            None => {
                info!("FatSecret: No foods found");
                Ok(Vec::new())
            }
        }
    }

    /// Look up a single food. Upstream failures are logged and come back as
    /// `Ok(None)`; only missing credentials produce an error.
    pub async fn get_food_details(&self, food_id: &str) -> Result<Option<FoodDetail>, FoodApiError> {
        if !self.config.is_configured() {
            return Err(FoodApiError::Config);
        }

        Ok(self.fetch_food_details(food_id).await)
    }

    async fn fetch_food_details(&self, food_id: &str) -> Option<FoodDetail> {
        let token = self.get_access_token().await.ok()?;

        let params = [("method", "food.get.v2"), ("food_id", food_id), ("format", "json")];

        let response = match self.call(&token, &params).await {
            Ok(response) => response,
            Err(e) => {
                error!("FatSecret food details error: {}", e);
                return None;
            }
        };

        let body: DetailResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("FatSecret food details error: invalid response: {}", e);
                return None;
            }
        };

        if let Some(err) = body.error {
            error!("FatSecret food details error {}: {}", err.code, err.message);
        }

        body.food
    }

    #[cfg(test)]
    fn seed_token(&self, access_token: &str, expires_at_ms: i64) {
        *self.token.lock() = Some(CachedToken {
            access_token: access_token.to_string(),
            expires_at_ms,
        });
    }

    #[cfg(test)]
    fn current_token(&self) -> Option<CachedToken> {
        self.token.lock().clone()
    }
}
