use std::env;

const ENV_PREFIX: &str = "FATSECRET";
const DEFAULT_TOKEN_URL: &str = "https://oauth.fatsecret.com/connect/token";
const DEFAULT_API_URL: &str = "https://platform.fatsecret.com/rest/server.api";

/// Credentials and endpoints for the FatSecret platform API.
///
/// Read once at startup. Empty credentials are allowed here: the client
/// refuses to make calls instead of the process refusing to start.
#[derive(Debug, Clone)]
pub struct FatSecretConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
}

impl FatSecretConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let var = |suffix: &str| env::var(format!("{}_{}", ENV_PREFIX, suffix)).ok();

        Self {
            client_id: var("CLIENT_ID").unwrap_or_default(),
            client_secret: var("CLIENT_SECRET").unwrap_or_default(),
            token_url: var("TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: var("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Point both endpoints at another host, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.token_url = format!("{}/connect/token", base);
        self.api_url = format!("{}/rest/server.api", base);
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_are_not_configured() {
        assert!(!FatSecretConfig::new("", "").is_configured());
        assert!(!FatSecretConfig::new("id", "").is_configured());
        assert!(!FatSecretConfig::new("", "secret").is_configured());
        assert!(FatSecretConfig::new("id", "secret").is_configured());
    }

    #[test]
    fn test_base_url_override() {
        let config = FatSecretConfig::new("id", "secret").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.token_url, "http://127.0.0.1:9000/connect/token");
        assert_eq!(config.api_url, "http://127.0.0.1:9000/rest/server.api");
    }
}
