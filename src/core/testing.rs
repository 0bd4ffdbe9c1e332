use crate::core::ConfigProvider;

/// 測試用設定：所有上游都指向同一個 mock server
pub struct MockConfig {
    pub base_url: String,
    pub stock_api_key: Option<String>,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
}

impl MockConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            stock_api_key: Some("test-token".to_string()),
            ai_api_key: Some("test-ai-key".to_string()),
            ai_model: "sonar-pro".to_string(),
        }
    }
}

impl ConfigProvider for MockConfig {
    fn weather_api_url(&self) -> &str {
        &self.base_url
    }

    fn geocoding_api_url(&self) -> &str {
        &self.base_url
    }

    fn stock_api_url(&self) -> &str {
        &self.base_url
    }

    fn stock_api_key(&self) -> Option<&str> {
        self.stock_api_key.as_deref()
    }

    fn ai_api_url(&self) -> &str {
        &self.base_url
    }

    fn ai_api_key(&self) -> Option<&str> {
        self.ai_api_key.as_deref()
    }

    fn ai_model(&self) -> &str {
        &self.ai_model
    }
}
