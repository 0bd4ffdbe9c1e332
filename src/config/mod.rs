use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_GEOCODING_API_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_STOCK_API_URL: &str = "https://finnhub.io";
pub const DEFAULT_AI_API_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_AI_MODEL: &str = "sonar-pro";

/// 伺服器設定，每個選項都可由環境變數提供
#[derive(Debug, Clone, Parser)]
#[command(name = "sector-proxy")]
#[command(about = "Weather, stock quote and truth-scanner proxy for the dashboard frontend")]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "STATIC_DIR", default_value = ".")]
    pub static_dir: String,

    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub ai_api_key: Option<String>,

    #[arg(long, env = "STOCK_API_KEY", hide_env_values = true)]
    pub stock_api_key: Option<String>,

    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_WEATHER_API_URL)]
    pub weather_api_url: String,

    #[arg(long, env = "GEOCODING_API_URL", default_value = DEFAULT_GEOCODING_API_URL)]
    pub geocoding_api_url: String,

    #[arg(long, env = "STOCK_API_URL", default_value = DEFAULT_STOCK_API_URL)]
    pub stock_api_url: String,

    #[arg(long, env = "AI_API_URL", default_value = DEFAULT_AI_API_URL)]
    pub ai_api_url: String,

    #[arg(long, env = "AI_MODEL", default_value = DEFAULT_AI_MODEL)]
    pub ai_model: String,

    /// Upstream request timeout in seconds; 0 keeps the HTTP client default
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "VERBOSE", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn static_path(&self) -> PathBuf {
        PathBuf::from(&self.static_dir)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn has_ai_key(&self) -> bool {
        non_blank(&self.ai_api_key).is_some()
    }

    /// 建立所有端點共用的 HTTP client
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: ".".to_string(),
            ai_api_key: None,
            stock_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            geocoding_api_url: DEFAULT_GEOCODING_API_URL.to_string(),
            stock_api_url: DEFAULT_STOCK_API_URL.to_string(),
            ai_api_url: DEFAULT_AI_API_URL.to_string(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            request_timeout_secs: 30,
            verbose: false,
            log_json: false,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ConfigProvider for ServerConfig {
    fn weather_api_url(&self) -> &str {
        &self.weather_api_url
    }

    fn geocoding_api_url(&self) -> &str {
        &self.geocoding_api_url
    }

    fn stock_api_url(&self) -> &str {
        &self.stock_api_url
    }

    fn stock_api_key(&self) -> Option<&str> {
        non_blank(&self.stock_api_key)
    }

    fn ai_api_url(&self) -> &str {
        &self.ai_api_url
    }

    fn ai_api_key(&self) -> Option<&str> {
        non_blank(&self.ai_api_key)
    }

    fn ai_model(&self) -> &str {
        &self.ai_model
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_path("static_dir", &self.static_dir)?;

        // 驗證上游網址
        validate_url("weather_api_url", &self.weather_api_url)?;
        validate_url("geocoding_api_url", &self.geocoding_api_url)?;
        validate_url("stock_api_url", &self.stock_api_url)?;
        validate_url("ai_api_url", &self.ai_api_url)?;

        validate_non_empty_string("ai_model", &self.ai_model)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_args() {
        assert!(ServerConfig::try_parse_from(["sector-proxy"]).is_ok());

        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.ai_model, "sonar-pro");
        assert_eq!(config.static_dir, ".");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flag_overrides() {
        let config = ServerConfig::try_parse_from([
            "sector-proxy",
            "--port",
            "8080",
            "--stock-api-key",
            "abc",
            "--weather-api-url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.stock_api_key(), Some("abc"));
        assert_eq!(config.weather_api_url(), "http://127.0.0.1:9000");
        assert!(config.bind_addr().ends_with(":8080"));
    }

    #[test]
    fn test_blank_keys_are_treated_as_missing() {
        let config = ServerConfig {
            ai_api_key: Some("   ".to_string()),
            stock_api_key: Some(String::new()),
            ..ServerConfig::default()
        };
        assert!(!config.has_ai_key());
        assert_eq!(config.ai_api_key(), None);
        assert_eq!(config.stock_api_key(), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            ai_api_url: "ftp://example.com".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            static_dir: String::new(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout() {
        let config = ServerConfig::default();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));

        let config = ServerConfig {
            request_timeout_secs: 0,
            ..ServerConfig::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert!(config.build_client().is_ok());
    }
}
