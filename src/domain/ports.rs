use crate::utils::error::Result;
use async_trait::async_trait;

/// 上游服務所需的設定（基底網址與憑證）
pub trait ConfigProvider: Send + Sync {
    fn weather_api_url(&self) -> &str;
    fn geocoding_api_url(&self) -> &str;
    fn stock_api_url(&self) -> &str;
    fn stock_api_key(&self) -> Option<&str>;
    fn ai_api_url(&self) -> &str;
    fn ai_api_key(&self) -> Option<&str>;
    fn ai_model(&self) -> &str;
}

/// One proxied endpoint: `extract` performs the upstream calls, `transform`
/// reshapes the raw payloads into the reply sent to the caller.
#[async_trait]
pub trait Endpoint: Send + Sync {
    type Input: Send + 'static;
    type Raw: Send;
    type Output: Send;

    fn name(&self) -> &'static str;

    async fn extract(&self, input: Self::Input) -> Result<Self::Raw>;

    fn transform(&self, raw: Self::Raw) -> Result<Self::Output>;
}
