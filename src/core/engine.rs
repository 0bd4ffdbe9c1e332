use crate::core::Endpoint;
use crate::utils::error::Result;

pub struct ProxyEngine<E: Endpoint> {
    endpoint: E,
}

impl<E: Endpoint> ProxyEngine<E> {
    pub fn new(endpoint: E) -> Self {
        Self { endpoint }
    }

    /// 執行一次代理請求：呼叫上游後轉換回應
    pub async fn run(&self, input: E::Input) -> Result<E::Output> {
        let name = self.endpoint.name();

        tracing::debug!("📡 {}: calling upstream", name);
        let raw = self.endpoint.extract(input).await.map_err(|e| {
            if e.is_client_error() {
                tracing::debug!("{}: rejected request: {}", name, e);
            } else {
                tracing::error!("❌ {}: upstream call failed: {}", name, e);
            }
            e
        })?;

        let output = self.endpoint.transform(raw).map_err(|e| {
            tracing::error!("❌ {}: transform failed: {}", name, e);
            e
        })?;
        tracing::debug!("✅ {}: response ready", name);

        Ok(output)
    }
}
