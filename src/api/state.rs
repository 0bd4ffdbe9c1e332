//! Shared handler state

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::analyze::AnalyzeEndpoint;
use crate::core::engine::ProxyEngine;
use crate::core::stocks::StocksEndpoint;
use crate::core::weather::WeatherEndpoint;
use crate::utils::error::Result;

/// API server state. Immutable after startup; cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<ProxyEngine<WeatherEndpoint<ServerConfig>>>,
    pub stocks: Arc<ProxyEngine<StocksEndpoint<ServerConfig>>>,
    pub analyze: Arc<ProxyEngine<AnalyzeEndpoint<ServerConfig>>>,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Wire every endpoint to the same configuration and pooled HTTP client
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let client = config.build_client()?;
        let static_dir = config.static_path();
        let config = Arc::new(config);

        Ok(Self {
            weather: Arc::new(ProxyEngine::new(WeatherEndpoint::new(
                config.clone(),
                client.clone(),
            ))),
            stocks: Arc::new(ProxyEngine::new(StocksEndpoint::new(
                config.clone(),
                client.clone(),
            ))),
            analyze: Arc::new(ProxyEngine::new(AnalyzeEndpoint::new(config, client))),
            static_dir,
        })
    }
}
