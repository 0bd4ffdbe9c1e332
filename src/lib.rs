pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::api::{create_router, AppState};
pub use crate::config::ServerConfig;
pub use crate::core::engine::ProxyEngine;
pub use crate::utils::error::{ProxyError, Result};
