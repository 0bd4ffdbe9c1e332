use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Upstream returned an unexpected payload: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ProxyError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ProxyError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ProxyError::InvalidRequest {
            message: message.into(),
        }
    }

    /// 是否為呼叫端輸入錯誤（而非上游或伺服器錯誤）
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProxyError::InvalidRequest { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
