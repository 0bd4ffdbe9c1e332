use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::model::ErrorBody;
use crate::utils::error::ProxyError;

/// Error reply with a fixed, caller-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    pub fn unavailable(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// 輸入錯誤對應 400，其他一律視為上游失敗
    pub fn from_proxy(err: &ProxyError, invalid: &'static str, unavailable: &'static str) -> Self {
        if err.is_client_error() {
            Self::bad_request(invalid)
        } else {
            Self::unavailable(unavailable)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}
