//! API handlers

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::domain::model::{StockQuote, TruthVerdict, WeatherQuery, WeatherResult};

const LOCATION_REQUIRED: &str = "Location required";
const WEATHER_UNAVAILABLE: &str = "Weather unavailable";
const STOCKS_UNAVAILABLE: &str = "Stocks unavailable";

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Current conditions and place name for a coordinate
pub async fn weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<WeatherResult>, ApiError> {
    // 查詢字串無法解析（例如重複的 lat）時同樣回 JSON 錯誤
    let Query(params) = params.map_err(|e| {
        tracing::debug!("weather: rejected query string: {}", e);
        ApiError::bad_request(LOCATION_REQUIRED)
    })?;
    let query = WeatherQuery::from_params(params.lat.as_deref(), params.lon.as_deref())
        .map_err(|_| ApiError::bad_request(LOCATION_REQUIRED))?;

    state
        .weather
        .run(query)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_proxy(&e, LOCATION_REQUIRED, WEATHER_UNAVAILABLE))
}

/// Quotes for the fixed ticker set
pub async fn stocks(State(state): State<AppState>) -> Result<Json<Vec<StockQuote>>, ApiError> {
    state
        .stocks
        .run(())
        .await
        .map(Json)
        .map_err(|_| ApiError::unavailable(STOCKS_UNAVAILABLE))
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Truth scan. Always answers 200; failures become the "connection lost" verdict.
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    let text = serde_json::from_slice::<AnalyzeRequest>(&body)
        .ok()
        .and_then(|req| req.text);

    match state.analyze.run(text).await {
        Ok(verdict) => Json(verdict).into_response(),
        Err(e) => {
            tracing::warn!("⚠️ analyze: answering with degraded verdict ({})", e);
            Json(TruthVerdict::connection_lost()).into_response()
        }
    }
}
