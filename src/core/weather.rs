use crate::core::{ConfigProvider, Endpoint};
use crate::domain::model::{Condition, WeatherQuery, WeatherResult, UNKNOWN_CITY};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weathercode: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub results: Option<Vec<Place>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: Option<String>,
}

pub struct WeatherEndpoint<C: ConfigProvider> {
    config: Arc<C>,
    client: Client,
}

impl<C: ConfigProvider> WeatherEndpoint<C> {
    pub fn new(config: Arc<C>, client: Client) -> Self {
        Self { config, client }
    }

    async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<ForecastResponse> {
        let url = format!(
            "{}/v1/forecast",
            self.config.weather_api_url().trim_end_matches('/')
        );
        tracing::debug!("Requesting forecast from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", query.latitude.as_str()),
                ("longitude", query.longitude.as_str()),
                ("current_weather", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn fetch_place(&self, query: &WeatherQuery) -> Result<ReverseGeocodeResponse> {
        let url = format!(
            "{}/v1/reverse",
            self.config.geocoding_api_url().trim_end_matches('/')
        );
        tracing::debug!("Requesting reverse geocode from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", query.latitude.as_str()),
                ("longitude", query.longitude.as_str()),
                ("count", "1"),
                ("format", "json"),
                ("language", "en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

/// Rounds half up, the way the dashboard has always displayed temperatures.
pub fn round_temperature(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[async_trait]
impl<C: ConfigProvider> Endpoint for WeatherEndpoint<C> {
    type Input = WeatherQuery;
    type Raw = (ForecastResponse, ReverseGeocodeResponse);
    type Output = WeatherResult;

    fn name(&self) -> &'static str {
        "weather"
    }

    async fn extract(&self, query: WeatherQuery) -> Result<Self::Raw> {
        // 兩個呼叫互不相依，同時發出
        tokio::try_join!(self.fetch_forecast(&query), self.fetch_place(&query))
    }

    fn transform(&self, (forecast, place): Self::Raw) -> Result<WeatherResult> {
        let current = forecast
            .current_weather
            .ok_or_else(|| ProxyError::malformed("forecast has no current_weather"))?;

        let city_name = place
            .results
            .and_then(|results| results.into_iter().next())
            .and_then(|p| p.name)
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        Ok(WeatherResult {
            temperature: round_temperature(current.temperature),
            city_name,
            condition: Condition::from_code(current.weathercode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MockConfig;
    use httpmock::prelude::*;

    fn endpoint(server: &MockServer) -> WeatherEndpoint<MockConfig> {
        let config = MockConfig::new(server.base_url());
        WeatherEndpoint::new(Arc::new(config), Client::new())
    }

    fn query() -> WeatherQuery {
        WeatherQuery {
            latitude: "59.91".to_string(),
            longitude: "10.75".to_string(),
        }
    }

    #[test]
    fn test_round_temperature() {
        assert_eq!(round_temperature(14.6), 15);
        assert_eq!(round_temperature(14.4), 14);
        assert_eq!(round_temperature(14.5), 15);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
    }

    #[tokio::test]
    async fn test_extract_and_transform() {
        let server = MockServer::start();

        let forecast_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "59.91")
                .query_param("longitude", "10.75")
                .query_param("current_weather", "true");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "current_weather": {"temperature": 14.6, "weathercode": 61, "windspeed": 3.1}
                }));
        });

        let geo_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/reverse")
                .query_param("count", "1")
                .query_param("language", "en");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"results": [{"name": "Oslo"}]}));
        });

        let endpoint = endpoint(&server);
        let raw = endpoint.extract(query()).await.unwrap();
        let result = endpoint.transform(raw).unwrap();

        forecast_mock.assert();
        geo_mock.assert();
        assert_eq!(
            result,
            WeatherResult {
                temperature: 15,
                city_name: "Oslo".to_string(),
                condition: Condition::Rain,
            }
        );
    }

    #[tokio::test]
    async fn test_forecast_failure_is_an_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(503);
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/reverse");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });

        let result = endpoint(&server).extract(query()).await;
        assert!(matches!(result, Err(ProxyError::ApiError(_))));
    }

    #[test]
    fn test_missing_place_uses_unknown_sector() {
        let config = MockConfig::new("http://unused".to_string());
        let endpoint = WeatherEndpoint::new(Arc::new(config), Client::new());

        let forecast = ForecastResponse {
            current_weather: Some(CurrentWeather {
                temperature: 0.2,
                weathercode: 0,
            }),
        };

        let result = endpoint
            .transform((forecast.clone(), ReverseGeocodeResponse::default()))
            .unwrap();
        assert_eq!(result.city_name, UNKNOWN_CITY);
        assert_eq!(result.temperature, 0);
        assert_eq!(result.condition, Condition::ClearSky);

        let empty = ReverseGeocodeResponse {
            results: Some(vec![]),
        };
        let result = endpoint.transform((forecast, empty)).unwrap();
        assert_eq!(result.city_name, UNKNOWN_CITY);
    }

    #[test]
    fn test_missing_current_weather_is_malformed() {
        let config = MockConfig::new("http://unused".to_string());
        let endpoint = WeatherEndpoint::new(Arc::new(config), Client::new());

        let result = endpoint.transform((
            ForecastResponse {
                current_weather: None,
            },
            ReverseGeocodeResponse::default(),
        ));
        assert!(matches!(result, Err(ProxyError::MalformedResponse { .. })));
    }
}
