use crate::utils::error::Result;
use crate::utils::validation::require_param;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CITY: &str = "Unknown Sector";

/// 天氣查詢座標，兩者皆為必填；值不做解析，直接轉交上游
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub latitude: String,
    pub longitude: String,
}

impl WeatherQuery {
    /// 由查詢字串的 `lat` / `lon` 建立
    pub fn from_params(lat: Option<&str>, lon: Option<&str>) -> Result<Self> {
        Ok(Self {
            latitude: require_param("lat", lat)?,
            longitude: require_param("lon", lon)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Clear Sky")]
    ClearSky,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Bands are checked in ascending order; a later match overrides an earlier one.
    pub fn from_code(code: i64) -> Self {
        let mut condition = Condition::ClearSky;
        if code > 2 {
            condition = Condition::Cloudy;
        }
        if code >= 50 {
            condition = Condition::Rain;
        }
        if code >= 71 {
            condition = Condition::Snow;
        }
        if code >= 95 {
            condition = Condition::Thunderstorm;
        }
        condition
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "temp")]
    pub temperature: i64,
    #[serde(rename = "city")]
    pub city_name: String,
    #[serde(rename = "description")]
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    #[serde(rename = "name")]
    pub symbol: String,
    #[serde(rename = "val")]
    pub current_value: String,
    #[serde(rename = "change")]
    pub percent_change: String,
    #[serde(rename = "dir")]
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthVerdict {
    pub verdict: Verdict,
    pub confidence: String,
    pub reasoning: String,
    pub sources: Vec<Source>,
}

impl TruthVerdict {
    /// 任何 AI 失敗時回傳的固定結果
    pub fn connection_lost() -> Self {
        Self {
            verdict: Verdict::Error,
            confidence: "0%".to_string(),
            reasoning: "AI Connection Lost.".to_string(),
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_query_from_params() {
        let query = WeatherQuery::from_params(Some("51.5"), Some("-0.12")).unwrap();
        assert_eq!(query.latitude, "51.5");
        assert_eq!(query.longitude, "-0.12");

        let raw = WeatherQuery::from_params(Some("north"), Some("10.75")).unwrap();
        assert_eq!(raw.latitude, "north");

        assert!(WeatherQuery::from_params(None, Some("-0.12")).is_err());
        assert!(WeatherQuery::from_params(Some("51.5"), None).is_err());
        assert!(WeatherQuery::from_params(Some(""), Some("")).is_err());
    }

    #[test]
    fn test_condition_bands() {
        assert_eq!(Condition::from_code(0), Condition::ClearSky);
        assert_eq!(Condition::from_code(3), Condition::Cloudy);
        assert_eq!(Condition::from_code(55), Condition::Rain);
        assert_eq!(Condition::from_code(75), Condition::Snow);
        assert_eq!(Condition::from_code(96), Condition::Thunderstorm);
    }

    #[test]
    fn test_condition_boundaries() {
        assert_eq!(Condition::from_code(2), Condition::ClearSky);
        assert_eq!(Condition::from_code(49), Condition::Cloudy);
        assert_eq!(Condition::from_code(50), Condition::Rain);
        assert_eq!(Condition::from_code(71), Condition::Snow);
        assert_eq!(Condition::from_code(95), Condition::Thunderstorm);
    }

    #[test]
    fn test_wire_names() {
        let result = WeatherResult {
            temperature: 15,
            city_name: "Oslo".to_string(),
            condition: Condition::ClearSky,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"temp": 15, "city": "Oslo", "description": "Clear Sky"})
        );

        let quote = StockQuote {
            symbol: "SPY".to_string(),
            current_value: "110.00".to_string(),
            percent_change: "+10.00%".to_string(),
            direction: Direction::Up,
        };
        assert_eq!(
            serde_json::to_value(&quote).unwrap(),
            serde_json::json!({"name": "SPY", "val": "110.00", "change": "+10.00%", "dir": "up"})
        );
    }

    #[test]
    fn test_connection_lost_payload() {
        assert_eq!(
            serde_json::to_value(TruthVerdict::connection_lost()).unwrap(),
            serde_json::json!({
                "verdict": "ERROR",
                "confidence": "0%",
                "reasoning": "AI Connection Lost.",
                "sources": []
            })
        );
    }
}
