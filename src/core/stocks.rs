use crate::core::{ConfigProvider, Endpoint};
use crate::domain::model::{Direction, StockQuote};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::sync::Arc;

pub const SYMBOLS: [&str; 3] = ["SPY", "AAPL", "BTC-USD"];

/// Finnhub quote payload; only the current price and previous close are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteResponse {
    pub c: Option<f64>,
    pub pc: Option<f64>,
}

pub struct StocksEndpoint<C: ConfigProvider> {
    config: Arc<C>,
    client: Client,
}

impl<C: ConfigProvider> StocksEndpoint<C> {
    pub fn new(config: Arc<C>, client: Client) -> Self {
        Self { config, client }
    }

    async fn fetch_quote(&self, symbol: &'static str, token: &str) -> Result<(String, QuoteResponse)> {
        let url = format!(
            "{}/api/v1/quote",
            self.config.stock_api_url().trim_end_matches('/')
        );
        tracing::debug!("📡 Requesting quote for {}", symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", token)])
            .send()
            .await?
            .error_for_status()?;

        Ok((symbol.to_string(), response.json().await?))
    }
}

pub fn display_name(symbol: &str) -> String {
    symbol.replacen("-USD", "", 1)
}

/// Two-decimal fixed notation with ties rounded away from zero (187.125 -> "187.13").
pub fn to_fixed_2(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(exact) => format!(
            "{:.2}",
            exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{:.2}", value),
    }
}

/// 由單一報價計算顯示用資料；沒有現價時回傳 None
pub fn to_stock_quote(symbol: &str, quote: &QuoteResponse) -> Option<StockQuote> {
    let current = quote.c.filter(|c| *c != 0.0 && c.is_finite())?;

    let change = match quote.pc {
        Some(previous) if previous != 0.0 => (current - previous) / previous * 100.0,
        _ => 0.0,
    };
    // 避免輸出 "+-0.00%"
    let change = if change == 0.0 { 0.0 } else { change };
    let rising = change >= 0.0;

    Some(StockQuote {
        symbol: display_name(symbol),
        current_value: to_fixed_2(current),
        percent_change: format!("{}{}%", if rising { "+" } else { "" }, to_fixed_2(change)),
        direction: if rising { Direction::Up } else { Direction::Down },
    })
}

#[async_trait]
impl<C: ConfigProvider> Endpoint for StocksEndpoint<C> {
    type Input = ();
    type Raw = Vec<(String, QuoteResponse)>;
    type Output = Vec<StockQuote>;

    fn name(&self) -> &'static str {
        "stocks"
    }

    async fn extract(&self, _input: ()) -> Result<Self::Raw> {
        let token = self
            .config
            .stock_api_key()
            .ok_or_else(|| ProxyError::MissingConfigError {
                field: "STOCK_API_KEY".to_string(),
            })?;

        // 任一代號失敗即整批失敗；結果順序與 SYMBOLS 相同
        try_join_all(SYMBOLS.iter().map(|&symbol| self.fetch_quote(symbol, token))).await
    }

    fn transform(&self, raw: Self::Raw) -> Result<Vec<StockQuote>> {
        Ok(raw
            .iter()
            .filter_map(|(symbol, quote)| {
                let entry = to_stock_quote(symbol, quote);
                if entry.is_none() {
                    tracing::warn!("⚠️ No current price for {}, omitting", symbol);
                }
                entry
            })
            .collect())
    }
}
