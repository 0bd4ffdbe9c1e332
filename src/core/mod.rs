pub mod analyze;
pub mod engine;
pub mod stocks;
pub mod weather;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{StockQuote, TruthVerdict, WeatherQuery, WeatherResult};
pub use crate::domain::ports::{ConfigProvider, Endpoint};
pub use crate::utils::error::Result;
