//! Market data provider errors

use thiserror::Error;

/// Errors raised while fetching or decoding kline data
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport or HTTP status failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered but carried no kline payload
    #[error("no data returned for {symbol}")]
    NoData { symbol: String },

    /// A payload field did not parse
    #[error("malformed response: {0}")]
    Malformed(String),
}
