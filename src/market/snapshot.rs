//! Order book snapshot for option market data.
//!
//! Mirrors the `result` object of Deribit's `public/get_order_book`. Option
//! prices are quoted in units of the underlying currency; IVs in percent.

use crate::volatility::IVError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A snapshot of an option order book at a specific point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Exchange instrument name (e.g. `ETH-28NOV25-4500-C`).
    pub instrument_name: String,

    /// Price of the underlying (index or futures) in quote currency.
    pub underlying_price: f64,

    /// Name of the underlying index or future, when reported.
    #[serde(default)]
    pub underlying_index: Option<String>,

    /// Mark price in units of the underlying currency.
    pub mark_price: f64,

    /// Exchange mark IV in percent.
    #[serde(default)]
    pub mark_iv: Option<f64>,

    /// Exchange IV of the best bid in percent (0 when there is no bid).
    #[serde(default)]
    pub bid_iv: Option<f64>,

    /// Exchange IV of the best ask in percent (0 when there is no ask).
    #[serde(default)]
    pub ask_iv: Option<f64>,

    /// Interest rate the exchange used for its own IVs.
    #[serde(default)]
    pub interest_rate: Option<f64>,

    /// Bid levels as `[price, amount]`.
    #[serde(default)]
    pub bids: Vec<[f64; 2]>,

    /// Ask levels as `[price, amount]`.
    #[serde(default)]
    pub asks: Vec<[f64; 2]>,

    /// Timestamp when the snapshot was created (milliseconds since epoch).
    #[serde(default)]
    pub timestamp: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<OrderBookSnapshot>,
    error: Option<RpcError>,
}

impl OrderBookSnapshot {
    /// Decodes a bare `get_order_book` result object.
    ///
    /// # Errors
    /// `Deserialization` when the JSON does not match.
    pub fn from_json(data: &str) -> Result<Self, IVError> {
        serde_json::from_str(data).map_err(|error| IVError::Deserialization {
            message: error.to_string(),
        })
    }

    /// Decodes a full JSON-RPC response and extracts its `result`.
    ///
    /// # Errors
    /// `Deserialization` when the JSON does not match, or when the response
    /// carries an exchange error instead of a result.
    pub fn from_response_json(data: &str) -> Result<Self, IVError> {
        let response: RpcResponse =
            serde_json::from_str(data).map_err(|error| IVError::Deserialization {
                message: error.to_string(),
            })?;

        match (response.result, response.error) {
            (Some(snapshot), _) => Ok(snapshot),
            (None, Some(error)) => Err(IVError::Deserialization {
                message: format!("exchange error {}: {}", error.code, error.message),
            }),
            (None, None) => Err(IVError::Deserialization {
                message: "response has neither result nor error".to_string(),
            }),
        }
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    /// `Serialization` carrying the encoder message.
    pub fn to_json(&self) -> Result<String, IVError> {
        serde_json::to_string(self).map_err(|error| IVError::Serialization {
            message: error.to_string(),
        })
    }

    /// Get the best bid price and amount
    pub fn best_bid(&self) -> Option<(f64, f64)> {
        let bid = self
            .bids
            .iter()
            .map(|level| (level[0], level[1]))
            .max_by(|a, b| a.0.total_cmp(&b.0));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and amount
    pub fn best_ask(&self) -> Option<(f64, f64)> {
        let ask = self
            .asks
            .iter()
            .map(|level| (level[0], level[1]))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask), in coin units
    pub fn mid_price(&self) -> Option<f64> {
        let mid_price = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some((bid_price + ask_price) / 2.0),
            _ => None,
        };
        trace!("mid_price: {:?}", mid_price);
        mid_price
    }

    /// Get the spread (best ask - best bid), in coin units
    pub fn spread(&self) -> Option<f64> {
        let spread = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some(ask_price - bid_price),
            _ => None,
        };
        trace!("spread: {:?}", spread);
        spread
    }

    /// Best bid converted to quote currency.
    pub fn bid_price_usd(&self) -> Option<f64> {
        self.best_bid()
            .map(|(price, _)| price * self.underlying_price)
    }

    /// Best ask converted to quote currency.
    pub fn ask_price_usd(&self) -> Option<f64> {
        self.best_ask()
            .map(|(price, _)| price * self.underlying_price)
    }

    /// Mark price converted to quote currency.
    pub fn mark_price_usd(&self) -> f64 {
        self.mark_price * self.underlying_price
    }
}

/// Converts an exchange IV in percent to a fraction; zero or missing means none.
pub(crate) fn iv_fraction(percent: Option<f64>) -> Option<f64> {
    percent.filter(|value| *value > 0.0).map(|value| value / 100.0)
}
