//! Pricing model abstraction used by the implied volatility solvers.

use super::black76::Black76;
use super::black_scholes::BlackScholes;
use super::error::IVError;
use super::types::OptionQuote;
use serde::{Deserialize, Serialize};

/// A closed-form European option pricing model.
///
/// Implementations must make `price` increasing in `sigma`; the solvers
/// rely on it.
pub trait PricingModel {
    /// Short model name used in logs.
    fn name(&self) -> &'static str;

    /// Theoretical price of the quoted contract at volatility `sigma`.
    ///
    /// The quote's `market_price` is ignored.
    ///
    /// # Errors
    /// `InvalidInput` for invalid contract fields or `sigma <= 0`.
    fn price(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError>;

    /// Vega (∂price/∂σ) at volatility `sigma`. Zero at expiry.
    ///
    /// # Errors
    /// `InvalidInput` for invalid contract fields or `sigma <= 0`.
    fn vega(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError>;

    /// Price in the zero-volatility limit (discounted intrinsic value).
    ///
    /// No market price below this bound can be matched by any volatility.
    ///
    /// # Errors
    /// `InvalidInput` for invalid contract fields.
    fn lower_bound(&self, quote: &OptionQuote) -> Result<f64, IVError>;
}

/// Caller-selectable pricing convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    /// Spot-based Black-Scholes with drift `r`.
    #[default]
    BlackScholes,
    /// Forward-based Black-76 without drift.
    Black76,
}

impl PricingModel for Model {
    fn name(&self) -> &'static str {
        match self {
            Model::BlackScholes => BlackScholes.name(),
            Model::Black76 => Black76.name(),
        }
    }

    fn price(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        match self {
            Model::BlackScholes => BlackScholes.price(quote, sigma),
            Model::Black76 => Black76.price(quote, sigma),
        }
    }

    fn vega(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        match self {
            Model::BlackScholes => BlackScholes.vega(quote, sigma),
            Model::Black76 => Black76.vega(quote, sigma),
        }
    }

    fn lower_bound(&self, quote: &OptionQuote) -> Result<f64, IVError> {
        match self {
            Model::BlackScholes => BlackScholes.lower_bound(quote),
            Model::Black76 => Black76.lower_bound(quote),
        }
    }
}

/// Validates a quote's contract fields and a volatility argument.
pub(crate) fn check_inputs(quote: &OptionQuote, sigma: f64) -> Result<(), IVError> {
    quote.validate_contract()?;

    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(IVError::invalid_input(format!(
            "volatility must be positive, got {sigma}"
        )));
    }

    Ok(())
}
