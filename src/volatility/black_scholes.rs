//! Black-Scholes pricing model.
//!
//! Spot-based pricing with a continuously compounded drift `r`. This is
//! the model behind most of the crate's Greeks as well.

use super::error::IVError;
use super::model::{PricingModel, check_inputs};
use super::normal::{norm_cdf, norm_pdf};
use super::types::{OptionQuote, OptionType};

/// Black-Scholes pricing model implementation.
///
/// Provides option prices and vega using the Black-Scholes-Merton formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes;

impl BlackScholes {
    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    ///
    /// # Arguments
    /// - `spot`: Current underlying price (S)
    /// - `strike`: Option strike price (K)
    /// - `rate`: Risk-free interest rate (r)
    /// - `time`: Time to expiration in years (T)
    /// - `vol`: Volatility (σ)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    fn d1_for(quote: &OptionQuote, vol: f64) -> f64 {
        Self::d1(
            quote.underlying,
            quote.strike,
            quote.risk_free_rate,
            quote.time_to_expiry,
            vol,
        )
    }
}

impl PricingModel for BlackScholes {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    ///
    /// At expiry the price is the intrinsic value.
    fn price(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        check_inputs(quote, sigma)?;

        if quote.time_to_expiry == 0.0 {
            return Ok(quote.intrinsic_value());
        }

        let d1 = Self::d1_for(quote, sigma);
        let d2 = Self::d2(d1, sigma, quote.time_to_expiry);
        let discount = (-quote.risk_free_rate * quote.time_to_expiry).exp();

        let price = match quote.option_type {
            OptionType::Call => {
                quote.underlying * norm_cdf(d1) - quote.strike * discount * norm_cdf(d2)
            }
            OptionType::Put => {
                quote.strike * discount * norm_cdf(-d2) - quote.underlying * norm_cdf(-d1)
            }
        };

        // Rounding can push deep out-of-the-money prices a hair below zero
        Ok(price.max(0.0))
    }

    /// Vega = S · N'(d1) · √T, identical for calls and puts.
    fn vega(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        check_inputs(quote, sigma)?;

        if quote.time_to_expiry == 0.0 {
            return Ok(0.0);
        }

        let d1 = Self::d1_for(quote, sigma);
        Ok(quote.underlying * norm_pdf(d1) * quote.time_to_expiry.sqrt())
    }

    fn lower_bound(&self, quote: &OptionQuote) -> Result<f64, IVError> {
        quote.validate_contract()?;

        let discounted_strike = quote.strike * (-quote.risk_free_rate * quote.time_to_expiry).exp();
        Ok(match quote.option_type {
            OptionType::Call => (quote.underlying - discounted_strike).max(0.0),
            OptionType::Put => (discounted_strike - quote.underlying).max(0.0),
        })
    }
}
