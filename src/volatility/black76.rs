//! Black-76 pricing model for options on forwards and futures.
//!
//! The forward already carries the cost of carry, so d1 has no drift
//! term and the whole payoff is discounted once.

use super::error::IVError;
use super::model::{PricingModel, check_inputs};
use super::normal::{norm_cdf, norm_pdf};
use super::types::{OptionQuote, OptionType};

/// Black-76 pricing model implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Black76;

impl Black76 {
    /// d1 = [ln(F/K) + (σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(forward: f64, strike: f64, time: f64, vol: f64) -> f64 {
        ((forward / strike).ln() + 0.5 * vol * vol * time) / (vol * time.sqrt())
    }
}

impl PricingModel for Black76 {
    fn name(&self) -> &'static str {
        "black-76"
    }

    /// For calls: C = e^(-rT)·[F·N(d1) - K·N(d2)]
    /// For puts:  P = e^(-rT)·[K·N(-d2) - F·N(-d1)]
    fn price(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        check_inputs(quote, sigma)?;

        if quote.time_to_expiry == 0.0 {
            return Ok(quote.intrinsic_value());
        }

        let d1 = Self::d1(quote.underlying, quote.strike, quote.time_to_expiry, sigma);
        let d2 = d1 - sigma * quote.time_to_expiry.sqrt();
        let discount = (-quote.risk_free_rate * quote.time_to_expiry).exp();

        let undiscounted = match quote.option_type {
            OptionType::Call => quote.underlying * norm_cdf(d1) - quote.strike * norm_cdf(d2),
            OptionType::Put => quote.strike * norm_cdf(-d2) - quote.underlying * norm_cdf(-d1),
        };

        Ok((discount * undiscounted).max(0.0))
    }

    /// Vega = F · e^(-rT) · N'(d1) · √T
    fn vega(&self, quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
        check_inputs(quote, sigma)?;

        if quote.time_to_expiry == 0.0 {
            return Ok(0.0);
        }

        let d1 = Self::d1(quote.underlying, quote.strike, quote.time_to_expiry, sigma);
        let discount = (-quote.risk_free_rate * quote.time_to_expiry).exp();
        Ok(quote.underlying * discount * norm_pdf(d1) * quote.time_to_expiry.sqrt())
    }

    fn lower_bound(&self, quote: &OptionQuote) -> Result<f64, IVError> {
        quote.validate_contract()?;

        let discount = (-quote.risk_free_rate * quote.time_to_expiry).exp();
        Ok(discount * quote.intrinsic_value())
    }
}
