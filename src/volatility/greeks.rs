//! Delta, gamma and vega at a resolved volatility.
//!
//! All three use the Black-Scholes d1 with drift `r`, whichever model
//! produced the volatility.

use super::black_scholes::BlackScholes;
use super::error::IVError;
use super::normal::{norm_cdf, norm_pdf};
use super::types::{Greeks, OptionQuote, OptionType};

fn check_sigma(sigma: f64) -> Result<(), IVError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(IVError::invalid_input(format!(
            "volatility must be non-negative, got {sigma}"
        )));
    }
    Ok(())
}

fn d1(quote: &OptionQuote, sigma: f64) -> f64 {
    BlackScholes::d1(
        quote.underlying,
        quote.strike,
        quote.risk_free_rate,
        quote.time_to_expiry,
        sigma,
    )
}

/// Calculates delta (∂price/∂S).
///
/// For calls: Δ = N(d1)
/// For puts:  Δ = N(d1) - 1
///
/// At expiry delta is the payoff slope: 1 for an in-the-money call, 0
/// otherwise, and the put delta is always the call delta minus one.
///
/// # Errors
/// - `InvalidInput` for invalid contract fields or negative `sigma`
/// - `DegenerateInput` for `sigma == 0` before expiry
pub fn delta(quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
    quote.validate_contract()?;
    check_sigma(sigma)?;

    let call_delta = if quote.time_to_expiry == 0.0 {
        if quote.underlying > quote.strike {
            1.0
        } else {
            0.0
        }
    } else {
        if sigma == 0.0 {
            return Err(IVError::degenerate(format!(
                "delta undefined at zero volatility (S={}, K={}, T={})",
                quote.underlying, quote.strike, quote.time_to_expiry
            )));
        }
        norm_cdf(d1(quote, sigma))
    };

    Ok(match quote.option_type {
        OptionType::Call => call_delta,
        OptionType::Put => call_delta - 1.0,
    })
}

/// Calculates gamma (∂²price/∂S²).
///
/// Γ = N'(d1) / (S · σ · √T), identical for calls and puts.
///
/// # Errors
/// - `InvalidInput` for invalid contract fields or negative `sigma`
/// - `DegenerateInput` when `T == 0` or `sigma == 0`
pub fn gamma(quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
    quote.validate_contract()?;
    check_sigma(sigma)?;

    if quote.time_to_expiry == 0.0 || sigma == 0.0 {
        return Err(IVError::degenerate(format!(
            "gamma undefined for T={} and sigma={} (S={}, K={})",
            quote.time_to_expiry, sigma, quote.underlying, quote.strike
        )));
    }

    let d1 = d1(quote, sigma);
    Ok(norm_pdf(d1) / (quote.underlying * sigma * quote.time_to_expiry.sqrt()))
}

/// Calculates vega (∂price/∂σ) = S · N'(d1) · √T. Zero at expiry.
///
/// # Errors
/// - `InvalidInput` for invalid contract fields or negative `sigma`
/// - `DegenerateInput` for `sigma == 0` before expiry
pub fn vega(quote: &OptionQuote, sigma: f64) -> Result<f64, IVError> {
    quote.validate_contract()?;
    check_sigma(sigma)?;

    if quote.time_to_expiry == 0.0 {
        return Ok(0.0);
    }
    if sigma == 0.0 {
        return Err(IVError::degenerate(format!(
            "vega undefined at zero volatility (S={}, K={}, T={})",
            quote.underlying, quote.strike, quote.time_to_expiry
        )));
    }

    let d1 = d1(quote, sigma);
    Ok(quote.underlying * norm_pdf(d1) * quote.time_to_expiry.sqrt())
}

/// Calculates delta, gamma and vega together.
///
/// # Errors
/// Any error from [`delta`], [`gamma`] or [`vega`]; in particular
/// `DegenerateInput` at expiry, where gamma is undefined.
pub fn greeks(quote: &OptionQuote, sigma: f64) -> Result<Greeks, IVError> {
    Ok(Greeks {
        delta: delta(quote, sigma)?,
        gamma: gamma(quote, sigma)?,
        vega: vega(quote, sigma)?,
    })
}
