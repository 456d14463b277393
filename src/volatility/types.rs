//! Value types shared by the pricing models, the solver and the Greeks.

use super::error::IVError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

impl FromStr for OptionType {
    type Err = IVError;

    /// Accepts `call`, `put`, `c` and `p` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(IVError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// One observed option price at one instant.
///
/// `underlying` is the spot price under Black-Scholes and the forward
/// (futures) price under Black-76.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Spot or forward price of the underlying.
    pub underlying: f64,
    /// Option strike price.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, e.g., 0.05 for 5%).
    pub risk_free_rate: f64,
    /// Observed option price, in the same units as `underlying`.
    pub market_price: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl OptionQuote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(
        underlying: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            underlying,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
            option_type,
        }
    }

    /// Creates a call quote.
    #[must_use]
    pub fn call(
        underlying: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
    ) -> Self {
        Self::new(
            underlying,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
            OptionType::Call,
        )
    }

    /// Creates a put quote.
    #[must_use]
    pub fn put(
        underlying: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        market_price: f64,
    ) -> Self {
        Self::new(
            underlying,
            strike,
            time_to_expiry,
            risk_free_rate,
            market_price,
            OptionType::Put,
        )
    }

    /// Returns a copy of this quote with another market price.
    #[must_use]
    pub fn with_market_price(self, market_price: f64) -> Self {
        Self {
            market_price,
            ..self
        }
    }

    /// Returns a copy of this quote with another option type.
    #[must_use]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Calculates the intrinsic value of the option.
    ///
    /// For calls: max(0, underlying - strike)
    /// For puts: max(0, strike - underlying)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.underlying - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.underlying).max(0.0),
        }
    }

    /// Returns true if the option is in-the-money.
    #[must_use]
    pub fn is_itm(&self) -> bool {
        self.intrinsic_value() > 0.0
    }

    /// Returns true if the option is at-the-money (within 0.1% of strike).
    #[must_use]
    pub fn is_atm(&self) -> bool {
        (self.underlying - self.strike).abs() / self.strike < 0.001
    }

    /// Returns true if the option is out-of-the-money.
    #[must_use]
    pub fn is_otm(&self) -> bool {
        !self.is_itm() && !self.is_atm()
    }

    /// Validates the contract fields (everything except the market price).
    ///
    /// # Errors
    /// `InvalidInput` on non-finite values, non-positive underlying or
    /// strike, or a negative time to expiry.
    pub fn validate_contract(&self) -> Result<(), IVError> {
        if !self.underlying.is_finite() || self.underlying <= 0.0 {
            return Err(IVError::invalid_input(format!(
                "underlying price must be positive, got {}",
                self.underlying
            )));
        }

        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(IVError::invalid_input(format!(
                "strike price must be positive, got {}",
                self.strike
            )));
        }

        if !self.time_to_expiry.is_finite() || self.time_to_expiry < 0.0 {
            return Err(IVError::invalid_input(format!(
                "time to expiry must be non-negative, got {}",
                self.time_to_expiry
            )));
        }

        if !self.risk_free_rate.is_finite() {
            return Err(IVError::invalid_input(format!(
                "risk-free rate must be finite, got {}",
                self.risk_free_rate
            )));
        }

        Ok(())
    }

    /// Validates the contract fields and the market price.
    ///
    /// # Errors
    /// `InvalidInput` as in [`validate_contract`](Self::validate_contract),
    /// or when the market price is negative or not finite.
    pub fn validate(&self) -> Result<(), IVError> {
        self.validate_contract()?;

        if !self.market_price.is_finite() || self.market_price < 0.0 {
            return Err(IVError::invalid_input(format!(
                "market price must be non-negative, got {}",
                self.market_price
            )));
        }

        Ok(())
    }
}

/// Root-finding method that produced a volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    /// Newton-Raphson iteration on vega.
    Newton,
    /// Bisection over a bounded volatility domain (best-effort).
    Bisection,
    /// Brent's bracketed method.
    Brent,
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveMethod::Newton => write!(f, "newton"),
            SolveMethod::Bisection => write!(f, "bisection"),
            SolveMethod::Brent => write!(f, "brent"),
        }
    }
}

/// Result of an implied volatility solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySolution {
    /// Implied volatility as a fraction (e.g., 0.25 = 25%). Always positive.
    pub implied_vol: f64,
    /// Iterations spent by the method that produced the result.
    pub iterations_used: u32,
    /// Method that produced the result.
    pub method: SolveMethod,
}

impl VolatilitySolution {
    /// Creates a new solution.
    #[must_use]
    pub fn new(implied_vol: f64, iterations_used: u32, method: SolveMethod) -> Self {
        Self {
            implied_vol,
            iterations_used,
            method,
        }
    }

    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn iv_percent(&self) -> f64 {
        self.implied_vol * 100.0
    }

    /// Returns true when the result came from the bisection fallback.
    ///
    /// Bisection may stop on its iteration cap without meeting the
    /// tolerance, so such results should carry wider error bars.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.method == SolveMethod::Bisection
    }
}

/// First and second order sensitivities at a given volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂price/∂S, in [-1, 1].
    pub delta: f64,
    /// ∂²price/∂S², non-negative.
    pub gamma: f64,
    /// ∂price/∂σ, non-negative.
    pub vega: f64,
}
