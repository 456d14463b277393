//! Error types for pricing, implied volatility and Greeks.

use std::fmt;

/// Errors raised by the pricing engine and the market adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum IVError {
    /// Invalid input parameters, rejected before any iteration.
    InvalidInput {
        /// Description of the invalid parameter and its value.
        message: String,
    },

    /// Option type text that is neither a call nor a put.
    InvalidOptionType {
        /// The rejected text.
        value: String,
    },

    /// Market price is below the zero-volatility price of the model.
    PriceBelowIntrinsic {
        /// Market price observed.
        price: f64,
        /// Discounted intrinsic value (price at zero volatility).
        intrinsic: f64,
    },

    /// The requested formula is undefined for these inputs (T = 0 or sigma = 0).
    DegenerateInput {
        /// Description of the degenerate condition.
        message: String,
    },

    /// Newton solver did not converge within max iterations.
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last IV estimate before giving up.
        last_iv: f64,
    },

    /// Brent bracket has no sign change between its bounds.
    NoBracketFound {
        /// Lower volatility bound.
        low: f64,
        /// Upper volatility bound.
        high: f64,
        /// Pricing residual at the lower bound.
        residual_low: f64,
        /// Pricing residual at the upper bound.
        residual_high: f64,
    },

    /// Brent solver exhausted its iterations inside a valid bracket.
    NoSolutionFound {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last IV estimate before giving up.
        last_iv: f64,
    },

    /// Instrument name that does not follow `CURRENCY-DMMMYY-STRIKE-C|P`.
    InvalidInstrument {
        /// The rejected instrument name.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Market data payload could not be decoded.
    Deserialization {
        /// Decoder or exchange error message.
        message: String,
    },

    /// Market data could not be encoded.
    Serialization {
        /// Encoder error message.
        message: String,
    },

    /// Any error annotated with the instrument it was raised for.
    Instrument {
        /// Instrument name.
        instrument: String,
        /// Underlying error.
        source: Box<IVError>,
    },
}

impl IVError {
    /// Wraps the error with the instrument it belongs to.
    ///
    /// Already-annotated errors are returned unchanged.
    #[must_use]
    pub fn for_instrument(self, instrument: &str) -> Self {
        match self {
            IVError::Instrument { .. } => self,
            other => IVError::Instrument {
                instrument: instrument.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, skipping instrument annotations.
    #[must_use]
    pub fn root(&self) -> &IVError {
        match self {
            IVError::Instrument { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        IVError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        IVError::DegenerateInput {
            message: message.into(),
        }
    }
}

impl fmt::Display for IVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IVError::InvalidInput { message } => {
                write!(f, "invalid input: {message}")
            }
            IVError::InvalidOptionType { value } => {
                write!(f, "invalid option type '{value}', expected call or put")
            }
            IVError::PriceBelowIntrinsic { price, intrinsic } => {
                write!(f, "price {price:.6} is below intrinsic value {intrinsic:.6}")
            }
            IVError::DegenerateInput { message } => {
                write!(f, "degenerate input: {message}")
            }
            IVError::ConvergenceFailure {
                iterations,
                last_iv,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last IV: {last_iv:.4}"
                )
            }
            IVError::NoBracketFound {
                low,
                high,
                residual_low,
                residual_high,
            } => {
                write!(
                    f,
                    "no sign change in [{low}, {high}]: residuals {residual_low:.6} and {residual_high:.6}"
                )
            }
            IVError::NoSolutionFound {
                iterations,
                last_iv,
            } => {
                write!(
                    f,
                    "no solution found after {iterations} iterations, last IV: {last_iv:.4}"
                )
            }
            IVError::InvalidInstrument { name, reason } => {
                write!(f, "invalid instrument '{name}': {reason}")
            }
            IVError::Deserialization { message } => {
                write!(f, "deserialization error: {message}")
            }
            IVError::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            IVError::Instrument { instrument, source } => {
                write!(f, "{instrument}: {source}")
            }
        }
    }
}

impl std::error::Error for IVError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IVError::Instrument { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
