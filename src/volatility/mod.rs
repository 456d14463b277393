//! Option pricing and implied volatility engine.
//!
//! This module provides closed-form pricing under two conventions and the
//! numerical inversion of those prices into implied volatility (IV).
//!
//! # Overview
//!
//! A quoted option premium and its implied volatility carry the same
//! information. Quoting in volatility makes contracts with different
//! strikes and expiries comparable on one scale.
//!
//! # Models
//!
//! - [`BlackScholes`]: spot-based, with drift `r`.
//! - [`Black76`]: forward-based, for options on futures. Crypto option
//!   venues quote against a futures or index price, so this is often the
//!   natural choice there.
//!
//! Both implement [`PricingModel`]; [`Model`] selects one at runtime.
//!
//! # Inversion
//!
//! There is no analytical inverse, so [`solve_iv`] runs Newton-Raphson on
//! vega and falls back to bisection when vega underflows (deep
//! out-of-the-money options, minutes to expiry). When a bracket with a
//! sign change is known, [`solve_iv_brent`] converges without vega and
//! fails loudly if the bracket is wrong.
//!
//! # Example
//!
//! ```
//! use impliedvol_rs::volatility::{Model, OptionQuote, SolverConfig, greeks, solve_iv};
//!
//! let quote = OptionQuote::call(4405.75, 4500.0, 1.0 / 365.0, 0.02388, 0.0035);
//! let solution = solve_iv(&Model::BlackScholes, &quote, &SolverConfig::default()).unwrap();
//! println!("IV: {:.2}% via {}", solution.iv_percent(), solution.method);
//!
//! let greeks = greeks(&quote, solution.implied_vol).unwrap();
//! assert!(greeks.delta < 0.01);
//! ```

mod black76;
mod black_scholes;
mod error;
mod greeks;
mod model;
mod normal;
mod solver;
mod types;

pub use black_scholes::BlackScholes;
pub use black76::Black76;
pub use error::IVError;
pub use greeks::{delta, gamma, greeks, vega};
pub use model::{Model, PricingModel};
pub use normal::{norm_cdf, norm_pdf};
pub use solver::{
    MIN_VOLATILITY, SolverConfig, solve_iv, solve_iv_bisection, solve_iv_brent, solve_iv_newton,
};
pub use types::{Greeks, OptionQuote, OptionType, SolveMethod, VolatilitySolution};
