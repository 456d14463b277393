//! # impliedvol-rs
//!
//! Implied volatility and Greeks for European options, aimed at crypto
//! option chains such as the ones listed on Deribit.
//!
//! The crate has two layers:
//!
//! - [`volatility`]: pure numerical engine. Black-Scholes (spot) and
//!   Black-76 (forward) pricing, vega, a Newton solver with a bisection
//!   fallback, a bracketed Brent solver, and delta/gamma/vega calculators.
//! - [`market`]: pure adapter for market data that another component has
//!   already fetched. Parses instrument names like `ETH-28NOV25-4500-C`,
//!   decodes order-book JSON payloads and analyses whole chains while
//!   isolating per-instrument failures.
//!
//! Nothing in the crate performs I/O or keeps global state. Every call is
//! an independent computation, so callers are free to parallelise.
//!
//! # Example
//!
//! ```
//! use impliedvol_rs::prelude::*;
//!
//! let quote = OptionQuote::call(100.0, 100.0, 0.25, 0.05, 5.0);
//! let solution = solve_iv(&Model::BlackScholes, &quote, &SolverConfig::default()).unwrap();
//! assert!(solution.implied_vol > 0.0);
//!
//! let greeks = greeks(&quote, solution.implied_vol).unwrap();
//! assert!(greeks.delta > 0.0 && greeks.delta < 1.0);
//! ```

pub mod market;
pub mod prelude;
pub mod volatility;
