//! Convenience re-exports of the types most callers need.

pub use crate::market::{
    AnalysisConfig, ChainReport, Instrument, InstrumentAnalysis, OptionChain, OrderBookSnapshot,
    QuoteAnalysis, analyze_snapshot,
};
pub use crate::volatility::{
    Black76, BlackScholes, Greeks, IVError, Model, OptionQuote, OptionType, PricingModel,
    SolveMethod, SolverConfig, VolatilitySolution, delta, gamma, greeks, solve_iv,
    solve_iv_bisection, solve_iv_brent, solve_iv_newton,
};
