//! Pure adapter between exchange market data and the volatility engine.
//!
//! Nothing here talks to the network. Callers fetch order books however
//! they like (REST polling, a streaming feed) and hand the JSON text or
//! decoded snapshots to this module.

mod analysis;
/// Keyed collection of snapshots analysed in one pass.
pub mod chain;
mod instrument;
/// Order book snapshots as reported by the exchange.
pub mod snapshot;

pub use analysis::{AnalysisConfig, InstrumentAnalysis, QuoteAnalysis, analyze_snapshot};
pub use chain::{ChainReport, OptionChain};
pub use instrument::{EXPIRY_HOUR_UTC, Instrument};
pub use snapshot::OrderBookSnapshot;
