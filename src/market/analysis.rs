//! Implied volatility and Greeks for one order book snapshot.

use super::instrument::Instrument;
use super::snapshot::{OrderBookSnapshot, iv_fraction};
use crate::volatility::{
    Greeks, IVError, Model, OptionQuote, OptionType, SolverConfig, VolatilitySolution, delta,
    greeks, solve_iv,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Settings for analysing exchange snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pricing convention. Defaults to Black-76, since the underlying
    /// price reported with option books is a futures or index level.
    pub model: Model,
    /// Risk-free rate (crypto venues usually use 0).
    pub risk_free_rate: f64,
    /// Use the snapshot's `interest_rate` when present instead of
    /// `risk_free_rate`.
    pub use_exchange_rate: bool,
    /// Solver settings.
    pub solver: SolverConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: Model::Black76,
            risk_free_rate: 0.0,
            use_exchange_rate: false,
            solver: SolverConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Sets the pricing model.
    #[must_use]
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    /// Prefers the rate reported with each snapshot over `risk_free_rate`.
    #[must_use]
    pub fn with_exchange_rate(mut self, use_exchange_rate: bool) -> Self {
        self.use_exchange_rate = use_exchange_rate;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Solved IV for one price side compared with the exchange's own IV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteAnalysis {
    /// Price in quote currency fed to the solver.
    pub market_price: f64,
    /// Solver output.
    pub solution: VolatilitySolution,
    /// Exchange-reported IV as a fraction, when available.
    pub exchange_iv: Option<f64>,
    /// `exchange_iv - solution.implied_vol`.
    pub iv_diff: Option<f64>,
}

/// Full analysis of one instrument.
///
/// Bid and ask are `None` when that side of the book is empty. A side that
/// cannot be solved keeps its error so the other sides remain usable.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentAnalysis {
    /// Parsed instrument.
    pub instrument: Instrument,
    /// Underlying price used for every quote.
    pub underlying: f64,
    /// Time to expiry in years.
    pub time_to_expiry: f64,
    /// Risk-free rate the quotes were solved with.
    pub risk_free_rate: f64,
    /// Best bid analysis.
    pub bid: Option<Result<QuoteAnalysis, IVError>>,
    /// Best ask analysis.
    pub ask: Option<Result<QuoteAnalysis, IVError>>,
    /// Mark price analysis.
    pub mark: QuoteAnalysis,
    /// Greeks of the instrument at the mark IV.
    pub greeks: Greeks,
    /// Call delta at the mark IV.
    pub call_delta: f64,
    /// Put delta at the mark IV.
    pub put_delta: f64,
}

impl InstrumentAnalysis {
    /// Mark implied volatility as a fraction.
    #[must_use]
    pub fn mark_iv(&self) -> f64 {
        self.mark.solution.implied_vol
    }
}

fn analyze_side(
    quote: &OptionQuote,
    market_price: f64,
    exchange_iv: Option<f64>,
    config: &AnalysisConfig,
) -> Result<QuoteAnalysis, IVError> {
    let quote = quote.with_market_price(market_price);
    let solution = solve_iv(&config.model, &quote, &config.solver)?;

    Ok(QuoteAnalysis {
        market_price,
        solution,
        exchange_iv,
        iv_diff: exchange_iv.map(|iv| iv - solution.implied_vol),
    })
}

/// Solves bid, ask and mark IVs of a snapshot and computes Greeks at the mark IV.
///
/// Coin-quoted prices are converted to quote currency with the snapshot's
/// underlying price. Time to expiry is measured from `now`.
///
/// # Errors
/// Any instrument-name, validation or solver error on the mark side,
/// annotated with the instrument name.
pub fn analyze_snapshot(
    snapshot: &OrderBookSnapshot,
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> Result<InstrumentAnalysis, IVError> {
    let name = snapshot.instrument_name.as_str();
    let instrument: Instrument = name.parse().map_err(|e: IVError| e.for_instrument(name))?;
    let time_to_expiry = instrument.time_to_expiry(now);
    let risk_free_rate = match snapshot.interest_rate {
        Some(rate) if config.use_exchange_rate => rate,
        _ => config.risk_free_rate,
    };

    let base = OptionQuote::new(
        snapshot.underlying_price,
        instrument.strike,
        time_to_expiry,
        risk_free_rate,
        0.0,
        instrument.option_type,
    );
    debug!(
        "{}: underlying {} strike {} T {:.8} rate {}",
        name, base.underlying, base.strike, time_to_expiry, base.risk_free_rate
    );

    let mark = analyze_side(
        &base,
        snapshot.mark_price_usd(),
        iv_fraction(snapshot.mark_iv),
        config,
    )
    .map_err(|e| e.for_instrument(name))?;

    let side = |price: Option<f64>, exchange_iv: Option<f64>, label: &str| {
        price.map(|price| {
            analyze_side(&base, price, exchange_iv, config).map_err(|e| {
                warn!("{} {} side unsolved: {}", name, label, e);
                e.for_instrument(name)
            })
        })
    };
    let bid = side(snapshot.bid_price_usd(), iv_fraction(snapshot.bid_iv), "bid");
    let ask = side(snapshot.ask_price_usd(), iv_fraction(snapshot.ask_iv), "ask");

    let mark_iv = mark.solution.implied_vol;
    let with_name = |e: IVError| e.for_instrument(name);
    let greeks = greeks(&base, mark_iv).map_err(with_name)?;
    let call_delta = delta(&base.with_option_type(OptionType::Call), mark_iv).map_err(with_name)?;
    let put_delta = delta(&base.with_option_type(OptionType::Put), mark_iv).map_err(with_name)?;

    Ok(InstrumentAnalysis {
        instrument,
        underlying: snapshot.underlying_price,
        time_to_expiry,
        risk_free_rate,
        bid,
        ask,
        mark,
        greeks,
        call_delta,
        put_delta,
    })
}
