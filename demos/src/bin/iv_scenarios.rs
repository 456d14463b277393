//! Solves the reference implied volatility scenarios and prints the Greeks
//!
//! This demo shows how to:
//! 1. Invert a short-dated Black-Scholes call with Newton and with Brent
//! 2. Price options on a forward with Black-76
//! 3. Read solver errors instead of panicking on unsolvable quotes

use impliedvol_rs::prelude::*;
use tracing::{info, warn};

fn report(label: &str, model: &dyn PricingModel, quote: &OptionQuote, config: &SolverConfig) {
    match solve_iv(model, quote, config) {
        Ok(solution) => {
            let repriced = model.price(quote, solution.implied_vol).unwrap_or(f64::NAN);
            info!(
                "{}: IV {:.4}% via {} in {} iterations (re-priced {:.6} vs {:.6})",
                label,
                solution.iv_percent(),
                solution.method,
                solution.iterations_used,
                repriced,
                quote.market_price
            );
            if solution.is_degraded() {
                warn!("{}: Newton did not converge, bisection answer used", label);
            }
        }
        Err(e) => warn!("{}: {}", label, e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting implied volatility scenarios");
    let config = SolverConfig::default();

    // Short-dated out-of-the-money call on spot
    let call = OptionQuote::call(4405.75, 4500.0, 1.0 / 365.0, 0.02388, 0.0035);
    report("BS call", &BlackScholes, &call, &config);

    let brent = solve_iv_brent(&BlackScholes, &call, &config)?;
    info!(
        "BS call (Brent): IV {:.4}% in {} iterations",
        brent.iv_percent(),
        brent.iterations_used
    );

    let newton = solve_iv(&BlackScholes, &call, &config)?;
    let greeks = greeks(&call, newton.implied_vol)?;
    info!(
        "BS call Greeks: delta {:.6}, gamma {:.8}, vega {:.6}",
        greeks.delta, greeks.gamma, greeks.vega
    );

    // Forward-normalised quotes, F = 1
    let strike = 4294.0 / 4450.0;
    let forward_call = OptionQuote::call(1.0, strike, 3.0 / 365.0, 0.0, 0.013);
    report("B76 call", &Black76, &forward_call, &config);
    report(
        "B76 put",
        &Black76,
        &forward_call.with_option_type(OptionType::Put),
        &config,
    );

    // Vega underflows at the initial guess, the bisection fallback answers
    let hostile = OptionQuote::call(100.0, 150.0, 0.001, 0.0, 0.01);
    report("Deep OTM call", &BlackScholes, &hostile, &config);

    info!("Implied volatility scenarios completed");
    Ok(())
}
