//! Implied volatility solvers.
//!
//! [`solve_iv`] runs Newton-Raphson on vega and falls back to bisection
//! over a bounded volatility domain when Newton fails. Newton's failure is
//! recoverable; the bisection never fails and reports a best-effort
//! answer instead, flagged by [`SolveMethod::Bisection`].
//!
//! [`solve_iv_brent`] is the alternative when the caller knows a bracket
//! with a sign change. It needs no derivative and fails explicitly when
//! the bracket is wrong.

use super::error::IVError;
use super::model::PricingModel;
use super::types::{OptionQuote, SolveMethod, VolatilitySolution};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Smallest volatility the solvers will report.
pub const MIN_VOLATILITY: f64 = 1e-6;

/// Configuration shared by the Newton, bisection and Brent solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Newton starting point (default: 0.5 = 50%).
    pub initial_guess: f64,
    /// Convergence tolerance on the price residual (Newton, bisection) and
    /// on the volatility bracket width (Brent).
    pub tolerance: f64,
    /// Maximum Newton and Brent iterations.
    pub max_iterations: u32,
    /// Bisection search domain (default: 0.1% to 500%).
    pub bisection_bounds: (f64, f64),
    /// Maximum bisection iterations.
    pub bisection_max_iterations: u32,
    /// Brent bracket (default: 1e-6 to 100%).
    pub brent_bounds: (f64, f64),
    /// Floor applied to every Newton iterate and result.
    pub min_volatility: f64,
    /// Vega below this value aborts Newton.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.5,
            tolerance: 1e-6,
            max_iterations: 1000,
            bisection_bounds: (0.001, 5.0),
            bisection_max_iterations: 100,
            brent_bounds: (MIN_VOLATILITY, 1.0),
            min_volatility: MIN_VOLATILITY,
            min_vega: 1e-12,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Newton starting point.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum number of Newton and Brent iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bisection search domain.
    #[must_use]
    pub fn with_bisection_bounds(mut self, low: f64, high: f64) -> Self {
        self.bisection_bounds = (low, high);
        self
    }

    /// Sets the maximum number of bisection iterations.
    #[must_use]
    pub fn with_bisection_max_iterations(mut self, max_iterations: u32) -> Self {
        self.bisection_max_iterations = max_iterations;
        self
    }

    /// Sets the Brent bracket.
    #[must_use]
    pub fn with_brent_bounds(mut self, low: f64, high: f64) -> Self {
        self.brent_bounds = (low, high);
        self
    }

    /// Checks that tolerances are positive and finite, and bounds are ordered and positive.
    ///
    /// # Errors
    /// `InvalidInput` describing the first offending field.
    pub fn validate(&self) -> Result<(), IVError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(IVError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }

        if self.min_volatility.is_nan() || self.min_volatility <= 0.0 {
            return Err(IVError::invalid_input(format!(
                "minimum volatility must be positive, got {}",
                self.min_volatility
            )));
        }

        if !self.min_vega.is_finite() || self.min_vega < 0.0 {
            return Err(IVError::invalid_input(format!(
                "minimum vega must be finite and non-negative, got {}",
                self.min_vega
            )));
        }

        if !self.initial_guess.is_finite() || self.initial_guess <= 0.0 {
            return Err(IVError::invalid_input(format!(
                "initial guess must be positive, got {}",
                self.initial_guess
            )));
        }

        for (name, (low, high)) in [
            ("bisection", self.bisection_bounds),
            ("brent", self.brent_bounds),
        ] {
            if low.is_nan() || low <= 0.0 || high <= low || !high.is_finite() {
                return Err(IVError::invalid_input(format!(
                    "{name} bounds must satisfy 0 < low < high, got ({low}, {high})"
                )));
            }
        }

        Ok(())
    }
}

/// Validates the quote for solving and rejects unreachable prices.
fn validate_for_solve<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<(), IVError> {
    config.validate()?;
    quote.validate()?;

    if quote.time_to_expiry == 0.0 {
        return Err(IVError::degenerate(format!(
            "time to expiry is zero, every volatility prices at intrinsic value {}",
            quote.intrinsic_value()
        )));
    }

    let intrinsic = model.lower_bound(quote)?;
    if quote.market_price < intrinsic - config.tolerance {
        return Err(IVError::PriceBelowIntrinsic {
            price: quote.market_price,
            intrinsic,
        });
    }

    Ok(())
}

/// Solves for implied volatility with Newton and a bisection fallback.
///
/// Newton starts at `config.initial_guess` and iterates
/// σ_{n+1} = σ_n - (price(σ_n) - market_price) / vega(σ_n)
/// until the residual is below `config.tolerance`. If vega underflows, an
/// iterate is not finite, or the iteration cap is hit, the bisection over
/// `config.bisection_bounds` takes over and always returns an answer.
///
/// # Arguments
/// - `model`: Pricing convention (e.g. [`Model::BlackScholes`](super::Model))
/// - `quote`: Contract and observed market price
/// - `config`: Solver configuration
///
/// # Errors
/// - `InvalidInput` for invalid quote or configuration fields
/// - `DegenerateInput` when the quote is at expiry
/// - `PriceBelowIntrinsic` when no volatility can reproduce the price
///
/// # Example
/// ```
/// use impliedvol_rs::volatility::{Model, OptionQuote, PricingModel, SolverConfig, solve_iv};
///
/// let quote = OptionQuote::call(100.0, 100.0, 0.25, 0.05, 0.0);
/// let market_price = Model::BlackScholes.price(&quote, 0.3).unwrap();
/// let quote = quote.with_market_price(market_price);
///
/// let solution = solve_iv(&Model::BlackScholes, &quote, &SolverConfig::default()).unwrap();
/// assert!((solution.implied_vol - 0.3).abs() < 1e-4);
/// ```
pub fn solve_iv<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    validate_for_solve(model, quote, config)?;

    match newton(model, quote, config) {
        Ok(solution) => Ok(solution),
        Err(IVError::ConvergenceFailure {
            iterations,
            last_iv,
        }) => {
            debug!(
                "{} newton failed after {} iterations (last IV {:.6}), falling back to bisection",
                model.name(),
                iterations,
                last_iv
            );
            bisection(model, quote, config)
        }
        Err(other) => Err(other),
    }
}

/// Solves for implied volatility with Newton only.
///
/// # Errors
/// As [`solve_iv`], plus `ConvergenceFailure` when Newton does not converge.
pub fn solve_iv_newton<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    validate_for_solve(model, quote, config)?;
    newton(model, quote, config)
}

/// Solves for implied volatility with bisection only.
///
/// Slower than Newton but needs no vega. Returns the midpoint of the final
/// bracket when the iteration cap is reached without meeting the tolerance.
///
/// # Errors
/// As [`solve_iv`]; the search itself never fails.
pub fn solve_iv_bisection<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    validate_for_solve(model, quote, config)?;
    bisection(model, quote, config)
}

/// Solves for implied volatility with Brent's method over `config.brent_bounds`.
///
/// Combines inverse quadratic interpolation, secant steps and bisection.
/// Stops once the bracket is narrower than `config.tolerance`.
///
/// # Errors
/// As [`solve_iv`], plus
/// - `NoBracketFound` when the residuals at both bounds share a sign
/// - `NoSolutionFound` when `config.max_iterations` is exhausted
pub fn solve_iv_brent<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    validate_for_solve(model, quote, config)?;

    let residual = |sigma: f64| -> Result<f64, IVError> {
        Ok(model.price(quote, sigma)? - quote.market_price)
    };

    let (mut a, mut b) = config.brent_bounds;
    let mut fa = residual(a)?;
    let mut fb = residual(b)?;

    if fa == 0.0 {
        return Ok(VolatilitySolution::new(a, 0, SolveMethod::Brent));
    }
    if fb == 0.0 {
        return Ok(VolatilitySolution::new(b, 0, SolveMethod::Brent));
    }
    if fa.signum() == fb.signum() {
        return Err(IVError::NoBracketFound {
            low: a,
            high: b,
            residual_low: fa,
            residual_high: fb,
        });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for iteration in 0..config.max_iterations {
        if fb.signum() == fc.signum() {
            // Keep the root between b and c
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.tolerance;
        let half_width = 0.5 * (c - b);

        if half_width.abs() <= tol || fb == 0.0 {
            trace!(
                "{} brent converged in {} iterations, IV {:.6}",
                model.name(),
                iteration + 1,
                b
            );
            return Ok(VolatilitySolution::new(
                b.max(config.min_volatility),
                iteration + 1,
                SolveMethod::Brent,
            ));
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Secant step
                (2.0 * half_width * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half_width * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let interpolation_limit = 3.0 * half_width * q - (tol * q).abs();
            let previous_step_limit = (e * q).abs();
            if 2.0 * p < interpolation_limit.min(previous_step_limit) {
                e = d;
                d = p / q;
            } else {
                d = half_width;
                e = d;
            }
        } else {
            d = half_width;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else {
            tol.copysign(half_width)
        };
        fb = residual(b)?;
    }

    Err(IVError::NoSolutionFound {
        iterations: config.max_iterations,
        last_iv: b,
    })
}

fn newton<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    let mut iv = config.initial_guess.max(config.min_volatility);

    for iteration in 0..config.max_iterations {
        let diff = model.price(quote, iv)? - quote.market_price;

        if diff.abs() < config.tolerance {
            trace!(
                "{} newton converged in {} iterations, IV {:.6}",
                model.name(),
                iteration + 1,
                iv
            );
            return Ok(VolatilitySolution::new(
                iv.max(config.min_volatility),
                iteration + 1,
                SolveMethod::Newton,
            ));
        }

        let vega = model.vega(quote, iv)?;
        if vega.is_nan() || vega < config.min_vega {
            return Err(IVError::ConvergenceFailure {
                iterations: iteration + 1,
                last_iv: iv,
            });
        }

        let next = iv - diff / vega;
        if !next.is_finite() {
            return Err(IVError::ConvergenceFailure {
                iterations: iteration + 1,
                last_iv: iv,
            });
        }

        iv = next.max(config.min_volatility);
    }

    Err(IVError::ConvergenceFailure {
        iterations: config.max_iterations,
        last_iv: iv,
    })
}

fn bisection<M: PricingModel + ?Sized>(
    model: &M,
    quote: &OptionQuote,
    config: &SolverConfig,
) -> Result<VolatilitySolution, IVError> {
    let (mut low, mut high) = config.bisection_bounds;

    for iteration in 0..config.bisection_max_iterations {
        let mid = (low + high) / 2.0;
        let diff = model.price(quote, mid)? - quote.market_price;

        if diff.abs() < config.tolerance {
            trace!(
                "{} bisection converged in {} iterations, IV {:.6}",
                model.name(),
                iteration + 1,
                mid
            );
            return Ok(VolatilitySolution::new(
                mid,
                iteration + 1,
                SolveMethod::Bisection,
            ));
        }

        if diff < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }

    let iv = (low + high) / 2.0;
    warn!(
        "{} bisection exhausted {} iterations without meeting tolerance {}, returning IV {:.6}",
        model.name(),
        config.bisection_max_iterations,
        config.tolerance,
        iv
    );
    Ok(VolatilitySolution::new(
        iv,
        config.bisection_max_iterations,
        SolveMethod::Bisection,
    ))
}
