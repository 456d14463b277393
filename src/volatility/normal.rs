//! Standard normal distribution helpers.
//!
//! The CDF goes through `statrs`' complementary error function rather than
//! `1 + erf`, so the lower tail stays positive and keeps its relative
//! accuracy. Absolute accuracy is around 1e-11.

use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function, P(Z ≤ x).
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
