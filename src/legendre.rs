//! Associated Legendre functions for the spherical-harmonic expansion.
//!
//! Functions carry no Condon-Shortley phase: `P(1,1) = +sin(θ)`. Derivatives are taken with
//! respect to colatitude θ, which stays finite at the poles.

use crate::triangle::Triangle;

/// Unnormalized associated Legendre functions `P(n, m)(x)` for `0 <= m <= n <= max_degree`,
/// with `x = cos(θ)`.
///
/// # Panics
///
/// If `x` is outside `[-1, 1]`.
pub fn associated_legendre(x: f64, max_degree: usize) -> Triangle<f64> {
    assert!((-1.0..=1.0).contains(&x), "{x} outside [-1, 1]");
    let sqrt_x = (1.0 - x * x).sqrt();
    let mut p = Triangle::filled(max_degree, 0.0);
    p[(0, 0)] = 1.0;
    if max_degree == 0 {
        return p;
    }
    p[(1, 0)] = x;
    p[(1, 1)] = sqrt_x;
    for n in 2..=max_degree {
        let nf = n as f64;
        for m in 0..n - 1 {
            let mf = m as f64;
            p[(n, m)] = (2.0 * nf - 1.0) / (nf - mf) * x * p[(n - 1, m)]
                - (nf + mf - 1.0) / (nf - mf) * p[(n - 2, m)];
        }
        p[(n, n - 1)] = (2.0 * nf - 1.0) * x * p[(n - 1, n - 1)];
        p[(n, n)] = (2.0 * nf - 1.0) * sqrt_x * p[(n - 1, n - 1)];
    }
    p
}

/// `dP(n, m)/dθ` from a table built by [`associated_legendre`].
pub fn legendre_derivative(p: &Triangle<f64>) -> Triangle<f64> {
    let max_degree = p.max_degree();
    let mut dp = Triangle::filled(max_degree, 0.0);
    for n in 1..=max_degree {
        let nf = n as f64;
        dp[(n, 0)] = -p[(n, 1)];
        for m in 1..n {
            let mf = m as f64;
            dp[(n, m)] = 0.5 * ((nf + mf) * (nf - mf + 1.0) * p[(n, m - 1)] - p[(n, m + 1)]);
        }
        dp[(n, n)] = nf * p[(n, n - 1)];
    }
    dp
}

/// Schmidt semi-normalization: `S(n, 0) = 1`, `S(n, m) = sqrt(2 (n-m)! / (n+m)!)`.
pub fn schmidt_factors(max_degree: usize) -> Triangle<f64> {
    let mut s = Triangle::filled(max_degree, 1.0);
    for n in 1..=max_degree {
        // one (n+m)(n-m+1) factor per order keeps the ratio from overflowing
        let mut factor = 2f64.sqrt();
        for m in 1..=n {
            factor /= (((n + m) * (n - m + 1)) as f64).sqrt();
            s[(n, m)] = factor;
        }
    }
    s
}

/// Legendre functions and their colatitude derivatives at one colatitude.
pub struct LegendreTable {
    pub p: Triangle<f64>,
    pub dp: Triangle<f64>,
}

impl LegendreTable {
    pub fn new(max_degree: usize, colatitude_rad: f64) -> Self {
        let x = colatitude_rad.cos().clamp(-1.0, 1.0);
        let p = associated_legendre(x, max_degree);
        let dp = legendre_derivative(&p);
        LegendreTable { p, dp }
    }
}
