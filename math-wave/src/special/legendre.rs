//! Associated Legendre functions and spherical harmonics
//!
//! Associated Legendre functions carry the Condon-Shortley phase:
//! ```text
//! P_n^m(x) = (-1)^m (1-x²)^{m/2} d^m/dx^m P_n(x)
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

/// Associated Legendre functions P_n^m(cos θ) for fixed m, seeded with the signed sin θ
///
/// Uses the upward recurrence from the sectorial term:
/// ```text
/// P_m^m(cos θ) = (-1)^m (2m-1)!! sin^m θ
/// (n-m) P_n^m = (2n-1) cos θ P_{n-1}^m - (n+m-1) P_{n-2}^m
/// ```
/// For θ outside [0, π] the seed keeps the sign of sin θ, so the result is
/// the analytic continuation in θ rather than a reflection of it. Rotation
/// recurrences rely on this when handed negative polar angles.
///
/// # Returns
/// Vector of P_m^m, P_{m+1}^m, ..., P_{n_max}^m
///
/// # Example
/// ```
/// use math_audio_wave::special::associated_legendre_angle;
/// let theta: f64 = 0.6;
/// let p = associated_legendre_angle(2, 1, theta);
/// assert!((p[0] + theta.sin()).abs() < 1e-14);
/// ```
pub fn associated_legendre_angle(n_max: usize, m: usize, theta: f64) -> Vec<f64> {
    assert!(m <= n_max, "Order m must be <= degree n_max");

    let (sin_theta, x) = theta.sin_cos();
    let num_values = n_max - m + 1;
    let mut result = vec![0.0; num_values];

    let mut pmm = 1.0;
    for i in 1..=m {
        pmm *= -((2 * i - 1) as f64) * sin_theta;
    }

    result[0] = pmm;

    if num_values == 1 {
        return result;
    }

    let pm1m = x * (2 * m + 1) as f64 * pmm;
    result[1] = pm1m;

    let mut p_prev = pmm;
    let mut p_curr = pm1m;

    for n in (m + 2)..=n_max {
        let n_f64 = n as f64;
        let m_f64 = m as f64;
        let p_next =
            ((2.0 * n_f64 - 1.0) * x * p_curr - (n_f64 + m_f64 - 1.0) * p_prev) / (n_f64 - m_f64);
        result[n - m] = p_next;
        p_prev = p_curr;
        p_curr = p_next;
    }

    result
}

/// Orthonormal spherical harmonic Y_n^m(θ, φ)
///
/// ```text
/// Y_n^m(θ, φ) = (-1)^m √((2n+1)/(4π) (n-|m|)!/(n+|m|)!) P_n^{|m|}(cos θ) e^{imφ}
/// ```
///
/// With this phase Y_n^{-m} = conj(Y_n^m). Returns zero when |m| > n.
///
/// # Example
/// ```
/// use math_audio_wave::special::spherical_harmonic;
/// let y00 = spherical_harmonic(0, 0, 0.3, 1.2);
/// assert!((y00.re - 0.5 / std::f64::consts::PI.sqrt()).abs() < 1e-14);
/// ```
pub fn spherical_harmonic(n: usize, m: i32, theta: f64, phi: f64) -> Complex64 {
    let abs_m = m.unsigned_abs() as usize;
    if abs_m > n {
        return Complex64::new(0.0, 0.0);
    }

    let p = associated_legendre_angle(n, abs_m, theta)[n - abs_m];
    let sign = if m % 2 == 0 { 1.0 } else { -1.0 };

    Complex64::from_polar(sign * normalization_factor(n, abs_m) * p, m as f64 * phi)
}

/// √((2n+1)(n-m)! / (4π(n+m)!))
fn normalization_factor(n: usize, m: usize) -> f64 {
    let two_n_plus_1 = 2 * n + 1;

    // (n-m)! / (n+m)! through logarithms
    let mut log_ratio = 0.0;
    for k in (n - m + 1)..=(n + m) {
        log_ratio -= (k as f64).ln();
    }

    ((two_n_plus_1 as f64 / (4.0 * PI)) * log_ratio.exp()).sqrt()
}
