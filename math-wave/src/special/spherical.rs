//! Spherical Bessel, Neumann and Hankel functions
//!
//! Arguments are complex: multipole translation in a lossy medium carries
//! an imaginary part in the wavenumber. [`spherical_bessel_j`] is the
//! real-argument shorthand for j_n.
//!
//! ## Definitions
//!
//! Spherical Bessel function of first kind:
//! ```text
//! j_n(z) = √(π/2z) * J_{n+1/2}(z)
//! ```
//!
//! Spherical Bessel function of second kind (Neumann):
//! ```text
//! y_n(z) = √(π/2z) * Y_{n+1/2}(z)
//! ```
//!
//! Spherical Hankel function of first kind:
//! ```text
//! h_n^(1)(z) = j_n(z) + i * y_n(z)
//! ```

use num_complex::Complex64;

/// Magnitude above which the downward recurrence is rescaled
const RESCALE_THRESHOLD: f64 = 1e200;

/// Compute spherical Bessel functions j_n(x) for n = 0, 1, ..., order-1
///
/// Uses Miller's downward recurrence for numerical stability, which is
/// essential when n > x. The recurrence relation is:
/// ```text
/// j_{n-1}(x) = (2n+1)/x * j_n(x) - j_{n+1}(x)
/// ```
///
/// # Example
/// ```
/// use math_audio_wave::special::spherical_bessel_j;
/// let j = spherical_bessel_j(5, 1.0);
/// assert!((j[0] - 1.0_f64.sin()).abs() < 1e-12);
/// ```
pub fn spherical_bessel_j(order: usize, x: f64) -> Vec<f64> {
    spherical_bessel_j_complex(order, Complex64::new(x, 0.0))
        .into_iter()
        .map(|j| j.re)
        .collect()
}

/// Compute spherical Bessel functions j_n(z) of complex argument for n = 0, ..., order-1
///
/// Miller's downward recurrence started well above `order` and `|z|`,
/// normalised against the closed forms
/// ```text
/// j_0(z) = sin(z)/z
/// j_1(z) = sin(z)/z² - cos(z)/z
/// ```
/// whichever of the two trial values is larger, so that a root of j_0
/// does not spoil the normalisation.
///
/// At z = 0 the result is j_n(0) = δ_{n0}.
pub fn spherical_bessel_j_complex(order: usize, z: Complex64) -> Vec<Complex64> {
    assert!(order >= 1, "Order must be at least 1");

    let zero = Complex64::new(0.0, 0.0);
    let mut result = vec![zero; order];

    if z.norm() < 1e-15 {
        result[0] = Complex64::new(1.0, 0.0);
        return result;
    }

    if z.norm() < 1e-10 {
        // Leading terms of the series; higher orders vanish below f64 resolution
        result[0] = 1.0 - z * z / 6.0;
        if order > 1 {
            result[1] = z / 3.0;
        }
        return result;
    }

    let start_n = order + (z.norm() as usize) + 20;

    let mut values = vec![zero; start_n + 2];
    values[start_n] = Complex64::new(1e-30, 0.0);

    for k in (0..start_n).rev() {
        values[k] = (2 * k + 3) as f64 / z * values[k + 1] - values[k + 2];

        if values[k].norm() > RESCALE_THRESHOLD {
            for v in values[k..].iter_mut() {
                *v /= RESCALE_THRESHOLD;
            }
        }
    }

    let sin_z = z.sin();
    let cos_z = z.cos();
    let scale = if values[0].norm() >= values[1].norm() {
        sin_z / z / values[0]
    } else {
        (sin_z / z - cos_z) / z / values[1]
    };

    for (n, item) in result.iter_mut().enumerate() {
        *item = values[n] * scale;
    }

    result
}

/// Compute spherical Neumann functions y_n(z) of complex argument for n = 0, ..., order-1
///
/// Starting values:
/// ```text
/// y_0(z) = -cos(z)/z
/// y_1(z) = -cos(z)/z² - sin(z)/z
/// ```
///
/// y_n is singular at the origin; at z = 0 every entry is -∞.
pub fn spherical_bessel_y_complex(order: usize, z: Complex64) -> Vec<Complex64> {
    assert!(order >= 1, "Order must be at least 1");

    if z.norm() < 1e-15 {
        return vec![Complex64::new(f64::NEG_INFINITY, 0.0); order];
    }

    let mut result = vec![Complex64::new(0.0, 0.0); order];

    let cos_z = z.cos();
    let sin_z = z.sin();

    result[0] = -cos_z / z;

    if order == 1 {
        return result;
    }

    result[1] = -cos_z / (z * z) - sin_z / z;

    for n in 2..order {
        result[n] = (2 * n - 1) as f64 / z * result[n - 1] - result[n - 2];
    }

    result
}

/// Compute spherical Hankel functions of the first kind h_n^(1)(z) for n = 0, ..., order-1
///
/// Assembled as j_n(z) + i y_n(z) from the two routines above. At z = 0 the
/// imaginary part is -∞ for every order.
///
/// # Example
/// ```
/// use math_audio_wave::special::spherical_hankel_first_kind_complex;
/// use num_complex::Complex64;
///
/// let z = Complex64::new(2.0, 0.0);
/// let h = spherical_hankel_first_kind_complex(3, z);
/// // h_0(z) = -i exp(iz)/z
/// let expected = -Complex64::i() * (Complex64::i() * z).exp() / z;
/// assert!((h[0] - expected).norm() < 1e-12);
/// ```
pub fn spherical_hankel_first_kind_complex(order: usize, z: Complex64) -> Vec<Complex64> {
    let j = spherical_bessel_j_complex(order, z);
    let y = spherical_bessel_y_complex(order, z);

    j.iter()
        .zip(y.iter())
        .map(|(j_n, y_n)| Complex64::new(j_n.re - y_n.im, j_n.im + y_n.re))
        .collect()
}
