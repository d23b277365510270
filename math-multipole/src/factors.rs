//! Normalised coupling factors shared by the translation and rotation recurrences
//!
//! ```text
//! a_n^m = √((n+1+|m|)(n+1-|m|) / ((2n+1)(2n+3)))
//! b_n^m = sgn(m) √((n-m-1)(n-m) / ((2n-1)(2n+1))),   sgn(m) = +1 for m ≥ 0
//! ```
//! Both vanish when |m| > n, which also covers negative degrees reached by
//! neighbour lookups. The coaxial recurrences use double-double forms of
//! the same factors.

use twofloat::TwoFloat;

use crate::wide::{sqrt, widen};

/// Coupling factor a_n^m; zero when |m| > n
#[inline]
pub fn a(n: i32, m: i32) -> f64 {
    let abs_m = m.abs();
    if n < abs_m {
        return 0.0;
    }
    (((n + 1 + abs_m) * (n + 1 - abs_m)) as f64 / ((2 * n + 1) * (2 * n + 3)) as f64).sqrt()
}

/// Signed coupling factor b_n^m; zero when |m| > n
#[inline]
pub fn b(n: i32, m: i32) -> f64 {
    if m.abs() > n {
        return 0.0;
    }
    let sign = if m >= 0 { 1.0 } else { -1.0 };
    sign * (((n - m - 1) * (n - m)) as f64 / ((2 * n - 1) * (2 * n + 1)) as f64).sqrt()
}

/// [`a`] in double-double
pub(crate) fn a_wide(n: i32, m: i32) -> TwoFloat {
    let abs_m = m.abs();
    if n < abs_m {
        return widen(0.0);
    }
    sqrt(widen(((n + 1 + abs_m) * (n + 1 - abs_m)) as f64) / widen(((2 * n + 1) * (2 * n + 3)) as f64))
}

/// [`b`] in double-double
pub(crate) fn b_wide(n: i32, m: i32) -> TwoFloat {
    if m.abs() > n {
        return widen(0.0);
    }
    let root = sqrt(widen(((n - m - 1) * (n - m)) as f64) / widen(((2 * n - 1) * (2 * n + 1)) as f64));
    if m >= 0 { root } else { -root }
}
