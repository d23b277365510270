//! Double-double arithmetic for the coaxial recurrences
//!
//! Coaxial coefficients far from the diagonal come out of differences of
//! order-one neighbours. [`WideComplex`] carries those recurrences in
//! [`TwoFloat`] (about 106 significant bits) and rounds to `Complex64` only
//! when a coefficient is read.

use std::ops::{Add, Div, Mul, Neg, Sub};

use math_audio_wave::special::{spherical_bessel_j_complex, spherical_bessel_y_complex};
use num_complex::Complex64;
use twofloat::TwoFloat;

/// 2^332; squared magnitudes stay finite below it
const RESCALE_LIMIT: f64 = f64::from_bits(0x54B0_0000_0000_0000);

/// Extra orders above the requested one where Miller's recurrence starts
const MILLER_MARGIN: usize = 40;

#[inline]
pub(crate) fn widen(x: f64) -> TwoFloat {
    TwoFloat::from(x)
}

/// √x for x ≥ 0: the f64 root refined by one Newton step
pub(crate) fn sqrt(x: TwoFloat) -> TwoFloat {
    let hi = x.hi();
    if hi <= 0.0 {
        return widen(0.0);
    }
    let root = widen(hi.sqrt());
    root + (x - root * root) / (widen(2.0) * root)
}

/// Complex number with double-double parts
#[derive(Debug, Clone, Copy)]
pub(crate) struct WideComplex {
    re: TwoFloat,
    im: TwoFloat,
}

impl WideComplex {
    pub(crate) fn zero() -> Self {
        Self::from(Complex64::new(0.0, 0.0))
    }

    /// Magnitude, rounded to f64
    pub(crate) fn norm(self) -> f64 {
        Complex64::from(self).norm()
    }

    fn norm_sqr(self) -> TwoFloat {
        self.re * self.re + self.im * self.im
    }

    pub(crate) fn recip(self) -> Self {
        let d = self.norm_sqr();
        Self {
            re: self.re / d,
            im: -self.im / d,
        }
    }

    /// self + i other
    fn plus_i(self, other: Self) -> Self {
        Self {
            re: self.re - other.im,
            im: self.im + other.re,
        }
    }
}

impl From<Complex64> for WideComplex {
    fn from(z: Complex64) -> Self {
        Self {
            re: widen(z.re),
            im: widen(z.im),
        }
    }
}

impl From<WideComplex> for Complex64 {
    fn from(z: WideComplex) -> Self {
        Complex64::new(z.re.hi(), z.im.hi())
    }
}

impl Add for WideComplex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for WideComplex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for WideComplex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Mul<TwoFloat> for WideComplex {
    type Output = Self;

    fn mul(self, rhs: TwoFloat) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl Div<TwoFloat> for WideComplex {
    type Output = Self;

    fn div(self, rhs: TwoFloat) -> Self {
        Self {
            re: self.re / rhs,
            im: self.im / rhs,
        }
    }
}

impl Neg for WideComplex {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

/// Spherical Bessel j_l(z) from Miller's downward recurrence in double-double
///
/// The ratios j_l / j_0 (or j_l / j_1 near a root of j_0) keep full
/// double-double accuracy. The normaliser is the f64 closed form, the same
/// factor for every order at a given z. At z = 0 the result is δ_{l0}.
pub(crate) fn spherical_bessel_j(l: usize, z: Complex64) -> WideComplex {
    if z.norm() < 1e-15 {
        let value = if l == 0 { 1.0 } else { 0.0 };
        return WideComplex::from(Complex64::new(value, 0.0));
    }

    let start = l + 1 + z.norm() as usize + MILLER_MARGIN;
    let inv_z = WideComplex::from(z).recip();
    let shrink = widen(RESCALE_LIMIT.recip());

    let mut values = vec![WideComplex::zero(); start + 2];
    values[start] = WideComplex::from(Complex64::new(1e-30, 0.0));

    for k in (0..start).rev() {
        values[k] = inv_z * widen((2 * k + 3) as f64) * values[k + 1] - values[k + 2];

        if values[k].norm() > RESCALE_LIMIT {
            for v in values[k..].iter_mut() {
                *v = *v * shrink;
            }
        }
    }

    let closed = spherical_bessel_j_complex(2, z);
    let scale = if values[0].norm() >= values[1].norm() {
        WideComplex::from(closed[0]) * values[0].recip()
    } else {
        WideComplex::from(closed[1]) * values[1].recip()
    };

    values[l] * scale
}

/// Spherical Neumann y_l(z), stepped upward in double-double from the f64 y_0, y_1
///
/// Singular at the origin.
pub(crate) fn spherical_neumann_y(l: usize, z: Complex64) -> WideComplex {
    let seeds = spherical_bessel_y_complex(2, z);
    let mut previous = WideComplex::from(seeds[0]);
    if l == 0 {
        return previous;
    }

    let inv_z = WideComplex::from(z).recip();
    let mut current = WideComplex::from(seeds[1]);
    for n in 1..l {
        let next = inv_z * widen((2 * n + 1) as f64) * current - previous;
        previous = current;
        current = next;
    }
    current
}

/// h_l^(1)(z) = j_l(z) + i y_l(z)
pub(crate) fn spherical_hankel_first_kind(l: usize, z: Complex64) -> WideComplex {
    spherical_bessel_j(l, z).plus_i(spherical_neumann_y(l, z))
}
