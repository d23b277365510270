//! Coaxial translation coefficients
//!
//! Re-expansion of a spherical wave expansion after shifting its origin by
//! a distance t along the z axis. Order is conserved, so a coefficient is
//! addressed by the source degree n, the common order m and the target
//! degree l:
//! ```text
//! R_n^m(r + t ẑ) = Σ_l C(n, m, l) R_l^m(r)            (regular)
//! S_n^m(r + t ẑ) = Σ_l C(n, m, l) R_l^m(r),  |r| < t   (irregular)
//! ```
//! with R_n^m = j_n(kr) Y_n^m and S_n^m = h_n^(1)(kr) Y_n^m.
//!
//! Coefficients are built by Gumerov-Duraiswami recurrences from the zonal
//! initial values C(0, 0, l) = (-1)^l √(2l+1) f_l(kt), f = j or h^(1).
//! Only those initial values depend on k and t; the recurrences are pure
//! index arithmetic. Each recursion step lowers n by at least one, so the
//! depth is bounded by the source degree.
//!
//! Initial values, factors and the cache are carried in double-double
//! (`twofloat`); coefficients are rounded to `Complex64` when
//! read, applied or baked. Coefficients far from the diagonal at short
//! range keep their relative accuracy this way.

use std::collections::HashMap;

use ndarray::{Array, ArrayBase, Data, Dimension, RemoveAxis};
use num_complex::Complex64;

use crate::error::Result;
use crate::factors::{a_wide as a, b_wide as b};
use crate::operator::{BakedOperator, Coupling, accumulate, input_degree};
use crate::wide::{self, WideComplex, widen};

/// Memoised coaxial translation coefficients for one (distance, wavenumber) pair
///
/// The cache only ever grows. A different distance, wavenumber or basis
/// family needs a new instance.
#[derive(Debug, Clone)]
pub struct CoaxialTranslation {
    distance: f64,
    wave_number: Complex64,
    regular: bool,
    cache: HashMap<[i32; 3], WideComplex>,
}

impl CoaxialTranslation {
    /// Create an engine translating by `distance` along z
    ///
    /// `regular` selects R → R re-expansion (spherical Bessel initial values);
    /// otherwise S → R (spherical Hankel initial values).
    pub fn new(distance: f64, wave_number: Complex64, regular: bool) -> Self {
        Self {
            distance,
            wave_number,
            regular,
            cache: HashMap::new(),
        }
    }

    /// Translation distance
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Wavenumber of the medium
    pub fn wave_number(&self) -> Complex64 {
        self.wave_number
    }

    /// Whether the regular (R → R) family is translated
    pub fn is_regular(&self) -> bool {
        self.regular
    }

    /// Number of memoised coefficients
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Coefficient mapping source harmonic (n, m) onto target degree l
    ///
    /// Zero whenever |m| > min(n, l).
    pub fn coefficient(&mut self, n: usize, m: i32, l: usize) -> Complex64 {
        self.coeff(n as i32, m, l as i32).into()
    }

    /// Translate a vector or the columns of a matrix
    ///
    /// Rows follow the flat index n² + n + m up to a degree N inferred from
    /// the row count, which must be (N+1)².
    pub fn apply<S, D>(&mut self, input: &ArrayBase<S, D>) -> Result<Array<Complex64, D>>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let mut out = Array::zeros(input.raw_dim());
        self.apply_into(&mut out, input)?;
        Ok(out)
    }

    /// Translate into `out`, which is reshaped to the input's shape and zeroed first
    pub fn apply_into<S, D>(
        &mut self,
        out: &mut Array<Complex64, D>,
        input: &ArrayBase<S, D>,
    ) -> Result<()>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let max_degree = input_degree(input)?;

        *out = Array::zeros(input.raw_dim());
        for term in Coupling::Coaxial.terms(max_degree) {
            let c: Complex64 = self.coeff(term.n as i32, term.m, term.target).into();
            accumulate(out, input, term.row, term.source, c);
        }
        Ok(())
    }

    /// Flatten every coefficient up to `max_degree` into a reusable operator
    pub fn bake(&mut self, max_degree: usize) -> BakedOperator {
        let baked = BakedOperator::collect(Coupling::Coaxial, max_degree, |term| {
            self.coeff(term.n as i32, term.m, term.target).into()
        });

        log::debug!(
            "baked coaxial operator: degree {}, {} coefficients, {} cached (t = {}, k = {}, regular = {})",
            max_degree,
            baked.len(),
            self.cache.len(),
            self.distance,
            self.wave_number,
            self.regular
        );

        baked
    }

    fn coeff(&mut self, n: i32, m: i32, l: i32) -> WideComplex {
        // C(n, -m, l) = C(n, m, l)
        let m = m.abs();
        if m > n || m > l {
            return WideComplex::zero();
        }

        let key = [n, m, l];
        if let Some(&value) = self.cache.get(&key) {
            return value;
        }

        let value = self.recurrence(n, m, l);
        self.cache.insert(key, value);
        value
    }

    /// Branch selection, with m ≥ 0 and m ≤ min(n, l)
    fn recurrence(&mut self, n: i32, m: i32, l: i32) -> WideComplex {
        if n == 0 {
            self.initial(l)
        } else if n == m {
            self.sectorial_recurrence(n, l)
        } else if m == 0 {
            self.zonal_recurrence(n, l)
        } else {
            self.offdiagonal_recurrence(n, m, l)
        }
    }

    /// C(0, 0, l) = (-1)^l √(2l+1) f_l(kt)
    fn initial(&self, l: i32) -> WideComplex {
        let kt = self.wave_number * self.distance;
        let radial = if self.regular {
            wide::spherical_bessel_j(l as usize, kt)
        } else {
            wide::spherical_hankel_first_kind(l as usize, kt)
        };
        let norm = wide::sqrt(widen((2 * l + 1) as f64));

        if l % 2 == 0 { radial * norm } else { -(radial * norm) }
    }

    /// n = m: raise degree and order together
    ///
    /// b_m^{-m} C(m, m, l) = b_l^{-m} C(m-1, m-1, l-1) - b_{l+1}^{m-1} C(m-1, m-1, l+1)
    fn sectorial_recurrence(&mut self, m: i32, l: i32) -> WideComplex {
        let lower = self.coeff(m - 1, m - 1, l - 1);
        let upper = self.coeff(m - 1, m - 1, l + 1);

        (lower * b(l, -m) - upper * b(l + 1, m - 1)) / b(m, -m)
    }

    /// m = 0, where a_n^0 reduces to (n+1)/√((2n+1)(2n+3))
    ///
    /// Steps the source degree; the n-2 neighbour vanishes for n = 1.
    fn zonal_recurrence(&mut self, n: i32, l: i32) -> WideComplex {
        let previous = self.coeff(n - 2, 0, l);
        let lower = self.coeff(n - 1, 0, l - 1);
        let upper = self.coeff(n - 1, 0, l + 1);

        (previous * a(n - 2, 0) - upper * a(l, 0) + lower * a(l - 1, 0)) / a(n - 1, 0)
    }

    /// General case, stepping the source degree at fixed order
    ///
    /// a_{n-1}^m C(n, m, l) = a_{n-2}^m C(n-2, m, l) - a_l^m C(n-1, m, l+1) + a_{l-1}^m C(n-1, m, l-1)
    fn offdiagonal_recurrence(&mut self, n: i32, m: i32, l: i32) -> WideComplex {
        let previous = self.coeff(n - 2, m, l);
        let lower = self.coeff(n - 1, m, l - 1);
        let upper = self.coeff(n - 1, m, l + 1);

        (previous * a(n - 2, m) - upper * a(l, m) + lower * a(l - 1, m)) / a(n - 1, m)
    }
}
