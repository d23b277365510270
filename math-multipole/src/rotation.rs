//! Rotation coefficients for spherical harmonic expansions
//!
//! For Euler angles (θ, φ, χ) and the frame rotation
//! Q = R_z(χ) R_y(-θ) R_z(-φ), the coefficients satisfy
//! ```text
//! Y_n^m(Q r̂) = Σ_mu T(n, m, mu) Y_n^mu(r̂)
//! ```
//! Rotation never mixes degrees, so T is block diagonal in n.
//!
//! Zonal coefficients have a closed form,
//! T(n, 0, mu) = √(4π/(2n+1)) conj(Y_n^mu(θ, φ)); higher orders follow from
//! a three-term recurrence that climbs one degree for every order it drops.
//! Negative orders use T(n, m, mu) = conj(T(n, -m, -mu)) and are never cached.

use std::collections::HashMap;
use std::f64::consts::PI;

use math_audio_wave::special::spherical_harmonic;
use ndarray::{Array, ArrayBase, Data, Dimension, RemoveAxis};
use num_complex::Complex64;
use num_traits::Zero;

use crate::error::Result;
use crate::factors::{a, b};
use crate::operator::{BakedOperator, Coupling, accumulate, input_degree};

/// Memoised rotation coefficients for one set of Euler angles
#[derive(Debug, Clone)]
pub struct RotationCoefficients {
    theta: f64,
    phi: f64,
    chi: f64,
    cache: HashMap<[i32; 3], Complex64>,
}

impl RotationCoefficients {
    /// Create an engine for polar angle `theta` and azimuthal angles `phi`, `chi`
    pub fn new(theta: f64, phi: f64, chi: f64) -> Self {
        Self {
            theta,
            phi,
            chi,
            cache: HashMap::new(),
        }
    }

    /// Engine for the inverse rotation Q⁻¹, angles (-θ, χ, φ)
    pub fn inverse(&self) -> Self {
        Self::new(-self.theta, self.chi, self.phi)
    }

    /// Euler angles (θ, φ, χ)
    pub fn angles(&self) -> (f64, f64, f64) {
        (self.theta, self.phi, self.chi)
    }

    /// Number of memoised coefficients
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Coefficient coupling order m onto order mu within degree n
    ///
    /// Zero whenever |m| > n or |mu| > n.
    pub fn coefficient(&mut self, n: usize, m: i32, mu: i32) -> Complex64 {
        self.coeff(n as i32, m, mu)
    }

    /// Weights (c0, c1, c2) of the neighbours at degree n+1, order m-1
    /// and target orders mu+1, mu-1, mu, for m > 0
    pub fn factors(&self, n: i32, m: i32, mu: i32) -> [Complex64; 3] {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let f = -Complex64::from_polar(1.0, self.chi) / b(n + 1, m - 1);

        let c0 = f * 0.5 * b(n + 1, -mu - 1) * Complex64::from_polar(1.0, self.phi) * (1.0 - cos_theta);
        let c1 = -f * 0.5 * b(n + 1, mu - 1) * Complex64::from_polar(1.0, -self.phi) * (1.0 + cos_theta);
        let c2 = -f * a(n, mu) * sin_theta;

        [c0, c1, c2]
    }

    /// Rotate a vector or the columns of a matrix
    ///
    /// out(n, mu) = Σ_m T(n, m, mu) in(n, m), rows in flat index order.
    pub fn apply<S, D>(&mut self, input: &ArrayBase<S, D>) -> Result<Array<Complex64, D>>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let mut out = Array::zeros(input.raw_dim());
        self.apply_into(&mut out, input)?;
        Ok(out)
    }

    /// Rotate into `out`, which is reshaped to the input's shape and zeroed first
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
        for term in Coupling::Rotation.terms(max_degree) {
            let c = self.coeff(term.n as i32, term.m, term.target);
            accumulate(out, input, term.row, term.source, c);
        }
        Ok(())
    }

    /// Flatten every coefficient up to `max_degree` into a reusable operator
    pub fn bake(&mut self, max_degree: usize) -> BakedOperator {
        let baked = BakedOperator::collect(Coupling::Rotation, max_degree, |term| {
            self.coeff(term.n as i32, term.m, term.target)
        });

        log::debug!(
            "baked rotation operator: degree {}, {} coefficients, {} cached (theta = {}, phi = {}, chi = {})",
            max_degree,
            baked.len(),
            self.cache.len(),
            self.theta,
            self.phi,
            self.chi
        );

        baked
    }

    fn coeff(&mut self, n: i32, m: i32, mu: i32) -> Complex64 {
        if n < 0 || m.abs() > n || mu.abs() > n {
            return Complex64::zero();
        }
        if m < 0 {
            return self.coeff(n, -m, -mu).conj();
        }

        let key = [n, m, mu];
        if let Some(&value) = self.cache.get(&key) {
            return value;
        }

        let value = if m == 0 {
            self.initial(n, mu)
        } else {
            let [c0, c1, c2] = self.factors(n, m, mu);
            c0 * self.coeff(n + 1, m - 1, mu + 1)
                + c1 * self.coeff(n + 1, m - 1, mu - 1)
                + c2 * self.coeff(n + 1, m - 1, mu)
        };

        self.cache.insert(key, value);
        value
    }

    fn initial(&self, n: i32, mu: i32) -> Complex64 {
        let scale = (4.0 * PI / (2 * n + 1) as f64).sqrt();
        scale * spherical_harmonic(n as usize, mu, self.theta, self.phi).conj()
    }
}
