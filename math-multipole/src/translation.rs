//! Translation along an arbitrary displacement
//!
//! A displacement t = |t| (sin θ cos φ, sin θ sin φ, cos θ) is handled by
//! turning the frame so that t lies on the z axis, translating coaxially
//! by |t| and turning back:
//! ```text
//! rotation (-θ, 0, φ)  →  coaxial translation by |t|  →  rotation (θ, φ, 0)
//! ```
//! All three stages are baked once at construction. Rotation costs O(N³)
//! and coaxial translation O(N³), against O(N⁴) for a dense re-expansion.

use ndarray::{Array, ArrayBase, Data, Dimension, RemoveAxis};
use num_complex::Complex64;

use crate::coaxial::CoaxialTranslation;
use crate::error::Result;
use crate::operator::BakedOperator;
use crate::rotation::RotationCoefficients;

/// Baked rotate / translate / rotate-back composition for one displacement
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralTranslation {
    displacement: [f64; 3],
    distance: f64,
    theta: f64,
    phi: f64,
    to_axis: BakedOperator,
    along_axis: BakedOperator,
    from_axis: BakedOperator,
}

impl GeneralTranslation {
    /// Bake the three stages for `displacement` up to `max_degree`
    ///
    /// With `regular` unset the translation re-expands outgoing (singular)
    /// waves into regular ones, valid inside a ball of radius |t| around
    /// the new origin. A zero displacement takes the z axis as direction.
    pub fn new(
        displacement: [f64; 3],
        wave_number: Complex64,
        regular: bool,
        max_degree: usize,
    ) -> Self {
        let [x, y, z] = displacement;
        let distance = (x * x + y * y + z * z).sqrt();
        let (theta, phi) = if distance > 0.0 {
            ((z / distance).clamp(-1.0, 1.0).acos(), y.atan2(x))
        } else {
            (0.0, 0.0)
        };

        log::debug!(
            "general translation: |t| = {}, theta = {}, phi = {}, degree {}",
            distance,
            theta,
            phi,
            max_degree
        );

        let mut back = RotationCoefficients::new(theta, phi, 0.0);
        let to_axis = back.inverse().bake(max_degree);
        let along_axis = CoaxialTranslation::new(distance, wave_number, regular).bake(max_degree);
        let from_axis = back.bake(max_degree);

        Self {
            displacement,
            distance,
            theta,
            phi,
            to_axis,
            along_axis,
            from_axis,
        }
    }

    /// Cartesian displacement
    pub fn displacement(&self) -> [f64; 3] {
        self.displacement
    }

    /// Spherical pose of the displacement, (|t|, θ, φ)
    pub fn pose(&self) -> (f64, f64, f64) {
        (self.distance, self.theta, self.phi)
    }

    /// Degree fixed at construction
    pub fn max_degree(&self) -> usize {
        self.along_axis.max_degree()
    }

    /// Baked stages in application order
    pub fn stages(&self) -> [&BakedOperator; 3] {
        [&self.to_axis, &self.along_axis, &self.from_axis]
    }

    /// Translate a vector or the columns of a matrix
    pub fn apply<S, D>(&self, input: &ArrayBase<S, D>) -> Result<Array<Complex64, D>>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let mut out = Array::zeros(input.raw_dim());
        self.apply_into(&mut out, input)?;
        Ok(out)
    }

    /// Translate into `out`, which is reshaped to the input's shape
    pub fn apply_into<S, D>(
        &self,
        out: &mut Array<Complex64, D>,
        input: &ArrayBase<S, D>,
    ) -> Result<()>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let aligned = self.to_axis.apply(input)?;
        let shifted = self.along_axis.apply(&aligned)?;
        self.from_axis.apply_into(out, &shifted)
    }
}
