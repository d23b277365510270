//! Baked coefficient operators
//!
//! A recurrence engine is stateful and expensive: every coefficient goes
//! through a memoised recursion. Solvers however apply the same translation
//! or rotation at every iteration. [`BakedOperator`] flattens all
//! coefficients needed up to a fixed degree N, in the canonical generation
//! order of [`Coupling::terms`], and replays them without any lookup.
//!
//! ```text
//! for (n, m) in harmonics(N):          // source row, n ascending, m = -n..n
//!     for target in coupling targets:  // l = |m|..N  or  mu = -n..n
//!         out[row(target)] += c * in[(n, m)]
//! ```

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, RemoveAxis};
use num_complex::Complex64;

use crate::error::{MultipoleError, Result};
use crate::index::{flat_index, harmonics, max_degree_from_rows, num_harmonics};

/// How a source harmonic couples to output rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coupling {
    /// Order is conserved, degree changes: (n, m) → (l, m) for l = |m|..=N
    Coaxial,
    /// Degree is conserved, order changes: (n, m) → (n, mu) for mu = -n..=n
    Rotation,
}

/// One step of the canonical enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// Source degree
    pub n: usize,
    /// Source order
    pub m: i32,
    /// Target degree l (coaxial) or target order mu (rotation)
    pub target: i32,
    /// Flat index of the source row
    pub source: usize,
    /// Flat index of the output row
    pub row: usize,
}

impl Coupling {
    /// Canonical enumeration of all coefficient triples up to `max_degree`
    pub fn terms(self, max_degree: usize) -> impl Iterator<Item = Term> + Clone {
        harmonics(max_degree).flat_map(move |(n, m)| {
            let source = flat_index(n, m);
            let targets = match self {
                Coupling::Coaxial => m.abs()..=max_degree as i32,
                Coupling::Rotation => -(n as i32)..=n as i32,
            };
            targets.map(move |target| {
                let row = match self {
                    Coupling::Coaxial => flat_index(target as usize, m),
                    Coupling::Rotation => flat_index(n, target),
                };
                Term {
                    n,
                    m,
                    target,
                    source,
                    row,
                }
            })
        })
    }

    /// Number of coefficients a baked operator of this kind stores
    pub fn num_terms(self, max_degree: usize) -> usize {
        match self {
            Coupling::Coaxial => harmonics(max_degree)
                .map(|(_, m)| max_degree + 1 - m.unsigned_abs() as usize)
                .sum(),
            Coupling::Rotation => (0..=max_degree).map(|n| (2 * n + 1) * (2 * n + 1)).sum(),
        }
    }
}

/// out[row] += coefficient * input[source], along axis 0
#[inline]
pub(crate) fn accumulate<S, D>(
    out: &mut Array<Complex64, D>,
    input: &ArrayBase<S, D>,
    row: usize,
    source: usize,
    coefficient: Complex64,
) where
    S: Data<Elem = Complex64>,
    D: Dimension + RemoveAxis,
{
    out.index_axis_mut(Axis(0), row)
        .scaled_add(coefficient, &input.index_axis(Axis(0), source));
}

/// Checks the row count of an engine input and returns its maximum degree
pub(crate) fn input_degree<S, D>(input: &ArrayBase<S, D>) -> Result<usize>
where
    S: Data<Elem = Complex64>,
    D: Dimension + RemoveAxis,
{
    max_degree_from_rows(input.len_of(Axis(0)))
}

/// Immutable, precomputed coefficient sequence for a fixed maximum degree
///
/// Holds no reference to the engine that produced it, so it can be cloned
/// freely and applied from several threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedOperator {
    coupling: Coupling,
    max_degree: usize,
    coefficients: Vec<Complex64>,
}

impl BakedOperator {
    /// Collect coefficients from `coefficient(n, m, target)` in canonical order
    pub(crate) fn collect<F>(coupling: Coupling, max_degree: usize, mut coefficient: F) -> Self
    where
        F: FnMut(&Term) -> Complex64,
    {
        let mut coefficients = Vec::with_capacity(coupling.num_terms(max_degree));
        for term in coupling.terms(max_degree) {
            coefficients.push(coefficient(&term));
        }

        Self {
            coupling,
            max_degree,
            coefficients,
        }
    }

    /// Kind of coupling the coefficients describe
    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    /// Degree fixed at bake time
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Number of rows an input must have, (N+1)²
    pub fn num_rows(&self) -> usize {
        num_harmonics(self.max_degree)
    }

    /// Number of stored coefficients
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True only for an operator without coefficients, which baking never produces
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Stored coefficients in canonical generation order
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Apply to a vector or to a matrix whose columns are independent inputs
    pub fn apply<S, D>(&self, input: &ArrayBase<S, D>) -> Result<Array<Complex64, D>>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let mut out = Array::zeros(input.raw_dim());
        self.apply_into(&mut out, input)?;
        Ok(out)
    }

    /// Apply into `out`, which is reshaped to the input's shape and zeroed first
    ///
    /// Fails with [`MultipoleError::DegreeMismatch`] when the input does not
    /// have exactly (N+1)² rows for the baked degree N.
    pub fn apply_into<S, D>(
        &self,
        out: &mut Array<Complex64, D>,
        input: &ArrayBase<S, D>,
    ) -> Result<()>
    where
        S: Data<Elem = Complex64>,
        D: Dimension + RemoveAxis,
    {
        let rows = input.len_of(Axis(0));
        let expected = self.num_rows();
        if rows != expected {
            return Err(MultipoleError::DegreeMismatch {
                max_degree: self.max_degree,
                expected,
                got: rows,
            });
        }

        *out = Array::zeros(input.raw_dim());
        for (term, coefficient) in self.coupling.terms(self.max_degree).zip(&self.coefficients) {
            accumulate(out, input, term.row, term.source, *coefficient);
        }
        Ok(())
    }
}
