//! Multipole re-expansion operators for spherical wave expansions
//!
//! This crate computes the coefficients that re-express a spherical
//! harmonic expansion after a change of reference frame, and packages them
//! as reusable linear operators for iterative multiple-scattering solvers.
//!
//! # Features
//!
//! - **Coaxial translation**: shift of the expansion origin along z, for
//!   regular (R → R) and irregular (S → R) expansions and complex wavenumbers
//! - **Rotation**: Euler-angle rotation of the frame, block diagonal in degree
//! - **Baked operators**: every coefficient up to a degree cutoff flattened
//!   once and replayed on vectors or matrices without recomputation
//! - **General translation**: rotate / translate-along-axis / rotate-back
//!   for arbitrary displacements
//!
//! Expansions are indexed by the flat index n² + n + m, see [`index`].
//!
//! # Example
//!
//! ```rust
//! use math_audio_multipole::{CoaxialTranslation, num_harmonics};
//! use ndarray::Array1;
//! use num_complex::Complex64;
//!
//! let mut engine = CoaxialTranslation::new(1.5, Complex64::new(1.3, 0.2), true);
//! let operator = engine.bake(7);
//!
//! let input = Array1::from_elem(num_harmonics(7), Complex64::new(1.0, 0.0));
//! let fast = operator.apply(&input).unwrap();
//! let slow = engine.apply(&input).unwrap();
//! assert!((&fast - &slow).iter().all(|d| d.norm() < 1e-12));
//! ```

pub mod coaxial;
pub mod config;
pub mod error;
pub mod factors;
pub mod index;
pub mod operator;
pub mod parallel;
pub mod rotation;
pub mod translation;
mod wide;

// Re-export main types
pub use coaxial::CoaxialTranslation;
pub use config::{OperatorConfig, RotationConfig, TranslationConfig, WaveNumber};
pub use error::{MultipoleError, Result};
pub use index::{flat_index, harmonics, max_degree_from_rows, num_harmonics};
pub use operator::{BakedOperator, Coupling, Term};
pub use parallel::{apply_batch, bake_translations};
pub use rotation::RotationCoefficients;
pub use translation::GeneralTranslation;
