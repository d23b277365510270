//! Special functions for spherical wave expansions
//!
//! This crate provides the special functions consumed by multipole
//! re-expansion: spherical Bessel/Neumann/Hankel functions (including
//! complex arguments for lossy media), associated Legendre functions and
//! orthonormal spherical harmonics.
//!
//! # Example
//!
//! ```rust
//! use math_audio_wave::special::{spherical_bessel_j, spherical_harmonic};
//!
//! let j = spherical_bessel_j(4, 1.5);
//! assert_eq!(j.len(), 4);
//!
//! let y = spherical_harmonic(2, 1, 0.3, 0.1);
//! assert!(y.norm() > 0.0);
//! ```

pub mod special;
