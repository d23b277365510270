//! Special mathematical functions for spherical wave expansions
//!
//! - Spherical Bessel functions (jₙ, yₙ) of complex argument, with a
//!   real-argument shorthand for jₙ
//! - Spherical Hankel functions (hₙ⁽¹⁾), complex argument
//! - Associated Legendre functions (Pₙᵐ) and spherical harmonics (Yₙᵐ)
//!
//! These feed the initial values of the multipole translation and
//! rotation recurrences.

mod legendre;
pub mod spherical;

pub use legendre::*;
pub use spherical::*;
