//! Degree/order index convention
//!
//! Harmonics (n, m) with |m| ≤ n are stored in blocks of 2n+1 entries,
//! stacked by increasing degree:
//! ```text
//! (0,0) | (1,-1) (1,0) (1,1) | (2,-2) ... (2,2) | ...
//! ```
//! The global flat index is n² + n + m. Walking [`harmonics`] yields the
//! same order, so the position in that walk (the local sequential index)
//! coincides with the flat index.

use crate::error::{MultipoleError, Result};

/// Global flat index n² + n + m of harmonic (n, m)
#[inline]
pub fn flat_index(n: usize, m: i32) -> usize {
    debug_assert!(m.unsigned_abs() as usize <= n, "|m| = |{}| exceeds n = {}", m, n);
    ((n * (n + 1)) as isize + m as isize) as usize
}

/// Number of harmonics up to and including degree `max_degree`, (N+1)²
#[inline]
pub fn num_harmonics(max_degree: usize) -> usize {
    (max_degree + 1) * (max_degree + 1)
}

/// Recover the maximum degree N from a row count of (N+1)²
///
/// Fails with [`MultipoleError::NotPerfectSquare`] for anything else,
/// including zero rows.
pub fn max_degree_from_rows(rows: usize) -> Result<usize> {
    let root = rows.isqrt();
    if rows == 0 || root * root != rows {
        return Err(MultipoleError::NotPerfectSquare { rows });
    }
    Ok(root - 1)
}

/// All (n, m) pairs up to `max_degree`: n ascending, then m from -n to n
pub fn harmonics(max_degree: usize) -> impl Iterator<Item = (usize, i32)> + Clone {
    (0..=max_degree).flat_map(|n| (-(n as i32)..=n as i32).map(move |m| (n, m)))
}
