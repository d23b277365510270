//! Parallel utilities with feature-gated implementations
//!
//! Baked operators are immutable and shared freely between threads.
//! Engines own a mutable cache, so every task builds its own.

use ndarray::Array2;
use num_complex::Complex64;

use crate::config::TranslationConfig;
use crate::error::Result;
use crate::operator::BakedOperator;

/// Parallel map over a slice
#[cfg(feature = "native")]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    data.par_iter().map(f).collect()
}

/// Sequential map (fallback when parallel is not available)
#[cfg(not(feature = "native"))]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    data.iter().map(f).collect()
}

/// Parallel map with index
#[cfg(feature = "native")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Sequential map with index (fallback)
#[cfg(not(feature = "native"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

/// Apply one baked operator to many right-hand sides
///
/// Fails with the first error in input order.
pub fn apply_batch(
    operator: &BakedOperator,
    inputs: &[Array2<Complex64>],
) -> Result<Vec<Array2<Complex64>>> {
    parallel_map(inputs, |input| operator.apply(input))
        .into_iter()
        .collect()
}

/// Bake one coaxial translation per configuration, each from its own engine
pub fn bake_translations(
    configs: &[TranslationConfig],
    max_degree: usize,
) -> Result<Vec<BakedOperator>> {
    parallel_map_indexed(configs.len(), |i| {
        let mut engine = configs[i].build()?;
        Ok(engine.bake(max_degree))
    })
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveNumber;
    use crate::index::num_harmonics;

    #[test]
    fn test_parallel_map() {
        let data = vec![1, 2, 3, 4, 5];
        let result = parallel_map(&data, |x| x * 2);
        assert_eq!(result, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_parallel_map_indexed() {
        let result = parallel_map_indexed(5, |i| i * i);
        assert_eq!(result, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_bake_translations_keeps_order() {
        let configs: Vec<_> = [0.5, 1.0, 1.5]
            .iter()
            .map(|&distance| TranslationConfig {
                distance,
                wave_number: WaveNumber { re: 1.3, im: 0.0 },
                regular: true,
            })
            .collect();

        let baked = bake_translations(&configs, 3).unwrap();
        assert_eq!(baked.len(), 3);
        for (op, config) in baked.iter().zip(&configs) {
            let expected = config.build().unwrap().bake(3);
            assert_eq!(*op, expected);
        }
    }

    #[test]
    fn test_bake_translations_rejects_invalid_config() {
        let configs = vec![TranslationConfig {
            distance: f64::NAN,
            wave_number: WaveNumber { re: 1.0, im: 0.0 },
            regular: true,
        }];
        assert!(bake_translations(&configs, 2).unwrap_err().is_config_error());
    }

    #[test]
    fn test_apply_batch_reports_shape_errors() {
        let op = TranslationConfig {
            distance: 1.0,
            wave_number: WaveNumber { re: 1.0, im: 0.0 },
            regular: true,
        }
        .build()
        .unwrap()
        .bake(2);

        let inputs = vec![
            Array2::zeros((num_harmonics(2), 2)),
            Array2::zeros((num_harmonics(3), 2)),
        ];
        assert!(apply_batch(&op, &inputs).unwrap_err().is_shape_error());
    }
}
