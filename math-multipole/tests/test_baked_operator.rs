//! Baked Operator Tests
//!
//! A baked operator replays precomputed coefficients. These tests compare it
//! against the recurrence engines it was built from, on vectors and on
//! matrices, sequentially and from several threads.

use math_audio_multipole::{
    BakedOperator, CoaxialTranslation, Coupling, GeneralTranslation, MultipoleError, OperatorConfig,
    RotationCoefficients, TranslationConfig, WaveNumber, apply_batch, bake_translations,
    flat_index, harmonics, num_harmonics,
};
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_DEGREE: usize = 7;
const DISTANCE: f64 = 1.5;
const WAVE_NUMBER: Complex64 = Complex64::new(1.3, 0.2);

fn random_vector(rng: &mut StdRng, rows: usize) -> Array1<Complex64> {
    Array1::from_iter(
        (0..rows).map(|_| Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))),
    )
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<Complex64> {
    Array2::from_shape_fn((rows, cols), |_| {
        Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    })
}

fn assert_arrays_close<'a>(
    actual: impl IntoIterator<Item = &'a Complex64>,
    expected: impl IntoIterator<Item = &'a Complex64>,
    tol: f64,
) {
    for (a, e) in actual.into_iter().zip(expected) {
        assert!((a - e).norm() <= tol * e.norm().max(1.0), "{} != {}", a, e);
    }
}

/// Degree 7, distance 1.5, lossy wavenumber: baked apply equals the
/// coefficient-by-coefficient sum from a fresh engine
#[test]
fn test_end_to_end_coaxial_scenario() {
    let mut rng = StdRng::seed_from_u64(2024);
    let input = random_vector(&mut rng, num_harmonics(MAX_DEGREE));

    for regular in [true, false] {
        let baked = CoaxialTranslation::new(DISTANCE, WAVE_NUMBER, regular).bake(MAX_DEGREE);
        assert_eq!(baked.coupling(), Coupling::Coaxial);
        assert_eq!(baked.len(), Coupling::Coaxial.num_terms(MAX_DEGREE));
        let fast = baked.apply(&input).unwrap();

        let mut reference = CoaxialTranslation::new(DISTANCE, WAVE_NUMBER, regular);
        let mut expected = Array1::<Complex64>::zeros(num_harmonics(MAX_DEGREE));
        for (n, m) in harmonics(MAX_DEGREE) {
            for l in m.unsigned_abs() as usize..=MAX_DEGREE {
                expected[flat_index(l, m)] += reference.coefficient(n, m, l) * input[flat_index(n, m)];
            }
        }

        assert_arrays_close(fast.iter(), expected.iter(), 1e-12);
    }
}

#[test]
fn test_baked_matches_engine_apply_bitwise() {
    let mut rng = StdRng::seed_from_u64(3);
    let input = random_vector(&mut rng, num_harmonics(MAX_DEGREE));

    let mut engine = CoaxialTranslation::new(DISTANCE, WAVE_NUMBER, true);
    let baked = engine.bake(MAX_DEGREE);
    assert_eq!(baked.apply(&input).unwrap(), engine.apply(&input).unwrap());

    let mut rotation = RotationCoefficients::new(0.7, 0.4, 1.1);
    let baked = rotation.bake(MAX_DEGREE);
    assert_eq!(baked.coupling(), Coupling::Rotation);
    assert_eq!(baked.apply(&input).unwrap(), rotation.apply(&input).unwrap());
}

/// Degree 7 rotation: out(n, mu) = Σ_m T(n, m, mu) in(n, m), baked or not
#[test]
fn test_rotation_apply_matches_explicit_sum() {
    let mut rng = StdRng::seed_from_u64(31);
    let input = random_vector(&mut rng, num_harmonics(MAX_DEGREE));

    let mut engine = RotationCoefficients::new(2.3, -1.4, 0.6);
    let out = engine.apply(&input).unwrap();
    let baked = engine.bake(MAX_DEGREE).apply(&input).unwrap();

    let mut reference = RotationCoefficients::new(2.3, -1.4, 0.6);
    let mut expected = Array1::<Complex64>::zeros(num_harmonics(MAX_DEGREE));
    for (n, mu) in harmonics(MAX_DEGREE) {
        let n_i = n as i32;
        for m in -n_i..=n_i {
            expected[flat_index(n, mu)] += reference.coefficient(n, m, mu) * input[flat_index(n, m)];
        }
    }

    assert_arrays_close(out.iter(), expected.iter(), 1e-12);
    assert_arrays_close(baked.iter(), expected.iter(), 1e-12);
}

#[test]
fn test_baked_operator_on_matrix() {
    let mut rng = StdRng::seed_from_u64(17);
    let rows = num_harmonics(MAX_DEGREE);
    let input = random_matrix(&mut rng, rows, 4);

    let baked = RotationCoefficients::new(1.9, -0.6, 0.2).bake(MAX_DEGREE);
    let out = baked.apply(&input).unwrap();
    assert_eq!(out.dim(), (rows, 4));

    for (j, column) in input.columns().into_iter().enumerate() {
        let single = baked.apply(&column).unwrap();
        assert_arrays_close(out.column(j).iter(), single.iter(), 1e-15);
    }
}

#[test]
fn test_baked_operator_rejects_other_degrees() {
    let baked = CoaxialTranslation::new(DISTANCE, WAVE_NUMBER, true).bake(3);
    assert_eq!(baked.num_rows(), 16);

    let input = Array1::<Complex64>::zeros(num_harmonics(MAX_DEGREE));
    assert!(matches!(
        baked.apply(&input),
        Err(MultipoleError::DegreeMismatch {
            max_degree: 3,
            expected: 16,
            got: 64
        })
    ));
}

#[test]
fn test_baked_operator_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BakedOperator>();

    let mut rng = StdRng::seed_from_u64(99);
    let baked = CoaxialTranslation::new(DISTANCE, WAVE_NUMBER, false).bake(MAX_DEGREE);
    let inputs: Vec<_> = (0..8)
        .map(|_| random_matrix(&mut rng, num_harmonics(MAX_DEGREE), 2))
        .collect();

    let sequential: Vec<_> = inputs.iter().map(|x| baked.apply(x).unwrap()).collect();

    let shared = &baked;
    let threaded: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|x| scope.spawn(move || shared.apply(x).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(threaded, sequential);

    let batched = apply_batch(&baked, &inputs).unwrap();
    assert_eq!(batched, sequential);
}

#[test]
fn test_bake_translations_from_config() {
    let configs: Vec<TranslationConfig> = serde_json::from_str(
        r#"[
            {"distance": 1.5, "wave_number": {"re": 1.3, "im": 0.2}},
            {"distance": 0.5, "wave_number": {"re": 2.0}, "regular": false}
        ]"#,
    )
    .unwrap();

    let baked = bake_translations(&configs, 4).unwrap();
    assert_eq!(baked.len(), 2);
    assert_eq!(baked[0], CoaxialTranslation::new(1.5, WAVE_NUMBER, true).bake(4));
    assert_eq!(
        baked[1],
        CoaxialTranslation::new(0.5, Complex64::new(2.0, 0.0), false).bake(4)
    );
}

#[test]
fn test_operator_config_json_round_trip() {
    let config = OperatorConfig {
        max_degree: 5,
        displacement: [0.2, -0.1, 0.7],
        wave_number: WaveNumber { re: 1.3, im: 0.2 },
        regular: true,
    };
    let text = serde_json::to_string_pretty(&config).unwrap();
    let parsed = OperatorConfig::from_json(&text).unwrap();
    assert_eq!(parsed.displacement, config.displacement);
    assert_eq!(parsed.wave_number, config.wave_number);

    let from_config = parsed.bake().unwrap();
    let direct = GeneralTranslation::new(
        config.displacement,
        config.wave_number.into(),
        config.regular,
        config.max_degree,
    );
    assert_eq!(from_config, direct);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = TranslationConfig::from_json(r#"{"distance": 1.0}"#).unwrap_err();
    assert!(err.is_config_error());

    let config = TranslationConfig {
        distance: 1.0,
        wave_number: WaveNumber {
            re: f64::NAN,
            im: 0.0,
        },
        regular: true,
    };
    assert!(matches!(
        config.build(),
        Err(MultipoleError::InvalidParameter {
            name: "wave_number.re",
            ..
        })
    ));
}
