//! JSON configuration for multipole operators
//!
//! ```json
//! {
//!   "max_degree": 7,
//!   "displacement": [0.0, 0.5, 1.5],
//!   "wave_number": { "re": 1.3, "im": 0.2 },
//!   "regular": false
//! }
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::coaxial::CoaxialTranslation;
use crate::error::{MultipoleError, Result};
use crate::rotation::RotationCoefficients;
use crate::translation::GeneralTranslation;

/// Complex wavenumber; the imaginary part models losses in the medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveNumber {
    /// Real part
    pub re: f64,
    /// Imaginary part
    #[serde(default)]
    pub im: f64,
}

impl From<WaveNumber> for Complex64 {
    fn from(k: WaveNumber) -> Self {
        Complex64::new(k.re, k.im)
    }
}

impl From<Complex64> for WaveNumber {
    fn from(k: Complex64) -> Self {
        Self { re: k.re, im: k.im }
    }
}

impl WaveNumber {
    fn validate(&self) -> Result<()> {
        ensure_finite("wave_number.re", self.re)?;
        ensure_finite("wave_number.im", self.im)
    }
}

/// Coaxial translation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Distance along the z axis
    pub distance: f64,
    /// Wavenumber of the medium
    pub wave_number: WaveNumber,
    /// Regular (R → R) or irregular (S → R) re-expansion
    #[serde(default = "default_regular")]
    pub regular: bool,
}

fn default_regular() -> bool {
    true
}

impl TranslationConfig {
    /// Parse from JSON text and validate
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite values
    pub fn validate(&self) -> Result<()> {
        ensure_finite("distance", self.distance)?;
        self.wave_number.validate()
    }

    /// Fresh engine with an empty cache
    pub fn build(&self) -> Result<CoaxialTranslation> {
        self.validate()?;
        Ok(CoaxialTranslation::new(
            self.distance,
            self.wave_number.into(),
            self.regular,
        ))
    }
}

/// Euler angles of a frame rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Polar angle
    pub theta: f64,
    /// First azimuthal angle
    pub phi: f64,
    /// Second azimuthal angle
    #[serde(default)]
    pub chi: f64,
}

impl RotationConfig {
    /// Parse from JSON text and validate
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite angles
    pub fn validate(&self) -> Result<()> {
        ensure_finite("theta", self.theta)?;
        ensure_finite("phi", self.phi)?;
        ensure_finite("chi", self.chi)
    }

    /// Fresh engine with an empty cache
    pub fn build(&self) -> Result<RotationCoefficients> {
        self.validate()?;
        Ok(RotationCoefficients::new(self.theta, self.phi, self.chi))
    }
}

/// Baked translation along an arbitrary displacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Degree cutoff N
    pub max_degree: usize,
    /// Cartesian displacement of the expansion origin
    pub displacement: [f64; 3],
    /// Wavenumber of the medium
    pub wave_number: WaveNumber,
    /// Regular (R → R) or irregular (S → R) re-expansion
    #[serde(default = "default_regular")]
    pub regular: bool,
}

impl OperatorConfig {
    /// Parse from JSON text and validate
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite displacement components or wavenumber
    pub fn validate(&self) -> Result<()> {
        for (name, value) in ["displacement.x", "displacement.y", "displacement.z"]
            .into_iter()
            .zip(self.displacement)
        {
            ensure_finite(name, value)?;
        }
        self.wave_number.validate()
    }

    /// Bake all three stages
    pub fn bake(&self) -> Result<GeneralTranslation> {
        self.validate()?;
        Ok(GeneralTranslation::new(
            self.displacement,
            self.wave_number.into(),
            self.regular,
            self.max_degree,
        ))
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MultipoleError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_config_defaults() {
        let config =
            TranslationConfig::from_json(r#"{"distance": 1.5, "wave_number": {"re": 1.3}}"#).unwrap();
        assert!(config.regular);
        assert_eq!(config.wave_number.im, 0.0);

        let engine = config.build().unwrap();
        assert_eq!(engine.distance(), 1.5);
        assert_eq!(engine.wave_number(), Complex64::new(1.3, 0.0));
        assert!(engine.is_regular());
    }

    #[test]
    fn test_rotation_config_defaults_chi() {
        let config = RotationConfig::from_json(r#"{"theta": 0.7, "phi": 0.4}"#).unwrap();
        assert_eq!(config.build().unwrap().angles(), (0.7, 0.4, 0.0));
    }

    #[test]
    fn test_operator_config_round_trip() {
        let config = OperatorConfig {
            max_degree: 4,
            displacement: [0.1, -0.2, 0.3],
            wave_number: Complex64::new(2.0, 0.1).into(),
            regular: false,
        };
        let text = serde_json::to_string(&config).unwrap();
        let parsed = OperatorConfig::from_json(&text).unwrap();
        assert_eq!(parsed.max_degree, 4);
        assert_eq!(parsed.displacement, config.displacement);
        assert_eq!(parsed.wave_number, config.wave_number);
        assert!(!parsed.regular);

        let op = parsed.bake().unwrap();
        assert_eq!(op.max_degree(), 4);
    }

    #[test]
    fn test_malformed_json() {
        let err = RotationConfig::from_json(r#"{"theta": "up"}"#).unwrap_err();
        assert!(matches!(err, MultipoleError::Config(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let config = TranslationConfig {
            distance: f64::NAN,
            wave_number: WaveNumber { re: 1.0, im: 0.0 },
            regular: true,
        };
        assert!(matches!(
            config.build(),
            Err(MultipoleError::InvalidParameter {
                name: "distance",
                ..
            })
        ));

        let config = OperatorConfig {
            max_degree: 2,
            displacement: [0.0, f64::INFINITY, 0.0],
            wave_number: WaveNumber { re: 1.0, im: 0.0 },
            regular: true,
        };
        assert!(matches!(
            config.bake(),
            Err(MultipoleError::InvalidParameter {
                name: "displacement.y",
                ..
            })
        ));

        let rotation = RotationConfig {
            theta: 0.0,
            phi: 0.0,
            chi: f64::NEG_INFINITY,
        };
        assert!(rotation.validate().unwrap_err().is_config_error());
    }
}
