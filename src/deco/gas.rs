//! Breathing gas mixes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pressure::{equivalent_air_depth, max_operating_depth};

/// Default pO2 limit for bottom gases (bar).
pub const DEFAULT_MAX_PO2: f64 = 1.4;

/// Accepted range for a pO2 limit (bar).
const MAX_PO2_RANGE: std::ops::RangeInclusive<f64> = 0.1..=2.0;

/// Gas mix validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GasMixError {
    #[error("invalid O2 fraction: {0} (must be between 0.0 and 1.0)")]
    InvalidOxygen(f64),
    #[error("invalid He fraction: {0} (must be between 0.0 and 1.0)")]
    InvalidHelium(f64),
    #[error("gas fractions (O2 + He) exceed 1.0")]
    FractionsExceedOne,
    #[error("invalid max pO2: {0} (must be between 0.1 and 2.0 bar)")]
    InvalidMaxPo2(f64),
}

/// Gas mix specification. Nitrogen is the remainder after O2 and He.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GasMix {
    /// Oxygen fraction (0.0-1.0)
    pub o2: f64,
    /// Helium fraction (0.0-1.0)
    #[serde(default)]
    pub he: f64,
    /// Maximum tolerated oxygen partial pressure (bar)
    #[serde(default = "default_max_po2")]
    pub max_po2: f64,
}

fn default_max_po2() -> f64 {
    DEFAULT_MAX_PO2
}

impl GasMix {
    pub const AIR: GasMix = GasMix::preset(0.21, 0.0);
    pub const EAN32: GasMix = GasMix::preset(0.32, 0.0);
    pub const EAN36: GasMix = GasMix::preset(0.36, 0.0);
    pub const TX_18_45: GasMix = GasMix::preset(0.18, 0.45);
    pub const TX_21_35: GasMix = GasMix::preset(0.21, 0.35);

    const fn preset(o2: f64, he: f64) -> Self {
        Self {
            o2,
            he,
            max_po2: DEFAULT_MAX_PO2,
        }
    }

    /// Build a validated mix.
    pub fn new(o2: f64, he: f64, max_po2: f64) -> Result<Self, GasMixError> {
        let gas = Self { o2, he, max_po2 };
        gas.validate()?;
        Ok(gas)
    }

    /// Check fraction ranges and the pO2 limit.
    pub fn validate(&self) -> Result<(), GasMixError> {
        if !(0.0..=1.0).contains(&self.o2) {
            return Err(GasMixError::InvalidOxygen(self.o2));
        }
        if !(0.0..=1.0).contains(&self.he) {
            return Err(GasMixError::InvalidHelium(self.he));
        }
        if self.o2 + self.he > 1.0 {
            return Err(GasMixError::FractionsExceedOne);
        }
        if !MAX_PO2_RANGE.contains(&self.max_po2) {
            return Err(GasMixError::InvalidMaxPo2(self.max_po2));
        }
        Ok(())
    }

    pub fn n2(&self) -> f64 {
        1.0 - self.o2 - self.he
    }

    /// Maximum operating depth at this mix's pO2 limit.
    pub fn mod_m(&self) -> Option<f64> {
        max_operating_depth(self.o2, self.max_po2)
    }

    /// Equivalent air depth. Only meaningful for helium-free mixes.
    pub fn ead_m(&self, depth_m: f64) -> Option<f64> {
        (self.he == 0.0).then(|| equivalent_air_depth(depth_m, self.o2))
    }

    /// Conventional label, e.g. `Air`, `EAN32`, `Tx21/35`.
    pub fn label(&self) -> String {
        let o2 = (self.o2 * 100.0).round() as u32;
        let he = (self.he * 100.0).round() as u32;
        match (o2, he) {
            (21, 0) => "Air".to_string(),
            (o2, 0) => format!("EAN{o2}"),
            (o2, he) => format!("Tx{o2}/{he}"),
        }
    }
}

impl Default for GasMix {
    fn default() -> Self {
        Self::AIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for gas in [
            GasMix::AIR,
            GasMix::EAN32,
            GasMix::EAN36,
            GasMix::TX_18_45,
            GasMix::TX_21_35,
        ] {
            assert!(gas.validate().is_ok(), "{} should validate", gas.label());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(GasMix::AIR.label(), "Air");
        assert_eq!(GasMix::EAN32.label(), "EAN32");
        assert_eq!(GasMix::TX_21_35.label(), "Tx21/35");
    }

    #[test]
    fn test_invalid_fractions() {
        assert_eq!(
            GasMix::new(1.5, 0.0, 1.4),
            Err(GasMixError::InvalidOxygen(1.5))
        );
        assert_eq!(
            GasMix::new(0.21, -0.1, 1.4),
            Err(GasMixError::InvalidHelium(-0.1))
        );
        assert_eq!(
            GasMix::new(0.6, 0.5, 1.4),
            Err(GasMixError::FractionsExceedOne)
        );
        assert_eq!(
            GasMix::new(0.21, 0.0, 2.5),
            Err(GasMixError::InvalidMaxPo2(2.5))
        );
    }

    #[test]
    fn test_nitrogen_remainder() {
        assert!((GasMix::AIR.n2() - 0.79).abs() < 1e-12);
        assert!((GasMix::TX_18_45.n2() - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_mod_and_ead() {
        let mod_m = GasMix::EAN32.mod_m().unwrap();
        assert!((mod_m - 33.75).abs() < 0.01);

        assert!(GasMix::EAN32.ead_m(30.0).unwrap() < 30.0);
        assert_eq!(GasMix::TX_21_35.ead_m(30.0), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let gas: GasMix = serde_json::from_str(r#"{"o2": 0.32}"#).unwrap();
        assert_eq!(gas.he, 0.0);
        assert_eq!(gas.max_po2, DEFAULT_MAX_PO2);
    }
}
