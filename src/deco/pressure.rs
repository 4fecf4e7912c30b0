//! Pressure math shared by the tissue model and the ceiling calculation.
//!
//! Depths are metres of sea water, pressures are bar, times are minutes.

/// Surface pressure at sea level (bar).
pub const SURFACE_PRESSURE: f64 = 1.0;

/// Water vapour pressure in the lungs (bar).
pub const WATER_VAPOR_PRESSURE: f64 = 0.0627;

/// Metres of sea water per bar.
pub const METERS_PER_BAR: f64 = 10.0;

/// Nitrogen fraction of air, the reference for equivalent air depth.
pub const AIR_N2_FRACTION: f64 = 0.79;

/// Inert gas selector for inspired-pressure calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertGas {
    Nitrogen,
    Helium,
}

/// Ambient pressure at the given depth.
pub fn ambient_pressure(depth_m: f64) -> f64 {
    SURFACE_PRESSURE + depth_m / METERS_PER_BAR
}

/// Depth at which the given ambient pressure is reached. Inverse of [`ambient_pressure`].
pub fn depth_for_pressure(pressure: f64) -> f64 {
    (pressure - SURFACE_PRESSURE) * METERS_PER_BAR
}

/// Inspired partial pressure of `gas` after water-vapour dilution.
///
/// Fractions are not re-validated here; an invalid mix yields a meaningless
/// (but finite) pressure.
pub fn inspired_pressure(ambient: f64, o2_fraction: f64, he_fraction: f64, gas: InertGas) -> f64 {
    let alveolar = ambient - WATER_VAPOR_PRESSURE;
    match gas {
        InertGas::Nitrogen => alveolar * (1.0 - o2_fraction - he_fraction),
        InertGas::Helium => alveolar * he_fraction,
    }
}

/// Haldane loading for a constant inspired pressure.
pub fn haldane(initial: f64, inspired: f64, half_time: f64, minutes: f64) -> f64 {
    let k = std::f64::consts::LN_2 / half_time;
    initial + (inspired - initial) * (1.0 - (-k * minutes).exp())
}

/// Schreiner loading for an inspired pressure changing linearly from
/// `inspired_start` to `inspired_end` over `minutes`.
///
/// A zero-length interval leaves the loading unchanged.
pub fn schreiner(
    initial: f64,
    inspired_start: f64,
    inspired_end: f64,
    half_time: f64,
    minutes: f64,
) -> f64 {
    if minutes <= 0.0 {
        return initial;
    }
    let k = std::f64::consts::LN_2 / half_time;
    let rate = (inspired_end - inspired_start) / minutes;
    let decay = (-k * minutes).exp();

    initial * decay + (inspired_start - initial - rate / k) * (1.0 - decay) + rate * minutes / k
}

/// Raw M-value (maximum tolerated tissue pressure) at `depth_m`.
pub fn m_value(a: f64, b: f64, depth_m: f64) -> f64 {
    a + ambient_pressure(depth_m) / b
}

/// Maximum operating depth for an O2 fraction and pO2 limit.
///
/// Returns `None` for a mix without oxygen.
pub fn max_operating_depth(o2_fraction: f64, max_po2: f64) -> Option<f64> {
    if o2_fraction <= 0.0 {
        return None;
    }
    Some(depth_for_pressure(max_po2 / o2_fraction))
}

/// Equivalent air depth for a nitrox mix at `depth_m`.
pub fn equivalent_air_depth(depth_m: f64, o2_fraction: f64) -> f64 {
    (depth_m + METERS_PER_BAR) * (1.0 - o2_fraction) / AIR_N2_FRACTION - METERS_PER_BAR
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_ambient_pressure() {
        assert_eq!(ambient_pressure(0.0), 1.0);
        assert!((ambient_pressure(30.0) - 4.0).abs() < EPS);
        assert!(ambient_pressure(12.0) < ambient_pressure(12.5));
        assert!((depth_for_pressure(ambient_pressure(37.0)) - 37.0).abs() < EPS);
    }

    #[test]
    fn test_inspired_pressure_air() {
        let n2 = inspired_pressure(1.0, 0.21, 0.0, InertGas::Nitrogen);
        assert!((n2 - (1.0 - 0.0627) * 0.79).abs() < EPS);

        let he = inspired_pressure(4.0, 0.21, 0.0, InertGas::Helium);
        assert_eq!(he, 0.0);
    }

    #[test]
    fn test_inspired_pressure_trimix() {
        let ambient = ambient_pressure(50.0);
        let n2 = inspired_pressure(ambient, 0.21, 0.35, InertGas::Nitrogen);
        let he = inspired_pressure(ambient, 0.21, 0.35, InertGas::Helium);

        assert!((n2 - (6.0 - 0.0627) * 0.44).abs() < EPS);
        assert!((he - (6.0 - 0.0627) * 0.35).abs() < EPS);
    }

    #[test]
    fn test_haldane_half_time() {
        // One half-time closes half the gap.
        let p = haldane(0.79, 3.0, 5.0, 5.0);
        assert!((p - (0.79 + (3.0 - 0.79) / 2.0)).abs() < EPS);

        // Off-gassing moves towards the lower inspired pressure.
        assert!(haldane(3.0, 0.74, 5.0, 1.0) < 3.0);
        assert_eq!(haldane(1.2, 3.0, 5.0, 0.0), 1.2);
    }

    #[test]
    fn test_schreiner_constant_matches_haldane() {
        let h = haldane(0.79, 2.5, 12.5, 7.0);
        let s = schreiner(0.79, 2.5, 2.5, 12.5, 7.0);
        assert!((h - s).abs() < 1e-12);
    }

    #[test]
    fn test_schreiner_descent_between_endpoints() {
        let start = inspired_pressure(1.0, 0.21, 0.0, InertGas::Nitrogen);
        let end = inspired_pressure(ambient_pressure(40.0), 0.21, 0.0, InertGas::Nitrogen);

        let ramped = schreiner(0.79, start, end, 5.0, 2.0);
        let at_bottom = haldane(0.79, end, 5.0, 2.0);

        assert!(ramped > 0.79);
        assert!(ramped < at_bottom);
        assert_eq!(schreiner(0.79, start, end, 5.0, 0.0), 0.79);
    }

    #[test]
    fn test_m_value() {
        let m = m_value(1.1696, 0.5578, 0.0);
        assert!((m - (1.1696 + 1.0 / 0.5578)).abs() < EPS);
        assert!(m_value(1.1696, 0.5578, 10.0) > m);
    }

    #[test]
    fn test_max_operating_depth() {
        let air = max_operating_depth(0.21, 1.4).unwrap();
        assert!((air - 56.666_666).abs() < 0.01);

        let ean32 = max_operating_depth(0.32, 1.4).unwrap();
        assert!((ean32 - 33.75).abs() < 0.01);

        let oxygen = max_operating_depth(1.0, 1.6).unwrap();
        assert!((oxygen - 6.0).abs() < 0.01);

        assert_eq!(max_operating_depth(0.0, 1.4), None);
    }

    #[test]
    fn test_equivalent_air_depth() {
        let ead = equivalent_air_depth(30.0, 0.32);
        assert!((ead - 24.43).abs() < 0.01);

        let ead_air = equivalent_air_depth(30.0, 0.21);
        assert!((ead_air - 30.0).abs() < EPS);
    }
}
