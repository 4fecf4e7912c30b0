//! Bühlmann ZHL-16C tissue compartments and their loading state.

use serde::{Deserialize, Serialize};

use super::ceiling::{self, Ceiling};
use super::gas::GasMix;
use super::pressure::{ambient_pressure, haldane, inspired_pressure, schreiner, InertGas};

/// Number of tissue compartments.
pub const NUM_COMPARTMENTS: usize = 16;

/// Surface-equilibrium nitrogen loading (bar).
pub const SURFACE_N2_PRESSURE: f64 = 0.79;

/// Helium half-time as a fraction of the compartment's nitrogen half-time.
///
/// Approximates helium's faster kinetics instead of using the separate
/// ZHL-16C helium table.
pub const HELIUM_HALF_TIME_FACTOR: f64 = 0.4;

/// Static compartment coefficients: N2 half-time (min), a (bar), b.
const ZHL16C: [(f64, f64, f64); NUM_COMPARTMENTS] = [
    (5.0, 1.1696, 0.5578),
    (8.0, 1.0000, 0.6514),
    (12.5, 0.8618, 0.7222),
    (18.5, 0.7562, 0.7825),
    (27.0, 0.6667, 0.8126),
    (38.3, 0.5933, 0.8434),
    (54.3, 0.5282, 0.8693),
    (77.0, 0.4701, 0.8910),
    (109.0, 0.4187, 0.9092),
    (146.0, 0.3798, 0.9222),
    (187.0, 0.3497, 0.9319),
    (239.0, 0.3223, 0.9403),
    (305.0, 0.2971, 0.9477),
    (390.0, 0.2737, 0.9544),
    (498.0, 0.2523, 0.9602),
    (635.0, 0.2327, 0.9653),
];

/// Gradient factor pair (fractions, 0.0-1.0).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GradientFactors {
    /// Reserved for deepest-stop placement; the scheduler does not read it.
    pub low: f64,
    /// Applied to the tolerance coefficients by the ceiling calculation.
    pub high: f64,
}

impl GradientFactors {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Both in (0.0, 1.0] with low <= high.
    pub fn is_valid(&self) -> bool {
        self.low > 0.0 && self.high <= 1.0 && self.low <= self.high
    }
}

impl Default for GradientFactors {
    fn default() -> Self {
        Self::new(0.30, 0.85)
    }
}

/// A single tissue compartment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compartment {
    /// Nitrogen half-time in minutes
    pub half_time: f64,
    /// Tolerance coefficient a (bar)
    pub a: f64,
    /// Tolerance coefficient b
    pub b: f64,
    /// Current nitrogen loading (bar)
    pub n2: f64,
    /// Current helium loading (bar)
    pub he: f64,
}

impl Compartment {
    fn at_surface((half_time, a, b): (f64, f64, f64)) -> Self {
        Self {
            half_time,
            a,
            b,
            n2: SURFACE_N2_PRESSURE,
            he: 0.0,
        }
    }

    pub fn he_half_time(&self) -> f64 {
        self.half_time * HELIUM_HALF_TIME_FACTOR
    }

    /// Combined inert gas loading.
    pub fn inert_pressure(&self) -> f64 {
        self.n2 + self.he
    }
}

/// Sixteen-compartment loading state for one planning call.
#[derive(Debug, Clone)]
pub struct TissueModel {
    compartments: [Compartment; NUM_COMPARTMENTS],
    gradient_factors: GradientFactors,
}

impl Default for TissueModel {
    fn default() -> Self {
        Self::new(GradientFactors::default())
    }
}

impl TissueModel {
    /// Air-equilibrated model at the surface.
    pub fn new(gradient_factors: GradientFactors) -> Self {
        Self {
            compartments: ZHL16C.map(Compartment::at_surface),
            gradient_factors,
        }
    }

    pub fn compartments(&self) -> &[Compartment; NUM_COMPARTMENTS] {
        &self.compartments
    }

    pub fn gradient_factors(&self) -> GradientFactors {
        self.gradient_factors
    }

    /// Expose every compartment to `gas` at a constant depth for `minutes`.
    pub fn update(&mut self, depth_m: f64, minutes: f64, gas: &GasMix) {
        let ambient = ambient_pressure(depth_m);
        let inspired_n2 = inspired_pressure(ambient, gas.o2, gas.he, InertGas::Nitrogen);
        let inspired_he = inspired_pressure(ambient, gas.o2, gas.he, InertGas::Helium);

        for comp in &mut self.compartments {
            comp.n2 = haldane(comp.n2, inspired_n2, comp.half_time, minutes);
            comp.he = haldane(comp.he, inspired_he, comp.he_half_time(), minutes);
        }
    }

    /// Expose every compartment to `gas` during a linear depth change.
    pub fn update_travel(&mut self, start_depth_m: f64, end_depth_m: f64, minutes: f64, gas: &GasMix) {
        let start = ambient_pressure(start_depth_m);
        let end = ambient_pressure(end_depth_m);
        let n2 = (
            inspired_pressure(start, gas.o2, gas.he, InertGas::Nitrogen),
            inspired_pressure(end, gas.o2, gas.he, InertGas::Nitrogen),
        );
        let he = (
            inspired_pressure(start, gas.o2, gas.he, InertGas::Helium),
            inspired_pressure(end, gas.o2, gas.he, InertGas::Helium),
        );

        for comp in &mut self.compartments {
            comp.n2 = schreiner(comp.n2, n2.0, n2.1, comp.half_time, minutes);
            comp.he = schreiner(comp.he, he.0, he.1, comp.he_half_time(), minutes);
        }
    }

    /// Current ceiling in whole metres.
    pub fn ceiling(&self) -> f64 {
        self.ceiling_detail().depth_m
    }

    /// Current ceiling with the governing compartment.
    pub fn ceiling_detail(&self) -> Ceiling {
        ceiling::ceiling(&self.compartments, self.gradient_factors.high)
    }

    /// Highest surface gradient factor in percent.
    pub fn surface_gradient_factor(&self) -> f64 {
        ceiling::surface_gradient_factor(&self.compartments)
    }
}
