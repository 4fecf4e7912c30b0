//! Ascent ceiling from compartment loadings.
//!
//! Each compartment's tolerance coefficients are scaled by gfHigh and the
//! tolerated ambient pressure is `(P_inert - a * gf) * (b * gf)`. The most
//! restrictive compartment governs; the result is rounded up to a whole metre.

use serde::Serialize;

use super::pressure::{depth_for_pressure, m_value, SURFACE_PRESSURE};
use super::tissue::Compartment;

/// Aggregate ceiling across all compartments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ceiling {
    /// Ceiling rounded up to the next whole metre
    pub depth_m: f64,
    /// Unrounded ceiling of the governing compartment
    pub raw_depth_m: f64,
    /// Index of the governing compartment, `None` when nothing restricts ascent
    pub leading_compartment: Option<usize>,
}

/// Tolerated ceiling depth for one compartment, clamped at the surface.
pub fn compartment_ceiling(comp: &Compartment, gf_high: f64) -> f64 {
    let a = comp.a * gf_high;
    let b = comp.b * gf_high;
    let tolerated = (comp.inert_pressure() - a) * b;

    depth_for_pressure(tolerated).max(0.0)
}

/// Ceiling across `compartments`.
pub fn ceiling(compartments: &[Compartment], gf_high: f64) -> Ceiling {
    let mut raw_depth_m = 0.0_f64;
    let mut leading_compartment = None;

    for (i, comp) in compartments.iter().enumerate() {
        let depth = compartment_ceiling(comp, gf_high);
        if depth > raw_depth_m {
            raw_depth_m = depth;
            leading_compartment = Some(i);
        }
    }

    Ceiling {
        depth_m: raw_depth_m.ceil(),
        raw_depth_m,
        leading_compartment,
    }
}

/// Highest surface gradient factor (percent of the raw surface M-value
/// gradient) across `compartments`, 0 when every compartment is below
/// surface pressure.
///
/// Uses the unscaled a/b coefficients, so it reports how close a direct
/// ascent would come to the M-value independent of the configured gfHigh.
pub fn surface_gradient_factor(compartments: &[Compartment]) -> f64 {
    compartments
        .iter()
        .map(|comp| {
            let gradient = m_value(comp.a, comp.b, 0.0) - SURFACE_PRESSURE;
            (comp.inert_pressure() - SURFACE_PRESSURE) / gradient * 100.0
        })
        .fold(0.0_f64, f64::max)
}
