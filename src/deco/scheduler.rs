//! Staged decompression scheduling.
//!
//! The bottom phase is applied as a single exposure at max depth. The diver
//! then ascends in 3 m steps (0.5 min each) while the ceiling stays shallower
//! than the next step, and holds in 1 min increments at the ceiling rounded up
//! to a 3 m multiple when it does not. Total stop time is capped at
//! [`MAX_STOP_TIME_MIN`] and the loop itself at [`MAX_ASCENT_ITERATIONS`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ceiling::Ceiling;
use super::gas::{GasMix, GasMixError, DEFAULT_MAX_PO2};
use super::tissue::{GradientFactors, TissueModel};

/// Stop depth granularity and ascent step (m).
pub const STOP_INCREMENT_M: f64 = 3.0;

/// Simulated time per held stop increment (min).
pub const STOP_INTERVAL_MIN: f64 = 1.0;

/// Simulated transit time per ascent step (min).
pub const ASCENT_INTERVAL_MIN: f64 = 0.5;

/// Cap on accumulated stop time (min).
pub const MAX_STOP_TIME_MIN: f64 = 300.0;

/// Deepest depth a request may ask for (m).
pub const MAX_DEPTH_M: f64 = 11_000.0;

/// Hard cap on ascent/stop loop iterations: every ascent step from
/// [`MAX_DEPTH_M`], plus every held minute, plus one extra step per hold for a
/// stop rounded below the current depth.
pub const MAX_ASCENT_ITERATIONS: usize = (MAX_DEPTH_M / STOP_INCREMENT_M) as usize
    + 2 * (MAX_STOP_TIME_MIN / STOP_INTERVAL_MIN) as usize
    + 1;

/// Dives deeper than this get a safety stop when no staged stops are required (m).
pub const SAFETY_STOP_THRESHOLD_M: f64 = 10.0;

/// Recreational safety stop.
pub const SAFETY_STOP: DecompressionStop = DecompressionStop {
    depth_m: 5.0,
    duration_min: 3.0,
};

/// Required stop at a fixed depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecompressionStop {
    /// Stop depth in meters
    pub depth_m: f64,
    /// Stop duration in minutes
    pub duration_min: f64,
}

/// Result of one planning call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompressionPlan {
    /// Stops in the order they are reached on ascent
    pub stops: Vec<DecompressionStop>,
    /// Bottom time plus all stop time, in minutes
    pub total_runtime_min: f64,
    /// Bottom time when only the safety stop is needed, otherwise 0
    pub no_decompression_limit_min: f64,
    /// Ceiling when the simulation finished, in meters
    pub ceiling_depth_m: f64,
    /// Ceiling right after the bottom phase, with its governing compartment
    pub bottom_ceiling: Ceiling,
    /// Highest surface gradient factor after the bottom phase, in percent
    pub surface_gf_pct: f64,
    /// Whether the stop-time or iteration cap cut the schedule short
    pub truncated: bool,
}

impl DecompressionPlan {
    pub fn total_stop_time_min(&self) -> f64 {
        self.stops.iter().map(|s| s.duration_min).sum()
    }

    /// True when staged decompression (beyond the safety stop) is required.
    pub fn deco_required(&self) -> bool {
        self.no_decompression_limit_min == 0.0 && !self.stops.is_empty()
    }
}

/// Plan request validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanRequestError {
    #[error("max depth must be between 0 and 11000 meters")]
    InvalidDepth,
    #[error("bottom time must be a finite, non-negative number of minutes")]
    InvalidBottomTime,
    #[error("gradient factors must be in (0.0, 1.0] with gf_low <= gf_high")]
    InvalidGradientFactors,
    #[error(transparent)]
    Gas(#[from] GasMixError),
}

/// Inputs for one planning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub max_depth_m: f64,
    pub bottom_time_min: f64,
    pub gas: GasMix,
    pub gradient_factors: GradientFactors,
}

impl PlanRequest {
    /// Reject inputs the engine would turn into meaningless output.
    pub fn validate(&self) -> Result<(), PlanRequestError> {
        if !(0.0..=MAX_DEPTH_M).contains(&self.max_depth_m) {
            return Err(PlanRequestError::InvalidDepth);
        }
        if !self.bottom_time_min.is_finite() || self.bottom_time_min < 0.0 {
            return Err(PlanRequestError::InvalidBottomTime);
        }
        if !self.gradient_factors.is_valid() {
            return Err(PlanRequestError::InvalidGradientFactors);
        }
        self.gas.validate()?;
        Ok(())
    }
}

/// Run a full plan for `request`. Inputs are not validated here.
pub fn plan(request: &PlanRequest) -> DecompressionPlan {
    let gas = &request.gas;
    let mut model = TissueModel::new(request.gradient_factors);

    model.update(request.max_depth_m, request.bottom_time_min, gas);
    let bottom_ceiling = model.ceiling_detail();
    let surface_gf_pct = model.surface_gradient_factor();
    tracing::debug!(
        "Planning {} at {}m for {} min, ceiling after bottom {}m",
        gas.label(),
        request.max_depth_m,
        request.bottom_time_min,
        bottom_ceiling.depth_m
    );

    let (mut stops, truncated) = ascend(&mut model, request.max_depth_m, gas);

    stops.retain(|s| s.duration_min > 0.0);
    if request.max_depth_m > SAFETY_STOP_THRESHOLD_M && stops.is_empty() {
        stops.push(SAFETY_STOP);
    }

    let stop_time: f64 = stops.iter().map(|s| s.duration_min).sum();
    let no_decompression_limit_min = if !truncated && stops == [SAFETY_STOP] {
        request.bottom_time_min
    } else {
        0.0
    };

    DecompressionPlan {
        stops,
        total_runtime_min: request.bottom_time_min + stop_time,
        no_decompression_limit_min,
        ceiling_depth_m: model.ceiling(),
        bottom_ceiling,
        surface_gf_pct,
        truncated,
    }
}

/// Ascent/stop loop. Returns the accumulated stops and whether a cap was hit.
///
/// The diver keeps ascending while the ceiling is shallower than the next
/// 3 m step, off-gassing for [`ASCENT_INTERVAL_MIN`] per step, and only holds
/// once the ceiling would be crossed. A shallow bottom ceiling can therefore
/// clear in transit without any stop, and the first stop is often shallower
/// than the ceiling reported right after the bottom phase.
fn ascend(model: &mut TissueModel, start_depth_m: f64, gas: &GasMix) -> (Vec<DecompressionStop>, bool) {
    let mut stops: Vec<DecompressionStop> = Vec::new();
    let mut depth = start_depth_m;
    let mut stop_time = 0.0;

    for _ in 0..MAX_ASCENT_ITERATIONS {
        if depth.is_nan() || depth <= 0.0 {
            return (stops, false);
        }
        let ceiling = model.ceiling();

        if ceiling > 0.0 && ceiling > depth - STOP_INCREMENT_M {
            if stop_time >= MAX_STOP_TIME_MIN {
                tracing::warn!(
                    "Stop time cap of {} min reached at {}m with ceiling {}m",
                    MAX_STOP_TIME_MIN,
                    depth,
                    ceiling
                );
                return (stops, true);
            }

            let stop_depth = (ceiling / STOP_INCREMENT_M).ceil() * STOP_INCREMENT_M;
            depth = stop_depth;
            model.update(stop_depth, STOP_INTERVAL_MIN, gas);
            stop_time += STOP_INTERVAL_MIN;

            match stops.iter_mut().find(|s| s.depth_m == stop_depth) {
                Some(stop) => stop.duration_min += STOP_INTERVAL_MIN,
                None => {
                    tracing::debug!("Deco stop at {}m", stop_depth);
                    stops.push(DecompressionStop {
                        depth_m: stop_depth,
                        duration_min: STOP_INTERVAL_MIN,
                    });
                }
            }
        } else {
            depth -= STOP_INCREMENT_M;
            if depth > 0.0 {
                model.update(depth, ASCENT_INTERVAL_MIN, gas);
            }
        }
    }

    if depth > 0.0 {
        tracing::warn!(
            "Ascent loop cap of {} iterations reached at {}m",
            MAX_ASCENT_ITERATIONS,
            depth
        );
        return (stops, true);
    }
    (stops, false)
}

/// Plan a single-gas square profile.
///
/// Gas fractions are 0.0-1.0 (0.21 for air); gradient factors likewise.
pub fn compute_decompression_plan(
    max_depth_m: f64,
    bottom_time_min: f64,
    o2_fraction: f64,
    he_fraction: f64,
    gf_low: f64,
    gf_high: f64,
) -> DecompressionPlan {
    plan(&PlanRequest {
        max_depth_m,
        bottom_time_min,
        gas: GasMix {
            o2: o2_fraction,
            he: he_fraction,
            max_po2: DEFAULT_MAX_PO2,
        },
        gradient_factors: GradientFactors::new(gf_low, gf_high),
    })
}
