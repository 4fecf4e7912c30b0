//! Request and response types for the deco planning API.

use serde::{Deserialize, Serialize};

use super::gas::GasMix;
use super::scheduler::DecompressionStop;

/// Request payload for a decompression plan.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanRequestBody {
    /// Maximum depth in meters
    pub max_depth_m: f64,
    /// Bottom time in minutes
    pub bottom_time_min: f64,
    /// Bottom gas
    #[serde(default)]
    pub gas: GasMix,
    /// Gradient factor low (0.0-1.0), server default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gf_low: Option<f64>,
    /// Gradient factor high (0.0-1.0), server default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gf_high: Option<f64>,
}

/// Response payload for a decompression plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    /// Tool identifier
    pub tool: &'static str,
    /// Tool version
    pub tool_version: &'static str,
    /// Decompression model used
    pub model: &'static str,
    /// Gradient factor low used
    pub gf_low: f64,
    /// Gradient factor high used
    pub gf_high: f64,

    /// Gas label, e.g. "EAN32"
    pub gas: String,
    /// Maximum operating depth of the gas in meters
    pub mod_m: Option<f64>,
    /// Equivalent air depth at max depth (helium-free mixes only)
    pub ead_m: Option<f64>,

    /// Decompression stops, deepest first
    pub stops: Vec<DecompressionStop>,
    /// Total runtime in minutes
    pub total_runtime_min: f64,
    /// No-deco limit in minutes (0 if deco required)
    pub no_decompression_limit_min: f64,
    /// Whether staged decompression is required
    pub deco_required: bool,
    /// Ceiling in meters at the end of the schedule
    pub ceiling_depth_m: f64,
    /// Ceiling in meters right after the bottom phase
    pub bottom_ceiling_m: f64,
    /// Governing compartment (0-15) after the bottom phase, if any restricts ascent
    pub leading_compartment: Option<usize>,
    /// Highest surface gradient factor after the bottom phase, in percent
    pub surface_gf_pct: f64,
    /// Whether the stop-time cap cut the schedule short
    pub truncated: bool,

    /// Maximum depth in meters
    pub max_depth_m: f64,
    /// SHA256 hash of input
    pub input_hash: String,

    /// Warning messages
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
