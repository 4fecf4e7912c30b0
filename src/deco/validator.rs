//! Request validation and response assembly for the planning API.

use sha2::{Digest, Sha256};

use super::models::{PlanRequestBody, PlanResponse};
use super::scheduler::{self, PlanRequest, PlanRequestError, MAX_STOP_TIME_MIN};
use super::tissue::GradientFactors;

pub const TOOL: &str = "scuplan-deco";
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MODEL: &str = "Bühlmann ZHL-16C";

/// Compute SHA256 hash of input string.
fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex::encode(digest))
}

/// A request with defaults applied and inputs checked.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub request: PlanRequest,
    pub input_hash: String,
}

/// Apply default gradient factors and validate the request.
///
/// The input hash covers the resolved request, so a request that omits the
/// gradient factors hashes the same as one that spells out the defaults.
pub fn validate(
    body: &PlanRequestBody,
    defaults: GradientFactors,
) -> Result<ValidatedRequest, PlanRequestError> {
    let gradient_factors = GradientFactors::new(
        body.gf_low.unwrap_or(defaults.low),
        body.gf_high.unwrap_or(defaults.high),
    );
    let request = PlanRequest {
        max_depth_m: body.max_depth_m,
        bottom_time_min: body.bottom_time_min,
        gas: body.gas,
        gradient_factors,
    };
    request.validate()?;

    let resolved = PlanRequestBody {
        gf_low: Some(gradient_factors.low),
        gf_high: Some(gradient_factors.high),
        ..body.clone()
    };

    let input_json = serde_json::to_string(&resolved).unwrap_or_default();

    Ok(ValidatedRequest {
        request,
        input_hash: sha256_hex(&input_json),
    })
}

/// Run the planner and build the response payload.
pub fn plan(validated: &ValidatedRequest) -> PlanResponse {
    let request = &validated.request;
    let plan = scheduler::plan(request);
    let gas = request.gas;

    let mut warnings = Vec::new();
    if plan.truncated {
        warnings.push(format!(
            "schedule hit the {MAX_STOP_TIME_MIN} min stop-time cap and is incomplete"
        ));
    }
    let mod_m = gas.mod_m();
    if let Some(limit) = mod_m {
        if request.max_depth_m > limit {
            warnings.push(format!(
                "max depth {}m exceeds the {:.1}m MOD of {} at pO2 {}",
                request.max_depth_m,
                limit,
                gas.label(),
                gas.max_po2
            ));
        }
    }

    PlanResponse {
        tool: TOOL,
        tool_version: TOOL_VERSION,
        model: MODEL,
        gf_low: request.gradient_factors.low,
        gf_high: request.gradient_factors.high,
        gas: gas.label(),
        mod_m,
        ead_m: gas.ead_m(request.max_depth_m),
        deco_required: plan.deco_required(),
        stops: plan.stops,
        total_runtime_min: plan.total_runtime_min,
        no_decompression_limit_min: plan.no_decompression_limit_min,
        ceiling_depth_m: plan.ceiling_depth_m,
        bottom_ceiling_m: plan.bottom_ceiling.depth_m,
        leading_compartment: plan.bottom_ceiling.leading_compartment,
        surface_gf_pct: plan.surface_gf_pct,
        truncated: plan.truncated,
        max_depth_m: request.max_depth_m,
        input_hash: validated.input_hash.clone(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deco::gas::{GasMix, GasMixError};

    fn body(depth: f64, minutes: f64, gas: GasMix) -> PlanRequestBody {
        PlanRequestBody {
            max_depth_m: depth,
            bottom_time_min: minutes,
            gas,
            gf_low: None,
            gf_high: None,
        }
    }

    #[test]
    fn test_no_deco_dive() {
        let validated = validate(&body(30.0, 20.0, GasMix::AIR), GradientFactors::default()).unwrap();
        let result = plan(&validated);

        assert!(!result.deco_required);
        assert_eq!(result.no_decompression_limit_min, 20.0);
        assert_eq!(result.max_depth_m, 30.0);
        assert_eq!(result.total_runtime_min, 23.0);
        assert_eq!(result.gf_low, 0.30);
        assert_eq!(result.gf_high, 0.85);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_deco_dive() {
        let validated = validate(&body(40.0, 40.0, GasMix::AIR), GradientFactors::default()).unwrap();
        let result = plan(&validated);

        assert!(result.deco_required);
        assert_eq!(result.no_decompression_limit_min, 0.0);
        assert!(!result.stops.is_empty());
        assert!(result.bottom_ceiling_m > 0.0);
        assert!(result.leading_compartment.is_some_and(|i| i < 16));
        assert!(result.surface_gf_pct > 100.0);
    }

    #[test]
    fn test_depth_beyond_limit() {
        let result = validate(&body(1e17, 30.0, GasMix::AIR), GradientFactors::default());
        assert!(matches!(result, Err(PlanRequestError::InvalidDepth)));
    }

    #[test]
    fn test_invalid_gas_fractions() {
        let result = validate(
            &body(18.0, 10.0, GasMix { o2: 1.5, he: 0.0, max_po2: 1.4 }),
            GradientFactors::default(),
        );
        assert!(matches!(
            result,
            Err(PlanRequestError::Gas(GasMixError::InvalidOxygen(_)))
        ));
    }

    #[test]
    fn test_negative_depth() {
        let result = validate(&body(-5.0, 10.0, GasMix::AIR), GradientFactors::default());
        assert!(matches!(result, Err(PlanRequestError::InvalidDepth)));
    }

    #[test]
    fn test_mod_warning() {
        let validated = validate(&body(40.0, 10.0, GasMix::EAN32), GradientFactors::default()).unwrap();
        let result = plan(&validated);

        assert_eq!(result.gas, "EAN32");
        assert!(result.warnings.iter().any(|w| w.contains("MOD")));
        assert!(result.ead_m.unwrap() < 40.0);
    }

    #[test]
    fn test_truncation_warning() {
        let validated = validate(&body(100.0, 600.0, GasMix::AIR), GradientFactors::default()).unwrap();
        let result = plan(&validated);

        assert!(result.truncated);
        assert!(result.warnings.iter().any(|w| w.contains("cap")));
    }

    #[test]
    fn test_input_hash() {
        let defaults = GradientFactors::default();
        let implicit = validate(&body(18.0, 10.0, GasMix::AIR), defaults).unwrap();
        let explicit = validate(
            &PlanRequestBody {
                gf_low: Some(0.30),
                gf_high: Some(0.85),
                ..body(18.0, 10.0, GasMix::AIR)
            },
            defaults,
        )
        .unwrap();
        let other = validate(&body(18.0, 11.0, GasMix::AIR), defaults).unwrap();

        assert!(implicit.input_hash.starts_with("sha256:"));
        assert_eq!(implicit.input_hash.len(), 7 + 64); // "sha256:" + 64 hex chars
        assert_eq!(implicit.input_hash, explicit.input_hash);
        assert_ne!(implicit.input_hash, other.input_hash);
    }
}
