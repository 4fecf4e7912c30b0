//! Decompression planning module.
//!
//! A Bühlmann ZHL-16C tissue simulation with gradient-factor ceilings and a
//! stepwise stop scheduler, plus the HTTP endpoints that expose it.

mod ceiling;
mod gas;
mod models;
mod pressure;
mod routes;
mod scheduler;
mod tissue;
pub mod validator;

pub use ceiling::{ceiling, compartment_ceiling, surface_gradient_factor, Ceiling};
pub use gas::{GasMix, GasMixError, DEFAULT_MAX_PO2};
pub use models::{PlanRequestBody, PlanResponse};
pub use pressure::{
    ambient_pressure, depth_for_pressure, equivalent_air_depth, haldane, inspired_pressure,
    m_value, max_operating_depth, schreiner, InertGas, WATER_VAPOR_PRESSURE,
};
pub use routes::router;
pub use scheduler::{
    compute_decompression_plan, plan, DecompressionPlan, DecompressionStop, PlanRequest,
    PlanRequestError, MAX_ASCENT_ITERATIONS, MAX_DEPTH_M, MAX_STOP_TIME_MIN, SAFETY_STOP,
};
pub use tissue::{
    Compartment, GradientFactors, TissueModel, HELIUM_HALF_TIME_FACTOR, NUM_COMPARTMENTS,
    SURFACE_N2_PRESSURE,
};
