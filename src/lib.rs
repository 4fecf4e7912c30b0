//! ScuPlan decompression planning.
//!
//! The `deco` module is a self-contained Bühlmann ZHL-16C planning engine;
//! the rest of the crate hosts it behind an Axum API.

use std::sync::Arc;

pub mod cache;
pub mod config;
pub mod deco;
pub mod error;

use cache::PlanCache;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: PlanCache,
    pub config: Arc<Config>,
}
