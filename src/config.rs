//! Environment configuration.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::deco::GradientFactors;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Used when a request omits its gradient factors
    pub default_gradient_factors: GradientFactors,
    pub cache_capacity: u64,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            default_gradient_factors: GradientFactors::default(),
            cache_capacity: 1024,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let gf = defaults.default_gradient_factors;
        let default_gradient_factors = GradientFactors::new(
            parse(&lookup, "DECO_GF_LOW", gf.low)?,
            parse(&lookup, "DECO_GF_HIGH", gf.high)?,
        );
        if !default_gradient_factors.is_valid() {
            return Err(ConfigError::Invalid {
                name: "DECO_GF_LOW/DECO_GF_HIGH",
                value: format!("{:?}", default_gradient_factors),
            });
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            default_gradient_factors,
            cache_capacity: parse(&lookup, "DECO_CACHE_CAPACITY", defaults.cache_capacity)?,
            cache_ttl: Duration::from_secs(parse(
                &lookup,
                "DECO_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )?),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
