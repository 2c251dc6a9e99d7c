//! Run configuration.
//!
//! Defaults reproduce the reference golden set: 200 patterns, weights drawn
//! from `1..=7`, seed 1234, the leaf-first tie-break policy. Every value can
//! be overridden from the environment (see [`GeneratorConfig::from_env`] and
//! [`HarnessConfig::from_env`]).

use std::{env, str::FromStr};

use crate::{
    error::{GoldenError, Result},
    policy::PolicyKind,
};

pub const ENV_PATTERNS: &str = "HUFFMAN_GOLDEN_PATTERNS";
pub const ENV_WEIGHT_MIN: &str = "HUFFMAN_GOLDEN_WEIGHT_MIN";
pub const ENV_WEIGHT_MAX: &str = "HUFFMAN_GOLDEN_WEIGHT_MAX";
pub const ENV_SEED: &str = "HUFFMAN_GOLDEN_SEED";
pub const ENV_POLICY: &str = "HUFFMAN_GOLDEN_POLICY";
pub const ENV_PARALLEL: &str = "HUFFMAN_GOLDEN_PARALLEL";

/// Controls seeded pattern generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub patterns: usize,
    pub weight_min: u32,
    pub weight_max: u32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            patterns: 200,
            weight_min: 1,
            weight_max: 7,
            seed: 1234,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.weight_min > self.weight_max {
            return Err(GoldenError::InvalidInput(format!(
                "weight range {}..={} is empty",
                self.weight_min, self.weight_max
            )));
        }
        Ok(())
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`GeneratorConfig::from_env`] but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            patterns: parse_or(&lookup, ENV_PATTERNS, defaults.patterns)?,
            weight_min: parse_or(&lookup, ENV_WEIGHT_MIN, defaults.weight_min)?,
            weight_max: parse_or(&lookup, ENV_WEIGHT_MAX, defaults.weight_max)?,
            seed: parse_or(&lookup, ENV_SEED, defaults.seed)?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Controls how a batch is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    pub policy: PolicyKind,
    /// Solve patterns on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            policy: parse_or(&lookup, ENV_POLICY, defaults.policy)?,
            parallel: match lookup(ENV_PARALLEL) {
                Some(value) => parse_flag(ENV_PARALLEL, &value)?,
                None => defaults.parallel,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| {
            GoldenError::InvalidInput(format!("{key}={value:?} could not be parsed"))
        }),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(GoldenError::InvalidInput(format!(
            "{key}={value:?} is not a boolean"
        ))),
    }
}
