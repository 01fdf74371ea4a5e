// ABOUTME: Ration engine configuration: norm, allocation and diagnostics tunables
// ABOUTME: Process-wide instance loaded from defaults plus RATION_* environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Ration Engine Configuration
//!
//! Category-specific constants (ratio profiles, minimum roughage, intake
//! fractions) belong to the reference data. This module holds the policy
//! values that apply to every category.
//!
//! # Environment overrides
//!
//! | Variable | Field |
//! |---|---|
//! | `RATION_MILK_NEL_PER_LITER` | `norms.milk_nel_mj_per_liter` |
//! | `RATION_MIN_CLASS_WEIGHT` | `allocation.min_class_weight` |
//! | `RATION_MAX_CONCENTRATE_PCT` | `diagnostics.max_concentrate_pct` |
//! | `RATION_DM_TOLERANCE_KG` | `diagnostics.dry_matter_tolerance_kg` |
//! | `RATION_QUALITY_ROUGHAGE_NEL` | `diagnostics.quality_roughage_nel_mj` |
//! | `RATION_ROUGHAGE_SUBSTITUTION_PCT` | `diagnostics.roughage_substitution_pct` |
//! | `RATION_MAX_ROUGHAGE_CANDIDATES` | `diagnostics.max_roughage_candidates` |
//! | `RATION_SALT_G_PER_100KG` | `diagnostics.salt_g_per_100kg` |
//! | `RATION_PREMIX_G_PER_100KG` | `diagnostics.premix_g_per_100kg` |

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static RATION_CONFIG: OnceLock<RationConfig> = OnceLock::new();

/// Main ration engine configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RationConfig {
    /// Requirement lookup settings
    pub norms: NormsConfig,
    /// Proportional allocation settings
    pub allocation: AllocationConfig,
    /// Warning and tip thresholds
    pub diagnostics: DiagnosticsConfig,
}

/// Requirement lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormsConfig {
    /// Extra net energy per liter of milk for lactating categories (MJ NeL/l): 3.2
    pub milk_nel_mj_per_liter: f64,
}

/// Proportional allocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Floor applied to every per-feed weight so no feed is starved: 0.1
    pub min_class_weight: f64,
}

/// Thresholds and dosages used by the diagnostics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Concentrate (energy + protein) share above which acidosis risk is flagged (%): 60
    pub max_concentrate_pct: f64,
    /// Allowed excess of computed dry matter over the cap (kg): 0.1
    pub dry_matter_tolerance_kg: f64,
    /// Roughage NeL density considered good quality (MJ/kg): 5.0
    pub quality_roughage_nel_mj: f64,
    /// Share of low-quality roughage to substitute (%): 30
    pub roughage_substitution_pct: f64,
    /// Number of quality roughage feeds named in a tip: 3
    pub max_roughage_candidates: usize,
    /// Salt dosage per 100 kg live weight (g/day): 35
    pub salt_g_per_100kg: f64,
    /// Mineral premix dosage per 100 kg live weight (g/day): 90
    pub premix_g_per_100kg: f64,
    /// Smallest feed amount a tip suggests (kg): 0.1
    pub min_suggested_feed_kg: f64,
    /// Deficits at or below this value are treated as met
    pub deficit_epsilon: f64,
}

impl Default for NormsConfig {
    fn default() -> Self {
        Self {
            milk_nel_mj_per_liter: 3.2,
        }
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            min_class_weight: 0.1,
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_concentrate_pct: 60.0,
            dry_matter_tolerance_kg: 0.1,
            quality_roughage_nel_mj: 5.0,
            roughage_substitution_pct: 30.0,
            max_roughage_candidates: 3,
            salt_g_per_100kg: 35.0,
            premix_g_per_100kg: 90.0,
            min_suggested_feed_kg: 0.1,
            deficit_epsilon: 1e-6,
        }
    }
}

impl RationConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        RATION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load ration config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let diag = &self.diagnostics;
        let values = [
            self.norms.milk_nel_mj_per_liter,
            self.allocation.min_class_weight,
            diag.max_concentrate_pct,
            diag.dry_matter_tolerance_kg,
            diag.quality_roughage_nel_mj,
            diag.roughage_substitution_pct,
            diag.salt_g_per_100kg,
            diag.premix_g_per_100kg,
            diag.min_suggested_feed_kg,
            diag.deficit_epsilon,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "Configuration values must be finite numbers",
            ));
        }

        if !(0.0..=10.0).contains(&self.norms.milk_nel_mj_per_liter) {
            return Err(ConfigError::ValueOutOfRange(
                "Milk NeL per liter must be between 0 and 10 MJ",
            ));
        }

        if !(self.allocation.min_class_weight > 0.0 && self.allocation.min_class_weight <= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Minimum class weight must be in (0, 1]",
            ));
        }

        if !(0.0..=100.0).contains(&diag.max_concentrate_pct) {
            return Err(ConfigError::ValueOutOfRange(
                "Maximum concentrate share must be between 0 and 100%",
            ));
        }
        if !(0.0..=100.0).contains(&diag.roughage_substitution_pct) {
            return Err(ConfigError::ValueOutOfRange(
                "Roughage substitution share must be between 0 and 100%",
            ));
        }
        if diag.dry_matter_tolerance_kg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Dry matter tolerance must be a non-negative number of kg",
            ));
        }
        if diag.quality_roughage_nel_mj <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Quality roughage NeL threshold must be positive",
            ));
        }
        if diag.salt_g_per_100kg < 0.0 || diag.premix_g_per_100kg < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Mineral dosages must be non-negative",
            ));
        }
        if diag.min_suggested_feed_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Minimum suggested feed amount must be positive",
            ));
        }
        if diag.deficit_epsilon < 0.0 || diag.deficit_epsilon >= diag.min_suggested_feed_kg {
            return Err(ConfigError::InvalidRange(
                "deficit_epsilon must be >= 0 and < min_suggested_feed_kg",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        match env::var(env_var_name) {
            Ok(val) => {
                *target = val
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
                Ok(())
            }
            Err(env::VarError::NotPresent) => Ok(()),
            Err(e) => Err(ConfigError::EnvVar(e)),
        }
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "RATION_MILK_NEL_PER_LITER",
            &mut self.norms.milk_nel_mj_per_liter,
        )?;
        Self::apply_env_var(
            "RATION_MIN_CLASS_WEIGHT",
            &mut self.allocation.min_class_weight,
        )?;
        Self::apply_env_var(
            "RATION_MAX_CONCENTRATE_PCT",
            &mut self.diagnostics.max_concentrate_pct,
        )?;
        Self::apply_env_var(
            "RATION_DM_TOLERANCE_KG",
            &mut self.diagnostics.dry_matter_tolerance_kg,
        )?;
        Self::apply_env_var(
            "RATION_QUALITY_ROUGHAGE_NEL",
            &mut self.diagnostics.quality_roughage_nel_mj,
        )?;
        Self::apply_env_var(
            "RATION_ROUGHAGE_SUBSTITUTION_PCT",
            &mut self.diagnostics.roughage_substitution_pct,
        )?;
        Self::apply_env_var(
            "RATION_MAX_ROUGHAGE_CANDIDATES",
            &mut self.diagnostics.max_roughage_candidates,
        )?;
        Self::apply_env_var(
            "RATION_SALT_G_PER_100KG",
            &mut self.diagnostics.salt_g_per_100kg,
        )?;
        Self::apply_env_var(
            "RATION_PREMIX_G_PER_100KG",
            &mut self.diagnostics.premix_g_per_100kg,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RationConfig::default().validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_override_applied() {
        env::set_var("RATION_MAX_ROUGHAGE_CANDIDATES", "5");
        let config = RationConfig::default().apply_env_overrides();
        env::remove_var("RATION_MAX_ROUGHAGE_CANDIDATES");
        assert_eq!(config.map(|c| c.diagnostics.max_roughage_candidates).ok(), Some(5));
    }

    #[test]
    #[serial]
    fn test_unparsable_env_value_rejected() {
        env::set_var("RATION_SALT_G_PER_100KG", "lots");
        let result = RationConfig::default().apply_env_overrides();
        env::remove_var("RATION_SALT_G_PER_100KG");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_non_unicode_env_value_rejected() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        env::set_var("RATION_PREMIX_G_PER_100KG", OsString::from_vec(vec![0x39, 0xff]));
        let result = RationConfig::default().apply_env_overrides();
        env::remove_var("RATION_PREMIX_G_PER_100KG");
        assert!(matches!(result, Err(ConfigError::EnvVar(_))));
    }

    #[test]
    fn test_infinite_value_rejected() {
        let mut config = RationConfig::default();
        config.diagnostics.premix_g_per_100kg = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }
}
