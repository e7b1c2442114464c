//! Model configuration
//!
//! `ModelConfig` is the single source of truth for a projection run. It can
//! be built from defaults, parsed from TOML, and split into the per-stage
//! parameter structs.
//!
//! ```toml
//! months = 48
//!
//! [token]
//! total_supply = 1000000000
//! initial_price = 0.08
//! schedule_policy = "strict"
//!
//! [[token.allocations]]
//! name = "seed"
//! percentage = 0.05
//! price = 0.04
//! lockup_months = 6
//! vesting_months = 18
//!
//! [network]
//! initial_users = 6000
//! user_growth_rate = 0.40
//! ```

use crate::errors::EconomicsError;
use crate::params::{
    default_allocations, Allocation, EmissionParams, GrowthParams, NetworkAssumptions,
    SchedulePolicy, ValuationParams, DEFAULT_MONTHS, DEFAULT_TOTAL_SUPPLY,
};
use crate::types::{TokenAmount, UsdAmount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Token supply, price and allocation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub total_supply: TokenAmount,
    pub initial_price: UsdAmount,
    pub schedule_policy: SchedulePolicy,
    pub allocations: Vec<Allocation>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            total_supply: Decimal::from(DEFAULT_TOTAL_SUPPLY),
            initial_price: ValuationParams::default().token_price,
            schedule_policy: SchedulePolicy::default(),
            allocations: default_allocations(),
        }
    }
}

/// Complete configuration of a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Projection horizon shared by every series
    pub months: usize,
    pub token: TokenConfig,
    pub network: NetworkAssumptions,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTHS,
            token: TokenConfig::default(),
            network: NetworkAssumptions::default(),
        }
    }
}

impl ModelConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, EconomicsError> {
        toml::from_str(content)
            .map_err(|e| EconomicsError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EconomicsError> {
        let path = path.as_ref();
        info!("Loading model configuration from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            EconomicsError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, EconomicsError> {
        toml::to_string_pretty(self)
            .map_err(|e| EconomicsError::Serialization(format!("Failed to render config: {}", e)))
    }

    pub fn emission_params(&self) -> EmissionParams {
        EmissionParams {
            total_supply: self.token.total_supply,
            months: self.months,
            allocations: self.token.allocations.clone(),
            schedule_policy: self.token.schedule_policy,
        }
    }

    pub fn growth_params(&self) -> GrowthParams {
        GrowthParams {
            months: self.months,
            assumptions: self.network.clone(),
        }
    }

    pub fn valuation_params(&self) -> ValuationParams {
        ValuationParams {
            total_supply: self.token.total_supply,
            token_price: self.token.initial_price,
        }
    }

    /// Check every stage's parameters; run once before computing.
    pub fn validate(&self) -> Result<(), EconomicsError> {
        self.emission_params().validate()?;
        self.growth_params().validate()?;
        self.valuation_params().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ModelConfig::from_toml_str("").unwrap();
        assert_eq!(config, ModelConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn partial_document_overrides_selected_fields() {
        let config = ModelConfig::from_toml_str(
            r#"
            months = 36

            [token]
            initial_price = 0.12

            [network]
            user_growth_rate = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.months, 36);
        assert_eq!(config.token.initial_price, Decimal::new(12, 2));
        assert_eq!(config.token.total_supply, Decimal::from(DEFAULT_TOTAL_SUPPLY));
        assert_eq!(config.network.user_growth_rate, Decimal::new(25, 2));
        assert_eq!(config.network.initial_users, Decimal::from(6_000));
        assert_eq!(config.token.allocations.len(), 9);
    }

    #[test]
    fn allocation_table_from_toml() {
        let config = ModelConfig::from_toml_str(
            r#"
            months = 12

            [token]
            schedule_policy = "truncate"

            [[token.allocations]]
            name = "community"
            percentage = 0.75
            vesting_months = 12

            [[token.allocations]]
            name = "sale"
            percentage = 0.25
            price = 0.5
            vesting_months = 4
            upfront_fraction = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.token.schedule_policy, SchedulePolicy::Truncate);
        assert_eq!(config.token.allocations.len(), 2);
        let sale = &config.token.allocations[1];
        assert_eq!(sale.price, Some(Decimal::new(5, 1)));
        assert_eq!(sale.lockup_months, 0);
        assert_eq!(sale.upfront_fraction, Decimal::new(25, 2));
        config.validate().unwrap();
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = ModelConfig::from_toml_str("months = \"many\"").unwrap_err();
        assert!(matches!(err, EconomicsError::Config(_)));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = ModelConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(ModelConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ModelConfig::load_from_file("/nonexistent/ink-model.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
