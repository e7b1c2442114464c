//! Model parameters and validation
//!
//! Each computation stage takes its own parameter struct. `Default` impls
//! reproduce the INK launch model; `validate` runs once before any
//! computation and rejects inputs that would otherwise drift silently into
//! the output.

use crate::errors::EconomicsError;
use crate::types::{TokenAmount, UsdAmount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default total token supply (1 billion INK)
pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000;

/// Default projection horizon in months
pub const DEFAULT_MONTHS: usize = 48;

/// Longest accepted horizon (100 years)
pub const MAX_MONTHS: usize = 1_200;

/// Slack allowed when checking that allocation percentages sum to 1 (1e-9).
pub fn allocation_sum_tolerance() -> Decimal {
    Decimal::new(1, 9)
}

/// What to do when a category's lockup + vesting runs past the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePolicy {
    /// Reject the configuration
    #[default]
    Strict,
    /// Keep the first `months` entries and log the dropped tokens
    Truncate,
}

/// One row of the token allocation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    /// Share of total supply, 0..=1
    pub percentage: Decimal,
    /// Sale price in USD for priced rounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<UsdAmount>,
    #[serde(default)]
    pub lockup_months: usize,
    #[serde(default)]
    pub vesting_months: usize,
    /// Share released as a lump in the first month after lockup
    #[serde(default)]
    pub upfront_fraction: Decimal,
}

impl Allocation {
    pub fn new(name: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            name: name.into(),
            percentage,
            price: None,
            lockup_months: 0,
            vesting_months: 0,
            upfront_fraction: Decimal::ZERO,
        }
    }

    pub fn with_price(mut self, price: UsdAmount) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_lockup(mut self, months: usize) -> Self {
        self.lockup_months = months;
        self
    }

    pub fn with_vesting(mut self, months: usize) -> Self {
        self.vesting_months = months;
        self
    }

    pub fn with_upfront(mut self, fraction: Decimal) -> Self {
        self.upfront_fraction = fraction;
        self
    }

    /// Tokens assigned to this category
    pub fn tokens(&self, total_supply: TokenAmount) -> TokenAmount {
        total_supply * self.percentage
    }

    /// Months from launch until the last release (a zero vesting period
    /// still releases once).
    pub fn schedule_months(&self) -> usize {
        self.lockup_months.saturating_add(self.vesting_months.max(1))
    }

    fn validate(&self) -> Result<(), EconomicsError> {
        let param = |field: &str| format!("allocations.{}.{}", self.name, field);

        if self.name.trim().is_empty() {
            return Err(EconomicsError::invalid(
                "allocations.name",
                "\"\"",
                "Category name must not be empty",
            ));
        }
        if self.percentage < Decimal::ZERO || self.percentage > Decimal::ONE {
            return Err(EconomicsError::invalid(
                param("percentage"),
                self.percentage,
                "Must be between 0 and 1",
            ));
        }
        if let Some(price) = self.price {
            if price < Decimal::ZERO {
                return Err(EconomicsError::invalid(
                    param("price"),
                    price,
                    "Must not be negative",
                ));
            }
        }
        if self.upfront_fraction < Decimal::ZERO || self.upfront_fraction > Decimal::ONE {
            return Err(EconomicsError::invalid(
                param("upfront_fraction"),
                self.upfront_fraction,
                "Must be between 0 and 1",
            ));
        }
        if self.upfront_fraction > Decimal::ZERO && self.vesting_months < 2 {
            return Err(EconomicsError::invalid(
                param("vesting_months"),
                self.vesting_months,
                "Upfront releases need at least 2 vesting months",
            ));
        }
        Ok(())
    }
}

/// The INK launch allocation table.
pub fn default_allocations() -> Vec<Allocation> {
    let pct = |hundredths: i64| Decimal::new(hundredths, 2);
    vec![
        Allocation::new("seed", pct(5))
            .with_price(pct(4))
            .with_lockup(6)
            .with_vesting(18),
        Allocation::new("strategic", pct(10))
            .with_price(pct(6))
            .with_lockup(3)
            .with_vesting(15),
        Allocation::new("public", pct(14))
            .with_price(pct(7))
            .with_vesting(12),
        Allocation::new("ido", pct(6))
            .with_price(pct(8))
            .with_vesting(3)
            .with_upfront(Decimal::new(5, 1)),
        Allocation::new("network_rewards", pct(20)).with_vesting(48),
        Allocation::new("developer_incentives", pct(10)).with_vesting(36),
        Allocation::new("team_advisors", pct(20))
            .with_lockup(12)
            .with_vesting(36),
        Allocation::new("operations", pct(10)).with_vesting(48),
        Allocation::new("reserve", pct(5)).with_lockup(24),
    ]
}

/// Inputs of the emission schedule builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionParams {
    pub total_supply: TokenAmount,
    pub months: usize,
    pub allocations: Vec<Allocation>,
    pub schedule_policy: SchedulePolicy,
}

impl Default for EmissionParams {
    fn default() -> Self {
        Self {
            total_supply: Decimal::from(DEFAULT_TOTAL_SUPPLY),
            months: DEFAULT_MONTHS,
            allocations: default_allocations(),
            schedule_policy: SchedulePolicy::Strict,
        }
    }
}

impl EmissionParams {
    pub fn validate(&self) -> Result<(), EconomicsError> {
        validate_supply(self.total_supply)?;
        validate_months(self.months)?;

        if self.allocations.is_empty() {
            return Err(EconomicsError::invalid(
                "allocations",
                "[]",
                "At least one allocation category is required",
            ));
        }

        let mut seen = HashSet::new();
        for allocation in &self.allocations {
            allocation.validate()?;
            if !seen.insert(allocation.name.as_str()) {
                return Err(EconomicsError::DuplicateCategory(allocation.name.clone()));
            }
            if self.schedule_policy == SchedulePolicy::Strict
                && allocation.schedule_months() > self.months
            {
                return Err(EconomicsError::ScheduleExceedsHorizon {
                    category: allocation.name.clone(),
                    required: allocation.schedule_months(),
                    horizon: self.months,
                });
            }
        }

        let total: Decimal = self.allocations.iter().map(|a| a.percentage).sum();
        if (total - Decimal::ONE).abs() > allocation_sum_tolerance() {
            return Err(EconomicsError::AllocationSumMismatch { total });
        }

        Ok(())
    }
}

/// Growth, cost and revenue assumptions of the network projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkAssumptions {
    pub initial_users: Decimal,
    pub initial_models: Decimal,
    /// Monthly compound growth of active users (0.40 = +40%)
    pub user_growth_rate: Decimal,
    /// Monthly compound growth of models processed
    pub model_growth_rate: Decimal,
    /// Traditional compute cost per model, USD
    pub compute_cost_per_model: UsdAmount,
    /// Share of the traditional cost saved on the network
    pub compute_cost_savings: Decimal,
    /// Platform fee on network compute spend
    pub take_rate: Decimal,
}

impl Default for NetworkAssumptions {
    fn default() -> Self {
        Self {
            initial_users: Decimal::from(6_000),
            initial_models: Decimal::from(270_000),
            user_growth_rate: Decimal::new(40, 2),
            model_growth_rate: Decimal::new(35, 2),
            compute_cost_per_model: Decimal::from(5),
            compute_cost_savings: Decimal::new(90, 2),
            take_rate: Decimal::new(20, 2),
        }
    }
}

impl NetworkAssumptions {
    pub fn validate(&self) -> Result<(), EconomicsError> {
        let non_negative = [
            ("network.initial_users", self.initial_users),
            ("network.initial_models", self.initial_models),
            ("network.user_growth_rate", self.user_growth_rate),
            ("network.model_growth_rate", self.model_growth_rate),
            ("network.compute_cost_per_model", self.compute_cost_per_model),
        ];
        for (param, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(EconomicsError::invalid(param, value, "Must not be negative"));
            }
        }

        let fractions = [
            ("network.compute_cost_savings", self.compute_cost_savings),
            ("network.take_rate", self.take_rate),
        ];
        for (param, value) in fractions {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EconomicsError::invalid(param, value, "Must be between 0 and 1"));
            }
        }

        Ok(())
    }
}

/// Inputs of the network growth projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    pub months: usize,
    pub assumptions: NetworkAssumptions,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTHS,
            assumptions: NetworkAssumptions::default(),
        }
    }
}

impl GrowthParams {
    pub fn new(months: usize, initial_users: Decimal, initial_models: Decimal) -> Self {
        Self {
            months,
            assumptions: NetworkAssumptions {
                initial_users,
                initial_models,
                ..NetworkAssumptions::default()
            },
        }
    }

    pub fn validate(&self) -> Result<(), EconomicsError> {
        validate_months(self.months)?;
        self.assumptions.validate()
    }
}

/// Inputs of the metrics combiner. The token price is flat across the
/// horizon; no market dynamics are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationParams {
    pub total_supply: TokenAmount,
    pub token_price: UsdAmount,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            total_supply: Decimal::from(DEFAULT_TOTAL_SUPPLY),
            token_price: Decimal::new(8, 2),
        }
    }
}

impl ValuationParams {
    pub fn validate(&self) -> Result<(), EconomicsError> {
        validate_supply(self.total_supply)?;
        if self.token_price < Decimal::ZERO {
            return Err(EconomicsError::invalid(
                "token.initial_price",
                self.token_price,
                "Must not be negative",
            ));
        }
        Ok(())
    }
}

fn validate_supply(total_supply: TokenAmount) -> Result<(), EconomicsError> {
    if total_supply <= Decimal::ZERO {
        return Err(EconomicsError::invalid(
            "token.total_supply",
            total_supply,
            "Must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_months(months: usize) -> Result<(), EconomicsError> {
    if months == 0 {
        return Err(EconomicsError::invalid("months", months, "Must be greater than 0"));
    }
    if months > MAX_MONTHS {
        return Err(EconomicsError::invalid(
            "months",
            months,
            &format!("Must not exceed {} months", MAX_MONTHS),
        ));
    }
    Ok(())
}
