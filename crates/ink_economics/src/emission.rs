//! Token emission schedules
//!
//! Each allocation category releases its tokens after a lockup, either
//! linearly over its vesting period, in a single release when it has no
//! vesting, or as an upfront lump followed by a linear tail. Category
//! schedules are fitted to the projection horizon and summed into the
//! monthly emission and cumulative supply series.

use crate::errors::EconomicsError;
use crate::params::{Allocation, EmissionParams, SchedulePolicy};
use crate::types::{MonthIndex, MonthlySeries, TokenAmount, UsdAmount};
use rust_decimal::Decimal;
use serde::Serialize;
use std::iter;
use tracing::{debug, info, warn};

/// Emission series of a single allocation category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEmission {
    pub name: String,
    /// Tokens assigned to the category (total_supply × percentage)
    pub tokens: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<UsdAmount>,
    pub series: MonthlySeries,
}

impl CategoryEmission {
    /// Tokens released within the horizon
    pub fn emitted(&self) -> TokenAmount {
        self.series.total()
    }

    /// USD raised by selling the category at its price, if priced
    pub fn raise(&self) -> Option<UsdAmount> {
        self.price.map(|price| self.tokens * price)
    }
}

/// Per-category and aggregate emissions over the horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionSchedule {
    pub total_supply: TokenAmount,
    /// Categories in allocation-table order
    pub categories: Vec<CategoryEmission>,
    /// Sum across categories per month
    pub monthly_emissions: MonthlySeries,
    /// Running sum of `monthly_emissions`
    pub cumulative_supply: MonthlySeries,
}

/// Unfitted release pattern: `lockup` zeros followed by the releases.
/// Its length is `allocation.schedule_months()`.
fn release_pattern(
    allocation: &Allocation,
    tokens: TokenAmount,
) -> impl Iterator<Item = Decimal> {
    let vesting = allocation.vesting_months;

    let (first, tail, tail_months) = if allocation.upfront_fraction > Decimal::ZERO && vesting >= 2
    {
        let lump = tokens * allocation.upfront_fraction;
        (lump, (tokens - lump) / Decimal::from(vesting - 1), vesting - 1)
    } else if vesting > 0 && allocation.upfront_fraction.is_zero() {
        let monthly = tokens / Decimal::from(vesting);
        (monthly, monthly, vesting - 1)
    } else {
        // no vesting period (or an upfront share without a tail): one release
        (tokens, Decimal::ZERO, 0)
    };

    iter::repeat(Decimal::ZERO)
        .take(allocation.lockup_months)
        .chain(iter::once(first))
        .chain(iter::repeat(tail).take(tail_months))
}

/// Take the first `months` entries of a category's pattern and zero-pad
/// the rest. A pattern longer than the horizon is handled per `policy`.
fn fit_to_horizon(
    allocation: &Allocation,
    tokens: TokenAmount,
    months: usize,
    policy: SchedulePolicy,
) -> Result<MonthlySeries, EconomicsError> {
    let required = allocation.schedule_months();
    if required > months && policy == SchedulePolicy::Strict {
        return Err(EconomicsError::ScheduleExceedsHorizon {
            category: allocation.name.clone(),
            required,
            horizon: months,
        });
    }

    let mut series: Vec<Decimal> = release_pattern(allocation, tokens).take(months).collect();

    if required > months {
        let emitted: Decimal = series.iter().copied().sum();
        let dropped = tokens - emitted;
        if !dropped.is_zero() {
            warn!(
                "Schedule for {} runs {} months past the horizon; dropping {} tokens",
                allocation.name,
                required - months,
                dropped
            );
        }
    }

    series.resize(months, Decimal::ZERO);
    Ok(MonthlySeries::from(series))
}

/// Monthly emissions of one category over `months`.
pub fn category_schedule(
    allocation: &Allocation,
    total_supply: TokenAmount,
    months: usize,
    policy: SchedulePolicy,
) -> Result<MonthlySeries, EconomicsError> {
    fit_to_horizon(allocation, allocation.tokens(total_supply), months, policy)
}

impl EmissionSchedule {
    /// Validate `params` and build every category schedule.
    pub fn build(params: &EmissionParams) -> Result<Self, EconomicsError> {
        params.validate()?;

        let mut categories = Vec::with_capacity(params.allocations.len());
        let mut monthly = vec![Decimal::ZERO; params.months];

        for allocation in &params.allocations {
            let series = category_schedule(
                allocation,
                params.total_supply,
                params.months,
                params.schedule_policy,
            )?;
            for (total, value) in monthly.iter_mut().zip(series.iter()) {
                *total += *value;
            }

            let tokens = allocation.tokens(params.total_supply);
            debug!(
                "Built {} schedule: tokens={}, lockup={}, vesting={}",
                allocation.name, tokens, allocation.lockup_months, allocation.vesting_months
            );

            categories.push(CategoryEmission {
                name: allocation.name.clone(),
                tokens,
                price: allocation.price,
                series,
            });
        }

        let monthly_emissions = MonthlySeries::from(monthly);
        let cumulative_supply = monthly_emissions.cumulative();

        info!(
            "Emission schedule built: {} categories over {} months, {} tokens released",
            categories.len(),
            params.months,
            cumulative_supply.last().unwrap_or_default()
        );

        Ok(Self {
            total_supply: params.total_supply,
            categories,
            monthly_emissions,
            cumulative_supply,
        })
    }

    pub fn months(&self) -> usize {
        self.monthly_emissions.len()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryEmission> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Circulating supply at the end of `month`
    pub fn circulating_at(&self, month: MonthIndex) -> Option<TokenAmount> {
        self.cumulative_supply.get(month)
    }

    /// USD raised across all priced categories
    pub fn total_raise(&self) -> UsdAmount {
        self.categories
            .iter()
            .filter_map(CategoryEmission::raise)
            .sum()
    }
}

/// Build the default allocation table's schedule for `total_supply` over `months`.
pub fn calculate_token_emissions(
    total_supply: TokenAmount,
    months: usize,
) -> Result<EmissionSchedule, EconomicsError> {
    EmissionSchedule::build(&EmissionParams {
        total_supply,
        months,
        ..EmissionParams::default()
    })
}
