//! Network growth projection
//!
//! Active users and models processed grow as independent compound curves
//! with no cap and no feedback between them. Compute spend follows models
//! processed; the network charges a fraction of the traditional cost and
//! takes a platform fee on that spend.

use crate::errors::EconomicsError;
use crate::params::GrowthParams;
use crate::types::{MonthlySeries, SERIES_SCALE};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Monthly network usage, cost and revenue series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkProjection {
    pub active_users: MonthlySeries,
    pub models_processed: MonthlySeries,
    /// Cost of running `models_processed` on traditional compute
    pub traditional_compute_costs: MonthlySeries,
    /// Cost of the same work on the Kraken network
    pub kraken_compute_costs: MonthlySeries,
    pub cost_savings: MonthlySeries,
    /// Platform fee on Kraken compute spend
    pub network_revenue: MonthlySeries,
}

/// `initial × (1 + rate)^i` for `i in 0..months`, rounded to `SERIES_SCALE`.
pub fn compound_series(
    initial: Decimal,
    rate: Decimal,
    months: usize,
    what: &'static str,
) -> Result<MonthlySeries, EconomicsError> {
    let factor = Decimal::ONE + rate;
    let mut power = Decimal::ONE;
    let mut values = Vec::with_capacity(months);

    for month in 0..months {
        if month > 0 {
            power = power
                .checked_mul(factor)
                .ok_or(EconomicsError::CalculationOverflow(what))?;
        }
        let value = initial
            .checked_mul(power)
            .ok_or(EconomicsError::CalculationOverflow(what))?;
        values.push(value.round_dp(SERIES_SCALE));
    }

    Ok(MonthlySeries::from(values))
}

impl NetworkProjection {
    /// Validate `params` and project every series.
    pub fn project(params: &GrowthParams) -> Result<Self, EconomicsError> {
        params.validate()?;
        let a = &params.assumptions;

        let active_users =
            compound_series(a.initial_users, a.user_growth_rate, params.months, "active_users")?;
        let models_processed = compound_series(
            a.initial_models,
            a.model_growth_rate,
            params.months,
            "models_processed",
        )?;

        let traditional_compute_costs = models_processed
            .try_map("traditional_compute_costs", |m| {
                m.checked_mul(a.compute_cost_per_model)
            })?;
        let kraken_share = Decimal::ONE - a.compute_cost_savings;
        let kraken_compute_costs = traditional_compute_costs
            .try_map("kraken_compute_costs", |t| t.checked_mul(kraken_share))?;
        let cost_savings = traditional_compute_costs.try_zip_with(
            &kraken_compute_costs,
            "cost_savings",
            |t, k| t.checked_sub(k),
        )?;
        let network_revenue = kraken_compute_costs
            .try_map("network_revenue", |k| k.checked_mul(a.take_rate))?;

        info!(
            "Network projection built over {} months: {} users, {} models in final month",
            params.months,
            active_users.last().unwrap_or_default().round_dp(0),
            models_processed.last().unwrap_or_default().round_dp(0)
        );

        Ok(Self {
            active_users,
            models_processed,
            traditional_compute_costs,
            kraken_compute_costs,
            cost_savings,
            network_revenue,
        })
    }

    pub fn months(&self) -> usize {
        self.active_users.len()
    }
}

/// Project the default growth assumptions from the given starting point.
pub fn project_network_metrics(
    months: usize,
    initial_users: Decimal,
    initial_models: Decimal,
) -> Result<NetworkProjection, EconomicsError> {
    NetworkProjection::project(&GrowthParams::new(months, initial_users, initial_models))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_projection() -> NetworkProjection {
        project_network_metrics(48, Decimal::from(6_000), Decimal::from(270_000)).unwrap()
    }

    #[test]
    fn compound_series_first_months() {
        let series = compound_series(Decimal::from(6_000), Decimal::new(40, 2), 3, "users").unwrap();
        assert_eq!(series[0], Decimal::from(6_000));
        assert_eq!(series[1], Decimal::from(8_400));
        assert_eq!(series[2], Decimal::from(11_760));
    }

    #[test]
    fn cost_identities_hold_exactly() {
        let p = default_projection();
        for i in 0..p.months() {
            assert_eq!(
                p.cost_savings[i] + p.kraken_compute_costs[i],
                p.traditional_compute_costs[i]
            );
            assert_eq!(
                p.network_revenue[i],
                p.kraken_compute_costs[i] * Decimal::new(20, 2)
            );
            assert_eq!(
                p.traditional_compute_costs[i],
                p.models_processed[i] * Decimal::from(5)
            );
        }
    }

    #[test]
    fn month_zero_costs() {
        let p = default_projection();
        // 270k models at $5 = $1.35M traditional, 10% on the network, 20% fee
        assert_eq!(p.traditional_compute_costs[0], Decimal::from(1_350_000));
        assert_eq!(p.kraken_compute_costs[0], Decimal::from(135_000));
        assert_eq!(p.cost_savings[0], Decimal::from(1_215_000));
        assert_eq!(p.network_revenue[0], Decimal::from(27_000));
    }

    #[test]
    fn overflow_is_reported() {
        let err = project_network_metrics(400, Decimal::from(6_000), Decimal::from(270_000))
            .unwrap_err();
        assert!(matches!(err, EconomicsError::CalculationOverflow(_)));
    }

    #[test]
    fn zero_growth_is_flat() {
        let params = GrowthParams {
            months: 6,
            assumptions: crate::params::NetworkAssumptions {
                user_growth_rate: Decimal::ZERO,
                ..Default::default()
            },
        };
        let p = NetworkProjection::project(&params).unwrap();
        assert!(p.active_users.iter().all(|u| *u == Decimal::from(6_000)));
    }
}
