//! Combined projection and valuation metrics
//!
//! Aligns the emission schedule and the network projection by month and
//! values circulating supply at a flat token price.

use crate::config::ModelConfig;
use crate::emission::EmissionSchedule;
use crate::errors::EconomicsError;
use crate::growth::NetworkProjection;
use crate::params::ValuationParams;
use crate::types::{MonthIndex, MonthlySeries, TokenAmount, UsdAmount};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Every series of a projection run, aligned by month index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub emissions: EmissionSchedule,
    pub network: NetworkProjection,
    pub token_price: MonthlySeries,
    /// `cumulative_supply × token_price`
    pub market_cap: MonthlySeries,
    /// `total_supply × token_price`
    pub fully_diluted_valuation: MonthlySeries,
}

/// All columns of a single month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    pub month: MonthIndex,
    pub category_emissions: BTreeMap<String, TokenAmount>,
    pub monthly_emissions: TokenAmount,
    pub cumulative_supply: TokenAmount,
    pub active_users: Decimal,
    pub models_processed: Decimal,
    pub traditional_compute_costs: UsdAmount,
    pub kraken_compute_costs: UsdAmount,
    pub cost_savings: UsdAmount,
    pub network_revenue: UsdAmount,
    pub token_price: UsdAmount,
    pub market_cap: UsdAmount,
    pub fully_diluted_valuation: UsdAmount,
}

impl Projection {
    /// Merge both series sets and derive valuation metrics.
    pub fn combine(
        emissions: EmissionSchedule,
        network: NetworkProjection,
        valuation: &ValuationParams,
    ) -> Result<Self, EconomicsError> {
        valuation.validate()?;

        if emissions.months() != network.months() {
            return Err(EconomicsError::SeriesLengthMismatch {
                emissions: emissions.months(),
                network: network.months(),
            });
        }

        let months = emissions.months();
        let price = valuation.token_price;
        let token_price = MonthlySeries::constant(price, months);
        let market_cap = emissions
            .cumulative_supply
            .try_map("market_cap", |supply| supply.checked_mul(price))?;
        let fdv = valuation
            .total_supply
            .checked_mul(price)
            .ok_or(EconomicsError::CalculationOverflow("fully_diluted_valuation"))?;

        Ok(Self {
            emissions,
            network,
            token_price,
            market_cap,
            fully_diluted_valuation: MonthlySeries::constant(fdv, months),
        })
    }

    /// Validate `config` and run all three stages.
    pub fn from_config(config: &ModelConfig) -> Result<Self, EconomicsError> {
        config.validate()?;

        let emissions = EmissionSchedule::build(&config.emission_params())?;
        let network = NetworkProjection::project(&config.growth_params())?;
        let projection = Self::combine(emissions, network, &config.valuation_params())?;

        info!(
            "Projection complete: {} months at token price {}",
            projection.months(),
            config.token.initial_price
        );
        Ok(projection)
    }

    pub fn months(&self) -> usize {
        self.emissions.months()
    }

    pub fn row(&self, month: MonthIndex) -> Option<ProjectionRow> {
        if month >= self.months() {
            return None;
        }

        let e = &self.emissions;
        let n = &self.network;
        Some(ProjectionRow {
            month,
            category_emissions: e
                .categories
                .iter()
                .map(|c| (c.name.clone(), c.series[month]))
                .collect(),
            monthly_emissions: e.monthly_emissions[month],
            cumulative_supply: e.cumulative_supply[month],
            active_users: n.active_users[month],
            models_processed: n.models_processed[month],
            traditional_compute_costs: n.traditional_compute_costs[month],
            kraken_compute_costs: n.kraken_compute_costs[month],
            cost_savings: n.cost_savings[month],
            network_revenue: n.network_revenue[month],
            token_price: self.token_price[month],
            market_cap: self.market_cap[month],
            fully_diluted_valuation: self.fully_diluted_valuation[month],
        })
    }

    /// First `n` rows (fewer if the horizon is shorter)
    pub fn head(&self, n: usize) -> Vec<ProjectionRow> {
        (0..n.min(self.months())).filter_map(|m| self.row(m)).collect()
    }

    pub fn rows(&self) -> Vec<ProjectionRow> {
        self.head(self.months())
    }
}

/// Full default projection for `total_supply` at `initial_price`.
pub fn calculate_token_metrics(
    total_supply: TokenAmount,
    initial_price: UsdAmount,
) -> Result<Projection, EconomicsError> {
    let mut config = ModelConfig::default();
    config.token.total_supply = total_supply;
    config.token.initial_price = initial_price;
    Projection::from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission::calculate_token_emissions;
    use crate::growth::project_network_metrics;

    fn default_projection() -> Projection {
        calculate_token_metrics(Decimal::from(1_000_000_000), Decimal::new(8, 2)).unwrap()
    }

    #[test]
    fn market_cap_tracks_circulating_supply() {
        let p = default_projection();
        for m in 0..p.months() {
            assert_eq!(
                p.market_cap[m],
                p.emissions.cumulative_supply[m] * Decimal::new(8, 2)
            );
        }
    }

    #[test]
    fn fdv_is_constant() {
        let p = default_projection();
        assert!(p
            .fully_diluted_valuation
            .iter()
            .all(|v| *v == Decimal::from(80_000_000)));
        assert!(p.token_price.iter().all(|v| *v == Decimal::new(8, 2)));
    }

    #[test]
    fn mismatched_horizons_are_rejected() {
        let emissions = calculate_token_emissions(Decimal::from(1_000_000_000), 48).unwrap();
        let network =
            project_network_metrics(36, Decimal::from(6_000), Decimal::from(270_000)).unwrap();

        let err = Projection::combine(emissions, network, &ValuationParams::default()).unwrap_err();
        assert!(matches!(
            err,
            EconomicsError::SeriesLengthMismatch {
                emissions: 48,
                network: 36
            }
        ));
    }

    #[test]
    fn row_exposes_every_column() {
        let p = default_projection();
        let row = p.row(0).unwrap();

        assert_eq!(row.month, 0);
        assert_eq!(row.category_emissions.len(), 9);
        assert_eq!(row.category_emissions["ido"], Decimal::from(30_000_000));
        assert_eq!(row.active_users, Decimal::from(6_000));
        assert_eq!(row.cumulative_supply, row.monthly_emissions);
        assert!(p.row(48).is_none());
    }

    #[test]
    fn head_is_bounded_by_horizon() {
        let p = default_projection();
        assert_eq!(p.head(12).len(), 12);
        assert_eq!(p.head(100).len(), 48);
        assert_eq!(p.rows().len(), 48);
    }
}
