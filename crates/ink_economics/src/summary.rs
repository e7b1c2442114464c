//! Launch summary statistics

use crate::metrics::Projection;
use crate::types::{TokenAmount, UsdAmount};
use serde::Serialize;

/// Headline figures of a projection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    /// Cumulative supply at the end of month 0
    pub initial_circulating_supply: TokenAmount,
    /// Initial circulating supply at the initial token price
    pub initial_market_cap: UsdAmount,
    /// USD raised across the priced allocation rounds
    pub total_raise: UsdAmount,
    pub fully_diluted_valuation: UsdAmount,
}

impl KeyMetrics {
    pub fn from_projection(projection: &Projection) -> Self {
        let initial_circulating_supply = projection
            .emissions
            .circulating_at(0)
            .unwrap_or_default();
        let initial_price = projection.token_price.first().unwrap_or_default();

        Self {
            initial_circulating_supply,
            initial_market_cap: initial_circulating_supply * initial_price,
            total_raise: projection.emissions.total_raise(),
            fully_diluted_valuation: projection
                .fully_diluted_valuation
                .first()
                .unwrap_or_default(),
        }
    }
}
