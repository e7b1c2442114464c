//! INK Economics: token emission, network growth and valuation projections
//!
//! Deterministic monthly model for the INK token launch:
//! - per-category unlock schedules (lockup, linear vesting, upfront lumps)
//! - compound user/model growth with compute-cost savings and platform revenue
//! - market cap and fully diluted valuation at a flat token price
//!
//! All token and money amounts are exact decimals (`rust_decimal::Decimal`).

pub mod types;
pub mod errors;
pub mod params;
pub mod config;
pub mod emission;
pub mod growth;
pub mod metrics;
pub mod summary;
pub mod report;

pub use types::*;
pub use errors::*;
pub use params::*;
pub use config::*;
pub use emission::*;
pub use growth::*;
pub use metrics::*;
pub use summary::*;
pub use report::*;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience re-exports for callers running the full pipeline.
pub mod prelude {
    pub use crate::config::ModelConfig;
    pub use crate::emission::{
        calculate_token_emissions, category_schedule, CategoryEmission, EmissionSchedule,
    };
    pub use crate::errors::EconomicsError;
    pub use crate::growth::{project_network_metrics, NetworkProjection};
    pub use crate::metrics::{calculate_token_metrics, Projection, ProjectionRow};
    pub use crate::params::{
        default_allocations, Allocation, EmissionParams, GrowthParams, NetworkAssumptions,
        SchedulePolicy, ValuationParams,
    };
    pub use crate::summary::KeyMetrics;
    pub use crate::types::{MonthIndex, MonthlySeries, TokenAmount, UsdAmount};
}
