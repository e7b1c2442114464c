//! Core types for the INK token model
//!
//! Defines monetary units, the month index and the monthly series shared by
//! the emission, growth and valuation stages.

use crate::errors::EconomicsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Month index, 0 = launch month
pub type MonthIndex = usize;

/// Token quantity in whole INK (fractions allowed)
pub type TokenAmount = Decimal;

/// Amount in USD
pub type UsdAmount = Decimal;

/// Decimal places kept for growth-derived series (users, models).
pub const SERIES_SCALE: u32 = 10;

/// One value per month, indexed `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries(Vec<Decimal>);

impl MonthlySeries {
    pub fn zeros(months: usize) -> Self {
        Self(vec![Decimal::ZERO; months])
    }

    /// Same value broadcast across every month
    pub fn constant(value: Decimal, months: usize) -> Self {
        Self(vec![value; months])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, month: MonthIndex) -> Option<Decimal> {
        self.0.get(month).copied()
    }

    pub fn first(&self) -> Option<Decimal> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Decimal> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decimal> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Decimal] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Decimal> {
        self.0
    }

    /// Sum over the whole horizon
    pub fn total(&self) -> Decimal {
        self.0.iter().copied().sum()
    }

    /// Running sum: `out[i] = self[0] + ... + self[i]`
    pub fn cumulative(&self) -> Self {
        let mut acc = Decimal::ZERO;
        self.0
            .iter()
            .map(|v| {
                acc += *v;
                acc
            })
            .collect()
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    /// Apply a checked operation to every month, failing on the first overflow.
    pub fn try_map<F>(&self, what: &'static str, f: F) -> Result<Self, EconomicsError>
    where
        F: Fn(Decimal) -> Option<Decimal>,
    {
        self.0
            .iter()
            .map(|v| f(*v).ok_or(EconomicsError::CalculationOverflow(what)))
            .collect()
    }

    /// Pairwise checked operation over two series of the same length.
    pub fn try_zip_with<F>(
        &self,
        other: &MonthlySeries,
        what: &'static str,
        f: F,
    ) -> Result<Self, EconomicsError>
    where
        F: Fn(Decimal, Decimal) -> Option<Decimal>,
    {
        debug_assert_eq!(self.len(), other.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| f(*a, *b).ok_or(EconomicsError::CalculationOverflow(what)))
            .collect()
    }
}

impl From<Vec<Decimal>> for MonthlySeries {
    fn from(values: Vec<Decimal>) -> Self {
        Self(values)
    }
}

impl FromIterator<Decimal> for MonthlySeries {
    fn from_iter<I: IntoIterator<Item = Decimal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MonthlySeries {
    type Item = &'a Decimal;
    type IntoIter = std::slice::Iter<'a, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<MonthIndex> for MonthlySeries {
    type Output = Decimal;

    fn index(&self, month: MonthIndex) -> &Self::Output {
        &self.0[month]
    }
}
