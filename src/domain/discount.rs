use crate::error::{Result, TuitionError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the per-course reduction evolves once the discount kicks in.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
    /// Each further course is reduced by one more `step`.
    Cumulative,
    /// Every qualifying course is reduced by `step`.
    #[default]
    Fixed,
}

impl FromStr for DiscountMode {
    type Err = TuitionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" => Ok(Self::Cumulative),
            "fixed" => Ok(Self::Fixed),
            other => Err(TuitionError::InvalidDiscount(format!(
                "unknown mode '{other}', expected 'cumulative' or 'fixed'"
            ))),
        }
    }
}

impl fmt::Display for DiscountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative => f.write_str("cumulative"),
            Self::Fixed => f.write_str("fixed"),
        }
    }
}

/// Degressive discount applied across a family's courses.
///
/// Courses are counted from 1 in family order; from the `start_at`-th course
/// onward each price is reduced according to `mode`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSettings {
    pub start_at: u32,
    pub step: Decimal,
    pub mode: DiscountMode,
}

impl Default for DiscountSettings {
    /// Starts at the third course with a zero step: no reduction.
    fn default() -> Self {
        Self {
            start_at: 3,
            step: Decimal::ZERO,
            mode: DiscountMode::Fixed,
        }
    }
}

impl DiscountSettings {
    pub fn new(start_at: u32, step: Decimal, mode: DiscountMode) -> Result<Self> {
        let settings = Self {
            start_at,
            step,
            mode,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_at < 1 {
            return Err(TuitionError::InvalidDiscount(
                "startAt must be at least 1".to_string(),
            ));
        }
        if self.step < Decimal::ZERO {
            return Err(TuitionError::InvalidDiscount(
                "step must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Reduction for the course at 0-based `position` in family order.
    /// Saturates at `Decimal::MAX` for very large steps.
    pub fn reduction(&self, position: usize) -> Decimal {
        let first_discounted = i64::from(self.start_at) - 1;
        let position = position as i64;
        if position < first_discounted {
            return Decimal::ZERO;
        }
        match self.mode {
            DiscountMode::Fixed => self.step,
            DiscountMode::Cumulative => self
                .step
                .saturating_mul(Decimal::from(position - first_discounted + 1)),
        }
    }

    /// Price charged for the course at `position`. Discounted prices never go
    /// below zero; undiscounted prices are returned as read.
    pub fn apply(&self, position: usize, price: Decimal) -> Decimal {
        if (position as i64) < i64::from(self.start_at) - 1 {
            return price;
        }
        price
            .saturating_sub(self.reduction(position))
            .max(Decimal::ZERO)
    }
}
