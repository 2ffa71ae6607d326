use super::dates::deserialize_optional_date_time;
use super::money::deserialize_lenient_decimal;
use super::school_year::SchoolYearId;
use crate::error::{Result, TuitionError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub type PaymentId = u32;

/// A batch of identical cheques recorded as one entry.
///
/// `count` may be stored as a number or a numeric string.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct ChequeLot {
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    pub count: Decimal,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub banque: String,
    #[serde(default)]
    pub nom: String,
}

impl ChequeLot {
    pub fn new(count: u32, amount: Decimal) -> Self {
        Self {
            count: Decimal::from(count),
            amount,
            ..Self::default()
        }
    }

    /// `count × amount`, saturating at the bounds of `Decimal`.
    pub fn total(&self) -> Decimal {
        self.count.saturating_mul(self.amount)
    }
}

/// Cheque lots as they come out of storage: either a JSON-encoded string
/// column or an already decoded list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(untagged)]
pub enum Cheques {
    Encoded(String),
    Lots(Vec<ChequeLot>),
}

impl Default for Cheques {
    fn default() -> Self {
        Self::Lots(Vec::new())
    }
}

impl Cheques {
    /// Decodes the lots. An encoded `null` means no cheques; any other
    /// payload that is not a JSON list of lots is an error.
    pub fn lots(&self) -> Result<Cow<'_, [ChequeLot]>> {
        match self {
            Self::Encoded(raw) => serde_json::from_str::<Option<Vec<ChequeLot>>>(raw)
                .map(|lots| Cow::Owned(lots.unwrap_or_default()))
                .map_err(TuitionError::MalformedCheques),
            Self::Lots(lots) => Ok(Cow::Borrowed(lots)),
        }
    }

    pub fn total(&self) -> Result<Decimal> {
        Ok(self
            .lots()?
            .iter()
            .map(ChequeLot::total)
            .fold(Decimal::ZERO, Decimal::saturating_add))
    }
}

/// A family-level payment, possibly split across several methods.
///
/// Amounts are stored per method; a missing amount counts as zero.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: PaymentId,
    #[serde(default)]
    pub amount_cash: Option<Decimal>,
    #[serde(default)]
    pub amount_card: Option<Decimal>,
    #[serde(default)]
    pub amount_transfer: Option<Decimal>,
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
    #[serde(default)]
    pub cheques: Option<Cheques>,
    /// Explicit school-year link. Takes precedence over `created_at`.
    #[serde(default)]
    pub school_year_id: Option<SchoolYearId>,
    #[serde(default, deserialize_with = "deserialize_optional_date_time")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-method amounts of a single payment.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct PaymentBreakdown {
    pub cash: Decimal,
    pub card: Decimal,
    pub transfer: Decimal,
    pub cheques: Decimal,
    pub refund: Decimal,
}

impl PaymentBreakdown {
    /// Amount actually received: every method minus the refund.
    ///
    /// A negative refund increases the result; it is not validated here.
    /// Saturates at the bounds of `Decimal`.
    pub fn net(&self) -> Decimal {
        self.cash
            .saturating_add(self.card)
            .saturating_add(self.transfer)
            .saturating_add(self.cheques)
            .saturating_sub(self.refund)
    }
}

impl Payment {
    pub fn new(id: PaymentId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount_cash: None,
            amount_card: None,
            amount_transfer: None,
            refund_amount: None,
            cheques: None,
            school_year_id: None,
            created_at: Some(created_at),
        }
    }

    /// Splits the payment by method, decoding the cheque lots.
    pub fn breakdown(&self) -> Result<PaymentBreakdown> {
        let cheques = match &self.cheques {
            Some(cheques) => cheques.total()?,
            None => Decimal::ZERO,
        };
        Ok(PaymentBreakdown {
            cash: self.amount_cash.unwrap_or_default(),
            card: self.amount_card.unwrap_or_default(),
            transfer: self.amount_transfer.unwrap_or_default(),
            cheques,
            refund: self.refund_amount.unwrap_or_default(),
        })
    }

    pub fn net_amount(&self) -> Result<Decimal> {
        Ok(self.breakdown()?.net())
    }
}
