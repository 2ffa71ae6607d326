use crate::domain::discount::DiscountSettings;
use crate::domain::family::Family;
use crate::domain::school_year::SchoolYear;
use crate::error::Result;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// Everything needed to bill a set of families, as exported by the school's
/// back office.
#[derive(Debug, Deserialize, Default)]
pub struct Ledger {
    #[serde(default)]
    pub school_years: Vec<SchoolYear>,
    #[serde(default)]
    pub families: Vec<Family>,
    /// Discount configured for the school. Absent means the caller decides.
    #[serde(default)]
    pub discount: Option<DiscountSettings>,
}

/// Reads a [`Ledger`] from a JSON document.
///
/// Dates and prices are read leniently (see the domain types). Structural
/// problems, such as a missing id or an unknown enrollment status, fail the
/// whole read.
pub struct LedgerReader<R: Read> {
    source: R,
}

impl<R: Read> LedgerReader<R> {
    /// Creates a new `LedgerReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Parses the ledger and validates its discount settings, if any.
    pub fn read(self) -> Result<Ledger> {
        let ledger: Ledger = serde_json::from_reader(BufReader::new(self.source))?;
        if let Some(discount) = &ledger.discount {
            discount.validate()?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discount::DiscountMode;
    use crate::domain::payment::Cheques;
    use crate::error::TuitionError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_full_ledger() {
        let data = r#"{
            "school_years": [
                { "id": 1, "label": "2024-2025", "start_date": "2024-09-01", "end_date": "2025-08-31" }
            ],
            "discount": { "startAt": 2, "step": "30", "mode": "cumulative" },
            "families": [
                {
                    "id": 1,
                    "name": "Dupont",
                    "students": [
                        { "id": 1, "enrollments": [
                            { "id": 1, "status": "active", "start_date": "2024-09-10", "course": { "price": "350" } }
                        ] }
                    ],
                    "payments": [
                        { "id": 1, "amount_cash": 100, "cheques": "[]", "created_at": "2024-09-12 10:00:00" }
                    ]
                }
            ]
        }"#;
        let ledger = LedgerReader::new(data.as_bytes()).read().unwrap();

        assert_eq!(ledger.school_years.len(), 1);
        assert_eq!(ledger.families.len(), 1);
        let discount = ledger.discount.unwrap();
        assert_eq!(discount.mode, DiscountMode::Cumulative);
        assert_eq!(discount.step, dec!(30));
        assert!(matches!(
            ledger.families[0].payments[0].cheques,
            Some(Cheques::Encoded(_))
        ));
    }

    #[test]
    fn test_reader_empty_document() {
        let ledger = LedgerReader::new("{}".as_bytes()).read().unwrap();
        assert!(ledger.families.is_empty());
        assert!(ledger.discount.is_none());
    }

    #[test]
    fn test_reader_rejects_invalid_discount() {
        let data = r#"{ "discount": { "startAt": 0, "step": 10, "mode": "fixed" } }"#;
        let result = LedgerReader::new(data.as_bytes()).read();
        assert!(matches!(result, Err(TuitionError::InvalidDiscount(_))));
    }

    #[test]
    fn test_reader_malformed_document() {
        let result = LedgerReader::new("{ \"families\": [".as_bytes()).read();
        assert!(matches!(result, Err(TuitionError::JsonError(_))));
    }
}
