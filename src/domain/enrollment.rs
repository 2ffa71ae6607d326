use super::dates::deserialize_optional_date;
use super::money::{RawNumber, parse_price};
use super::school_year::SchoolYearId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

pub type EnrollmentId = u32;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Finished,
    Inactive,
}

/// The course an enrollment is for. Only its price matters for billing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Course {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw price as stored, a string or a number in the source record.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<String>,
}

impl Course {
    pub fn priced(price: impl Into<String>) -> Self {
        Self {
            price: Some(price.into()),
            ..Self::default()
        }
    }

    /// Numeric price. Missing or non-numeric prices count as zero.
    pub fn unit_price(&self) -> Decimal {
        self.price.as_deref().map(parse_price).unwrap_or(Decimal::ZERO)
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(RawNumber::into_text))
}

/// A student's registration to one course.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub status: EnrollmentStatus,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    /// Explicit school-year link. Takes precedence over `start_date`.
    #[serde(default)]
    pub school_year_id: Option<SchoolYearId>,
    #[serde(default)]
    pub course: Course,
}

impl Enrollment {
    pub fn new(id: EnrollmentId, status: EnrollmentStatus, course: Course) -> Self {
        Self {
            id,
            status,
            start_date: None,
            school_year_id: None,
            course,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_enrollment_deserialization() {
        let json = r#"{
            "id": 3,
            "status": "active",
            "start_date": "2024-09-15",
            "school_year_id": null,
            "course": { "id": 11, "name": "Piano", "price": "350.00" }
        }"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();

        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert_eq!(enrollment.start_date, NaiveDate::from_ymd_opt(2024, 9, 15));
        assert_eq!(enrollment.school_year_id, None);
        assert_eq!(enrollment.course.unit_price(), dec!(350));
    }

    #[test]
    fn test_numeric_price_is_accepted() {
        let json = r#"{ "id": 1, "status": "finished", "course": { "price": 120.5 } }"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();

        assert!(!enrollment.is_active());
        assert_eq!(enrollment.course.price.as_deref(), Some("120.5"));
        assert_eq!(enrollment.course.unit_price(), dec!(120.5));
    }

    #[test]
    fn test_missing_or_bad_price_is_zero() {
        let json = r#"{ "id": 1, "status": "active", "course": { "price": null } }"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert_eq!(enrollment.course.unit_price(), Decimal::ZERO);

        let json = r#"{ "id": 2, "status": "active" }"#;
        let enrollment: Enrollment = serde_json::from_str(json).unwrap();
        assert_eq!(enrollment.course.unit_price(), Decimal::ZERO);

        assert_eq!(Course::priced("free").unit_price(), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{ "id": 1, "status": "paused" }"#;
        assert!(serde_json::from_str::<Enrollment>(json).is_err());
    }
}
