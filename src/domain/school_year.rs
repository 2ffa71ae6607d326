use super::dates::{deserialize_date, deserialize_optional_date};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type SchoolYearId = u32;

/// An administrative year, conventionally September to August.
///
/// Only used as a bucket boundary: enrollments and payments point at a school
/// year by id, or get matched to one through their dates.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct SchoolYear {
    pub id: SchoolYearId,
    #[serde(default)]
    pub label: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

impl SchoolYear {
    pub fn new(
        id: SchoolYearId,
        label: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            start_date,
            end_date,
        }
    }

    /// Calendar year the school year starts in.
    pub fn start_year(&self) -> i32 {
        self.start_date.year()
    }

    /// Calendar year the school year ends in. Open-ended years are assumed to
    /// close the following summer.
    pub fn end_year(&self) -> i32 {
        self.end_date
            .map(|end| end.year())
            .unwrap_or_else(|| self.start_year() + 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Looks up a school year by id.
pub fn find_school_year(school_years: &[SchoolYear], id: SchoolYearId) -> Option<&SchoolYear> {
    school_years.iter().find(|year| year.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_bounds() {
        let closed = SchoolYear::new(1, "2024-2025", date(2024, 9, 1), Some(date(2025, 8, 31)));
        assert_eq!(closed.start_year(), 2024);
        assert_eq!(closed.end_year(), 2025);

        let open = SchoolYear::new(2, "2025-2026", date(2025, 9, 1), None);
        assert_eq!(open.end_year(), 2026);
    }

    #[test]
    fn test_contains() {
        let year = SchoolYear::new(1, "2024-2025", date(2024, 9, 1), Some(date(2025, 8, 31)));
        assert!(year.contains(date(2024, 9, 1)));
        assert!(year.contains(date(2025, 8, 31)));
        assert!(!year.contains(date(2024, 8, 31)));
        assert!(!year.contains(date(2025, 9, 1)));

        let open = SchoolYear::new(2, "2025-2026", date(2025, 9, 1), None);
        assert!(open.contains(date(2030, 1, 1)));
    }

    #[test]
    fn test_deserialize_from_timestamps() {
        let json = r#"{
            "id": 7,
            "label": "2024-2025",
            "start_date": "2024-09-01T00:00:00.000Z",
            "end_date": null
        }"#;
        let year: SchoolYear = serde_json::from_str(json).unwrap();
        assert_eq!(year.id, 7);
        assert_eq!(year.start_date, date(2024, 9, 1));
        assert_eq!(year.end_date, None);
    }

    #[test]
    fn test_find_school_year() {
        let years = vec![
            SchoolYear::new(1, "a", date(2023, 9, 1), None),
            SchoolYear::new(2, "b", date(2024, 9, 1), None),
        ];
        assert_eq!(find_school_year(&years, 2).map(|y| y.label.as_str()), Some("b"));
        assert!(find_school_year(&years, 9).is_none());
    }
}
