#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::io::Write;
use tempfile::NamedTempFile;
use tuition::domain::enrollment::{Course, Enrollment, EnrollmentStatus};
use tuition::domain::school_year::SchoolYear;

pub const FIXTURE: &str = "tests/fixtures/ledger.json";

pub fn write_ledger(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn school_years() -> Vec<SchoolYear> {
    vec![
        SchoolYear::new(1, "2023-2024", date(2023, 9, 1), Some(date(2024, 8, 31))),
        SchoolYear::new(2, "2024-2025", date(2024, 9, 1), Some(date(2025, 8, 31))),
    ]
}

pub fn active(id: u32, price: &str) -> Enrollment {
    Enrollment::new(id, EnrollmentStatus::Active, Course::priced(price))
}
