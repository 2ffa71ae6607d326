//! Tuition due and amounts paid for a family, bucketed by school year.
//!
//! Every function here is pure and synchronous. Records linked to a school
//! year by id are matched on that id alone; unlinked records are matched
//! through their dates.

use crate::domain::dates::{is_recent, school_year_of};
use crate::domain::discount::DiscountSettings;
use crate::domain::enrollment::Enrollment;
use crate::domain::family::Family;
use crate::domain::money::Money;
use crate::domain::payment::Payment;
use crate::domain::school_year::{SchoolYear, SchoolYearId, find_school_year};
use crate::error::Result;
use chrono::{DateTime, Datelike, Utc};

/// Active enrollments belonging to the target school year.
///
/// Without a target every active enrollment is kept. An id that matches no
/// known school year keeps nothing. Enrollments without an explicit link
/// match when their start date falls in the target's September-August span;
/// a missing start date never matches.
pub fn filter_enrollments_by_school_year<'a>(
    enrollments: &'a [Enrollment],
    target: Option<SchoolYearId>,
    school_years: &[SchoolYear],
) -> Vec<&'a Enrollment> {
    let Some(target_id) = target else {
        return enrollments.iter().filter(|e| e.is_active()).collect();
    };
    let Some(school_year) = find_school_year(school_years, target_id) else {
        return Vec::new();
    };
    let start_year = school_year.start_year();

    enrollments
        .iter()
        .filter(|e| {
            e.is_active()
                && match e.school_year_id {
                    Some(linked) => linked == target_id,
                    None => e
                        .start_date
                        .is_some_and(|start| school_year_of(start) == start_year),
                }
        })
        .collect()
}

/// Total tuition due by a family, after the degressive discount.
///
/// Courses are ranked across the whole family: students in stored order, then
/// each student's enrollments in stored order.
pub fn calculate_family_total(
    family: &Family,
    target: Option<SchoolYearId>,
    school_years: &[SchoolYear],
    discount: &DiscountSettings,
) -> Money {
    family
        .students
        .iter()
        .flat_map(|student| {
            filter_enrollments_by_school_year(&student.enrollments, target, school_years)
        })
        .enumerate()
        .map(|(position, enrollment)| {
            Money::new(discount.apply(position, enrollment.course.unit_price()))
        })
        .sum()
}

/// Net amount a family paid towards the target school year.
///
/// Unlinked payments count when their creation date falls in the target's
/// September-August span, or when they were created within the recent window
/// before `now`, whatever year that places them in.
///
/// # Errors
///
/// Fails with [`crate::error::TuitionError::MalformedCheques`] when an
/// included payment carries a cheques payload that is not valid JSON.
pub fn calculate_paid_amount(
    family: &Family,
    target: Option<SchoolYearId>,
    school_years: &[SchoolYear],
    now: DateTime<Utc>,
) -> Result<Money> {
    let included: Vec<&Payment> = match target {
        None => family.payments.iter().collect(),
        Some(target_id) => {
            let Some(school_year) = find_school_year(school_years, target_id) else {
                return Ok(Money::ZERO);
            };
            let start_year = school_year.start_year();
            family
                .payments
                .iter()
                .filter(|payment| match payment.school_year_id {
                    Some(linked) => linked == target_id,
                    None => payment.created_at.is_some_and(|created| {
                        school_year_of(created.date_naive()) == start_year
                            || is_recent(created, now)
                    }),
                })
                .collect()
        }
    };

    included
        .into_iter()
        .try_fold(Money::ZERO, |total, payment| -> Result<Money> {
            Ok(total + Money::new(payment.net_amount()?))
        })
}

/// Payments to list under a school year.
///
/// Unlike [`calculate_paid_amount`], unlinked payments are matched on the
/// calendar year of their creation date, which must lie between the school
/// year's start and end years. Recent payments are always kept. Without a
/// school year the input is returned as is.
pub fn filter_payments_by_school_year<'a>(
    payments: &'a [Payment],
    school_year: Option<&SchoolYear>,
    now: DateTime<Utc>,
) -> Vec<&'a Payment> {
    let Some(school_year) = school_year else {
        return payments.iter().collect();
    };
    let years = school_year.start_year()..=school_year.end_year();

    payments
        .iter()
        .filter(|payment| match payment.school_year_id {
            Some(linked) => linked == school_year.id,
            None => payment
                .created_at
                .is_some_and(|created| years.contains(&created.year()) || is_recent(created, now)),
        })
        .collect()
}
