//! Billing records and the value objects and rules attached to them.

pub mod dates;
pub mod discount;
pub mod enrollment;
pub mod family;
pub mod money;
pub mod payment;
pub mod ports;
pub mod school_year;
pub mod statement;
