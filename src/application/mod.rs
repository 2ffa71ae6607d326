//! Application layer: the tuition calculations and the engine that applies
//! them to stored families.
//!
//! `calculations` holds the pure functions. `BillingEngine` wires them to a
//! `FamilyStore` and a `Clock` and turns each family into a statement.

pub mod calculations;
pub mod engine;
