use super::family::FamilyId;
use super::money::Money;
use serde::Serialize;

/// What a family owes and has paid over one bucket of school years.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FamilyStatement {
    pub family_id: FamilyId,
    pub family_name: Option<String>,
    pub total_due: Money,
    pub total_paid: Money,
    /// `total_due - total_paid`. Negative when the family overpaid.
    pub balance: Money,
}

impl FamilyStatement {
    pub fn new(
        family_id: FamilyId,
        family_name: Option<String>,
        total_due: Money,
        total_paid: Money,
    ) -> Self {
        Self {
            family_id,
            family_name,
            total_due,
            total_paid,
            balance: total_due - total_paid,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.balance <= Money::ZERO
    }
}
