use crate::application::calculations::{calculate_family_total, calculate_paid_amount};
use crate::domain::discount::DiscountSettings;
use crate::domain::family::{Family, FamilyId};
use crate::domain::ports::{ClockBox, FamilyStoreBox};
use crate::domain::school_year::{SchoolYear, SchoolYearId, find_school_year};
use crate::domain::statement::FamilyStatement;
use crate::error::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Produces family statements from stored families.
///
/// `BillingEngine` owns the family store, the clock used for the
/// recent-payment window, the known school years and the discount settings
/// applied to every family.
pub struct BillingEngine {
    family_store: FamilyStoreBox,
    clock: ClockBox,
    school_years: Vec<SchoolYear>,
    discount: DiscountSettings,
}

impl BillingEngine {
    /// Creates a new `BillingEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `family_store` - The store the families are read from.
    /// * `clock` - Supplies "now" for the recent-payment window.
    /// * `school_years` - Every school year statements may be bucketed by.
    /// * `discount` - The degressive discount applied to each family.
    pub fn new(
        family_store: FamilyStoreBox,
        clock: ClockBox,
        school_years: Vec<SchoolYear>,
        discount: DiscountSettings,
    ) -> Self {
        Self {
            family_store,
            clock,
            school_years,
            discount,
        }
    }

    pub fn resolve_school_year(&self, id: SchoolYearId) -> Option<&SchoolYear> {
        find_school_year(&self.school_years, id)
    }

    /// The school year containing today's date, according to the clock.
    pub fn current_school_year(&self) -> Option<&SchoolYear> {
        let today = self.clock.now().date_naive();
        self.school_years.iter().find(|year| year.contains(today))
    }

    /// Statement for one family, or `None` if the store does not know it.
    pub async fn statement(
        &self,
        family_id: FamilyId,
        target: Option<SchoolYearId>,
    ) -> Result<Option<FamilyStatement>> {
        self.warn_on_unknown_year(target);
        let Some(family) = self.family_store.get(family_id).await? else {
            warn!(family_id, "Family not found");
            return Ok(None);
        };
        self.compute(&family, target, self.clock.now()).map(Some)
    }

    /// Statements for every stored family, in ascending id order.
    ///
    /// A family whose payments cannot be read yields an `Err` entry; the
    /// remaining families are still computed.
    pub async fn statements(
        &self,
        target: Option<SchoolYearId>,
    ) -> Result<Vec<(FamilyId, Result<FamilyStatement>)>> {
        self.warn_on_unknown_year(target);
        let now = self.clock.now();
        let families = self.family_store.get_all().await?;

        Ok(families
            .iter()
            .map(|family| (family.id, self.compute(family, target, now)))
            .collect())
    }

    fn compute(
        &self,
        family: &Family,
        target: Option<SchoolYearId>,
        now: DateTime<Utc>,
    ) -> Result<FamilyStatement> {
        let total_due = calculate_family_total(family, target, &self.school_years, &self.discount);
        let total_paid = calculate_paid_amount(family, target, &self.school_years, now)?;
        let statement =
            FamilyStatement::new(family.id, family.name.clone(), total_due, total_paid);

        debug!(
            family_id = family.id,
            total_due = %statement.total_due,
            total_paid = %statement.total_paid,
            balance = %statement.balance,
            "Computed family statement"
        );
        Ok(statement)
    }

    fn warn_on_unknown_year(&self, target: Option<SchoolYearId>) {
        if let Some(id) = target
            && self.resolve_school_year(id).is_none()
        {
            warn!(school_year_id = id, "Unknown school year, nothing will match");
        }
    }
}
