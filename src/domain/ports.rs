use super::family::{Family, FamilyId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait FamilyStore: Send + Sync {
    async fn store(&self, family: Family) -> Result<()>;
    async fn get(&self, family_id: FamilyId) -> Result<Option<Family>>;
    /// All families, in ascending id order.
    async fn get_all(&self) -> Result<Vec<Family>>;
}

/// Source of "now" for the recent-payment window.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub type FamilyStoreBox = Box<dyn FamilyStore>;
pub type ClockBox = Box<dyn Clock>;
