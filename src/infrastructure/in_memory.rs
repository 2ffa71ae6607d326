use crate::domain::family::{Family, FamilyId};
use crate::domain::ports::FamilyStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for families.
///
/// Uses `Arc<RwLock<BTreeMap<FamilyId, Family>>>` so clones share the same
/// data and `get_all` comes back ordered by id.
#[derive(Default, Clone)]
pub struct InMemoryFamilyStore {
    families: Arc<RwLock<BTreeMap<FamilyId, Family>>>,
}

impl InMemoryFamilyStore {
    /// Creates a new, empty in-memory family store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FamilyStore for InMemoryFamilyStore {
    async fn store(&self, family: Family) -> Result<()> {
        let mut families = self.families.write().await;
        families.insert(family.id, family);
        Ok(())
    }

    async fn get(&self, family_id: FamilyId) -> Result<Option<Family>> {
        let families = self.families.read().await;
        Ok(families.get(&family_id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Family>> {
        let families = self.families.read().await;
        Ok(families.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_family_store() {
        let store = InMemoryFamilyStore::new();
        let mut family = Family::new(1);
        family.name = Some("Martin".to_string());

        store.store(family.clone()).await.unwrap();
        let retrieved = store.get(1).await.unwrap().unwrap();
        assert_eq!(retrieved, family);

        assert!(store.get(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_family_store_overwrites() {
        let store = InMemoryFamilyStore::new();
        store.store(Family::new(1)).await.unwrap();

        let mut renamed = Family::new(1);
        renamed.name = Some("Bernard".to_string());
        store.store(renamed).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name.as_deref(), Some("Bernard"));
    }

    #[tokio::test]
    async fn test_in_memory_family_store_get_all_ordered() {
        let store = InMemoryFamilyStore::new();
        for id in [5, 2, 9] {
            store.store(Family::new(id)).await.unwrap();
        }

        let ids: Vec<FamilyId> = store.get_all().await.unwrap().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }
}
