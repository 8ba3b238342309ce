use super::{ItemStore, StoreError};
use crate::item::model::Item;
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// In-process item store. Keyed by code, so iteration is already code-ordered.
#[derive(Default)]
pub struct InMemoryItemStore {
    items: RwLock<BTreeMap<i32, Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter<P>(&self, predicate: P) -> Vec<Item>
    where
        P: Fn(&Item) -> bool,
    {
        self.items
            .read()
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn save(&self, item: &Item) -> Result<Item, StoreError> {
        self.items.write().insert(item.icode, item.clone());
        Ok(item.clone())
    }

    async fn insert(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        match self.items.write().entry(item.icode) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => Ok(Some(slot.insert(item.clone()).clone())),
        }
    }

    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        Ok(self.items.write().get_mut(&item.icode).map(|stored| {
            *stored = item.clone();
            stored.clone()
        }))
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut items = self.items.write();
        let removed = items.len() as u64;
        items.clear();
        Ok(removed)
    }

    async fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().values().cloned().collect())
    }

    async fn find_by_id(&self, icode: i32) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().get(&icode).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Item>, StoreError> {
        Ok(self
            .items
            .read()
            .values()
            .find(|item| item.title == title)
            .cloned())
    }

    async fn find_by_package_date(&self, date: NaiveDate) -> Result<Vec<Item>, StoreError> {
        Ok(self.filter(|item| item.package_date == date))
    }

    async fn find_by_price_between(&self, low: i64, high: i64) -> Result<Vec<Item>, StoreError> {
        Ok(self.filter(|item| low <= item.price && item.price <= high))
    }

    async fn exists_by_id(&self, icode: i32) -> Result<bool, StoreError> {
        Ok(self.items.read().contains_key(&icode))
    }

    async fn delete_by_id(&self, icode: i32) -> Result<bool, StoreError> {
        Ok(self.items.write().remove(&icode).is_some())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.items.read().len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> InMemoryItemStore {
        let store = InMemoryItemStore::new();
        for item in [
            Item::new(103, "Barley", 3025, date(2024, 3, 1)),
            Item::new(101, "RiceOrPAddy", 1025, date(2024, 3, 1)),
            Item::new(102, "Wheat", 2025, date(2024, 3, 2)),
        ] {
            store.save(&item).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_find_all_is_code_ordered() {
        let store = seeded().await;
        let codes: Vec<i32> = store.find_all().await.unwrap().iter().map(|i| i.icode).collect();
        assert_eq!(codes, vec![101, 102, 103]);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_code() {
        let store = seeded().await;
        store
            .save(&Item::new(102, "Durum Wheat", 2500, date(2024, 4, 1)))
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 3);
        let item = store.find_by_id(102).await.unwrap().unwrap();
        assert_eq!(item.title, "Durum Wheat");
        assert_eq!(item.price, 2500);
    }

    #[tokio::test]
    async fn test_insert_refuses_taken_code() {
        let store = seeded().await;
        let inserted = store
            .insert(&Item::new(101, "Imposter", 1, date(2024, 4, 1)))
            .await
            .unwrap();
        assert!(inserted.is_none());
        assert_eq!(store.find_by_id(101).await.unwrap().unwrap().title, "RiceOrPAddy");

        let fresh = Item::new(104, "CocoSeed", 5025, date(2024, 4, 1));
        assert_eq!(store.insert(&fresh).await.unwrap(), Some(fresh.clone()));
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_requires_existing_code() {
        let store = seeded().await;
        let ghost = Item::new(999, "Ghost", 10, date(2024, 4, 1));
        assert!(store.update(&ghost).await.unwrap().is_none());
        assert!(!store.exists_by_id(999).await.unwrap());

        let changed = Item::new(102, "Durum Wheat", 2500, date(2024, 4, 1));
        assert_eq!(store.update(&changed).await.unwrap(), Some(changed.clone()));
        assert_eq!(store.find_by_id(102).await.unwrap(), Some(changed));
    }

    #[tokio::test]
    async fn test_find_by_package_date_excludes_other_dates() {
        let store = seeded().await;

        let first: Vec<i32> = store
            .find_by_package_date(date(2024, 3, 1))
            .await
            .unwrap()
            .iter()
            .map(|i| i.icode)
            .collect();
        assert_eq!(first, vec![101, 103]);

        let second = store.find_by_package_date(date(2024, 3, 2)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].icode, 102);

        assert!(store
            .find_by_package_date(date(2024, 3, 3))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_by_title_prefers_lowest_code() {
        let store = seeded().await;
        store
            .save(&Item::new(110, "Wheat", 9999, date(2024, 3, 2)))
            .await
            .unwrap();

        let item = store.find_by_title("Wheat").await.unwrap().unwrap();
        assert_eq!(item.icode, 102);
        assert!(store.find_by_title("wheat").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_price_range_is_inclusive() {
        let store = seeded().await;
        let items = store.find_by_price_between(1025, 2025).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(store.find_by_price_between(3000, 1000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_and_delete_all() {
        let store = seeded().await;
        assert!(store.delete_by_id(101).await.unwrap());
        assert!(!store.delete_by_id(101).await.unwrap());
        assert!(!store.exists_by_id(101).await.unwrap());

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
