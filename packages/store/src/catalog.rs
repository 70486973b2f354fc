use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::models::RentalItem;
use crate::seed;

/// Read/write access to the items that can be rented.
pub trait Catalog {
    fn item(&self, id: &str) -> impl Future<Output = Option<RentalItem>>;
    /// Item whose printed scan code equals `code`.
    fn find_by_code(&self, code: &str) -> impl Future<Output = Option<RentalItem>>;
    fn add_item(&self, item: RentalItem) -> impl Future<Output = ()>;
}

/// In-memory catalog, seeded with the demo items.
#[derive(Clone, Debug)]
pub struct MemoryCatalog {
    items: Arc<Mutex<Vec<RentalItem>>>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::with_items(seed::demo_items())
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<RentalItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    fn find(&self, pred: impl Fn(&RentalItem) -> bool) -> Option<RentalItem> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| pred(item))
            .cloned()
    }
}

impl Catalog for MemoryCatalog {
    async fn item(&self, id: &str) -> Option<RentalItem> {
        self.find(|item| item.id == id)
    }

    async fn find_by_code(&self, code: &str) -> Option<RentalItem> {
        self.find(|item| item.qr_code_value.as_deref() == Some(code))
    }

    async fn add_item(&self, item: RentalItem) {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::DEMO_SCAN_CODE;

    #[tokio::test]
    async fn test_lookup_by_id_and_code() {
        let catalog = MemoryCatalog::new();
        assert_eq!(catalog.item("item2").await.unwrap().name, "Verktøysett");
        assert!(catalog.item("missing").await.is_none());

        let drone = catalog.find_by_code(DEMO_SCAN_CODE).await.unwrap();
        assert_eq!(drone.id, "item-qr-123");
        assert!(catalog.find_by_code("relivery-123").await.is_none());
    }

    #[tokio::test]
    async fn test_add_item_replaces_same_id() {
        let catalog = MemoryCatalog::with_items(Vec::new());
        let mut drone = seed::drone();
        catalog.add_item(drone.clone()).await;
        drone.availability = false;
        catalog.add_item(drone).await;

        let stored = catalog.item("item-qr-123").await.unwrap();
        assert!(!stored.availability);
    }
}
