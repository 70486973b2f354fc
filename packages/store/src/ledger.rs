use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::models::{ActiveRental, RentalItem};
use crate::seed;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Fant ikke leieforholdet.")]
    NotFound(String),
    #[error("Leieforholdet er allerede avsluttet.")]
    AlreadyClosed(String),
    #[error("Gjenstanden er ikke tilgjengelig for utleie.")]
    Unavailable(String),
    #[error("Du leier allerede denne gjenstanden.")]
    AlreadyRenting(String),
}

/// Rentals per renter. Rentals are never deleted; a returned rental stays as
/// history.
pub trait RentalLedger {
    /// Open rentals, oldest first.
    fn ongoing_for(&self, renter_id: &str) -> impl Future<Output = Vec<ActiveRental>>;
    /// Returned rentals, most recently returned first.
    fn history_for(&self, renter_id: &str) -> impl Future<Output = Vec<ActiveRental>>;
    fn open_rental_for_item(
        &self,
        renter_id: &str,
        item_id: &str,
    ) -> impl Future<Output = Option<ActiveRental>>;
    fn start_rental(
        &self,
        renter_id: &str,
        item: &RentalItem,
        started_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<ActiveRental, LedgerError>>;
    /// Sets the end timestamp and the final cost.
    fn close_rental(
        &self,
        rental_id: &str,
        ended_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<ActiveRental, LedgerError>>;
}

#[derive(Debug, Default)]
struct LedgerState {
    rentals: Vec<ActiveRental>,
    next_id: u64,
}

/// In-memory ledger.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rentals(rentals: Vec<ActiveRental>) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                rentals,
                next_id: 0,
            })),
        }
    }

    /// Gives `renter_id` the demo rentals unless they already have rentals.
    /// Returns whether anything was added.
    pub fn seed_demo_for(&self, renter_id: &str) -> bool {
        let mut state = self.lock();
        if state.rentals.iter().any(|r| r.renter_id == renter_id) {
            return false;
        }
        state.rentals.extend(seed::demo_rentals(renter_id));
        tracing::debug!(renter_id, "seeded demo rentals");
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn select(&self, pred: impl Fn(&ActiveRental) -> bool) -> Vec<ActiveRental> {
        self.lock()
            .rentals
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }
}

impl RentalLedger for MemoryLedger {
    async fn ongoing_for(&self, renter_id: &str) -> Vec<ActiveRental> {
        let mut rentals = self.select(|r| r.renter_id == renter_id && r.is_ongoing());
        rentals.sort_by_key(|r| r.start_date);
        rentals
    }

    async fn history_for(&self, renter_id: &str) -> Vec<ActiveRental> {
        let mut rentals = self.select(|r| r.renter_id == renter_id && !r.is_ongoing());
        rentals.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        rentals
    }

    async fn open_rental_for_item(&self, renter_id: &str, item_id: &str) -> Option<ActiveRental> {
        self.select(|r| r.renter_id == renter_id && r.item_id == item_id && r.is_ongoing())
            .into_iter()
            .next()
    }

    async fn start_rental(
        &self,
        renter_id: &str,
        item: &RentalItem,
        started_at: DateTime<Utc>,
    ) -> Result<ActiveRental, LedgerError> {
        if !item.availability {
            return Err(LedgerError::Unavailable(item.id.clone()));
        }
        let mut state = self.lock();
        let renting = state
            .rentals
            .iter()
            .any(|r| r.renter_id == renter_id && r.item_id == item.id && r.is_ongoing());
        if renting {
            return Err(LedgerError::AlreadyRenting(item.id.clone()));
        }
        state.next_id += 1;
        let rental = ActiveRental {
            id: format!("{renter_id}-n{}", state.next_id),
            item_id: item.id.clone(),
            renter_id: renter_id.to_string(),
            start_date: started_at,
            end_date: None,
            total_cost: None,
            item_details: Some(item.clone()),
        };
        state.rentals.push(rental.clone());
        tracing::info!(rental_id = %rental.id, item_id = %item.id, "rental started");
        Ok(rental)
    }

    async fn close_rental(
        &self,
        rental_id: &str,
        ended_at: DateTime<Utc>,
    ) -> Result<ActiveRental, LedgerError> {
        let mut state = self.lock();
        let rental = state
            .rentals
            .iter_mut()
            .find(|r| r.id == rental_id)
            .ok_or_else(|| LedgerError::NotFound(rental_id.to_string()))?;
        if !rental.is_ongoing() {
            return Err(LedgerError::AlreadyClosed(rental_id.to_string()));
        }
        rental.total_cost = rental.final_cost(ended_at);
        rental.end_date = Some(ended_at);
        tracing::info!(rental_id, total_cost = ?rental.total_cost, "rental closed");
        Ok(rental.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_seed_is_idempotent_per_renter() {
        let ledger = MemoryLedger::new();
        assert!(ledger.seed_demo_for("u1"));
        assert!(!ledger.seed_demo_for("u1"));
        assert!(ledger.seed_demo_for("u2"));

        assert_eq!(ledger.ongoing_for("u1").await.len(), 2);
        assert_eq!(ledger.history_for("u1").await.len(), 1);
        assert_eq!(ledger.ongoing_for("u2").await.len(), 2);
        assert!(ledger.ongoing_for("u3").await.is_empty());
    }

    #[tokio::test]
    async fn test_close_moves_rental_to_history() {
        let ledger = MemoryLedger::new();
        ledger.seed_demo_for("u1");
        let open = ledger.open_rental_for_item("u1", "item1").await.unwrap();
        let ended = Utc.with_ymd_and_hms(2023, 10, 10, 9, 0, 0).unwrap();

        let closed = ledger.close_rental(&open.id, ended).await.unwrap();
        assert_eq!(closed.end_date, Some(ended));
        assert_eq!(closed.total_cost, Some(450));

        assert!(ledger.open_rental_for_item("u1", "item1").await.is_none());
        let history = ledger.history_for("u1").await;
        assert_eq!(history[0].id, open.id);
        assert_eq!(history.len(), 2);

        let again = ledger.close_rental(&open.id, ended).await;
        assert_eq!(again, Err(LedgerError::AlreadyClosed(open.id.clone())));
        assert!(matches!(
            ledger.close_rental("nope", ended).await,
            Err(LedgerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_start_rental_charges_daily_rate_on_return() {
        let ledger = MemoryLedger::new();
        let drone = seed::drone();
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        let rental = ledger.start_rental("u1", &drone, start).await.unwrap();
        assert!(rental.total_cost.is_none());
        assert_eq!(
            ledger.start_rental("u1", &drone, start).await,
            Err(LedgerError::AlreadyRenting(drone.id.clone()))
        );

        let end = Utc.with_ymd_and_hms(2024, 5, 2, 11, 0, 0).unwrap();
        let closed = ledger.close_rental(&rental.id, end).await.unwrap();
        assert_eq!(closed.total_cost, Some(700));
    }

    #[tokio::test]
    async fn test_unavailable_item_cannot_be_rented() {
        let ledger = MemoryLedger::new();
        let mut drone = seed::drone();
        drone.availability = false;
        let result = ledger.start_rental("u1", &drone, Utc::now()).await;
        assert!(matches!(result, Err(LedgerError::Unavailable(_))));
        assert!(ledger.ongoing_for("u1").await.is_empty());
    }
}
