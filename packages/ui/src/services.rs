//! The application's backend collaborators, provided once at the root.

use api::{AppIdentity, AppSession};
use dioxus::prelude::*;
use store::listing::{SimulatedListings, SimulatedSuggestions};
use store::returns::SimulatedReturns;
use store::scan::Scanner;
use store::{MemoryCatalog, MemoryLedger, ReliveryConfig};

#[derive(Clone)]
pub struct AppServices {
    pub session: AppSession,
    pub catalog: MemoryCatalog,
    pub ledger: MemoryLedger,
    pub listings: SimulatedListings<MemoryCatalog>,
    pub config: ReliveryConfig,
}

impl AppServices {
    pub fn new(config: ReliveryConfig) -> Self {
        let identity = AppIdentity::new(config.auth.recent_login());
        let catalog = MemoryCatalog::new();
        let listings = SimulatedListings::new(
            catalog.clone(),
            config.simulation.listing_submit_delay(),
        );
        Self {
            session: AppSession::new(identity),
            catalog,
            ledger: MemoryLedger::new(),
            listings,
            config,
        }
    }

    pub fn scanner(&self) -> Scanner<MemoryCatalog> {
        Scanner::new(self.catalog.clone(), self.config.simulation.lookup_delay())
    }

    pub fn returns(&self) -> SimulatedReturns<MemoryCatalog, MemoryLedger> {
        SimulatedReturns::new(
            self.catalog.clone(),
            self.ledger.clone(),
            self.config.simulation.item_delay(),
            self.config.simulation.return_submit_delay(),
        )
    }

    pub fn suggestions(&self) -> SimulatedSuggestions {
        SimulatedSuggestions::new(self.config.simulation.suggestion_delay())
    }
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}
