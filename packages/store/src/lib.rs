//! # Rental domain and in-memory services for Relivery
//!
//! Everything the screens need that is not rendering lives here: the catalog
//! and rental ledger (in-memory, seeded with demo data), the scan lookup, the
//! return checklist, the listing draft with its suggestion service, the camera
//! resource and the repository configuration. The crate has no UI dependency
//! so all of it is tested natively with `tokio`.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `RentalItem`, `ActiveRental`, price and date formatting |
//! | [`catalog`] | [`Catalog`] trait and the seeded [`MemoryCatalog`] |
//! | [`ledger`] | [`RentalLedger`] trait and [`MemoryLedger`] |
//! | [`scan`] | QR-code lookup (manual or simulated scan) |
//! | [`returns`] | Five-step return checklist and its submission |
//! | [`listing`] | Listing draft validation and the mocked category suggestion |
//! | [`camera`] | Scoped camera stream ownership |
//! | [`config`] | `relivery.toml` |

pub mod camera;
pub mod catalog;
pub mod config;
pub mod delay;
pub mod ledger;
pub mod listing;
pub mod models;
pub mod returns;
pub mod scan;
pub mod seed;
pub mod validation;

pub use catalog::{Catalog, MemoryCatalog};
pub use config::ReliveryConfig;
pub use ledger::{LedgerError, MemoryLedger, RentalLedger};
pub use models::{ActiveRental, Nok, RentalItem, RentalStatus};
pub use validation::FieldErrors;
