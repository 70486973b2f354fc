//! # Listing an item for rent
//!
//! The draft form, a mocked category/description suggestion and a simulated
//! publish step. The route is behind `features.listing_enabled`.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::delay;
use crate::models::{Nok, RentalItem};
use crate::validation::{char_len, FieldErrors};

pub const CATEGORIES: [&str; 6] = [
    "Elektronikk",
    "Verktøy",
    "Hage",
    "Sport & Fritid",
    "Kjøkken",
    "Annet",
];

pub const FALLBACK_CATEGORY: &str = "Annet";

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_PRICE: &str = "daily_rate";

const MIN_NAME: usize = 3;
const MIN_DESCRIPTION: usize = 10;

const KEYWORDS: &[(&str, &str)] = &[
    ("drone", "Elektronikk"),
    ("kamera", "Elektronikk"),
    ("projektor", "Elektronikk"),
    ("høyttaler", "Elektronikk"),
    ("bore", "Verktøy"),
    ("drill", "Verktøy"),
    ("sag", "Verktøy"),
    ("verktøy", "Verktøy"),
    ("stige", "Verktøy"),
    ("gress", "Hage"),
    ("hage", "Hage"),
    ("spyler", "Hage"),
    ("løvblåser", "Hage"),
    ("sykkel", "Sport & Fritid"),
    ("telt", "Sport & Fritid"),
    ("ski", "Sport & Fritid"),
    ("kajakk", "Sport & Fritid"),
    ("miksmaster", "Kjøkken"),
    ("vaffel", "Kjøkken"),
    ("kjøkken", "Kjøkken"),
];

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ListingError {
    #[error("Skriv inn et navn på minst 3 tegn for å få forslag.")]
    NameTooShort,
    #[error("{0}")]
    Invalid(FieldErrors),
}

/// The listing form as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    /// NOK per day, as typed.
    pub daily_rate: String,
}

/// A draft that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidListing {
    pub name: String,
    pub description: String,
    pub category: String,
    pub daily_rate: Nok,
}

impl ListingDraft {
    pub fn validate(&self) -> Result<ValidListing, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        let description = self.description.trim();

        if char_len(name) < MIN_NAME {
            errors.push(FIELD_NAME, "Navn må være minst 3 tegn");
        }
        if char_len(description) < MIN_DESCRIPTION {
            errors.push(FIELD_DESCRIPTION, "Beskrivelse må være minst 10 tegn");
        }
        if !CATEGORIES.contains(&self.category.as_str()) {
            errors.push(FIELD_CATEGORY, "Velg en kategori");
        }
        let daily_rate = match self.daily_rate.trim().parse::<Nok>() {
            Ok(rate) if rate > 0 => rate,
            _ => {
                errors.push(FIELD_PRICE, "Pris må være større enn 0");
                0
            }
        };

        errors.into_result(ValidListing {
            name: name.to_string(),
            description: description.to_string(),
            category: self.category.clone(),
            daily_rate,
        })
    }

    /// Takes over a suggestion; the description is only filled in when empty.
    pub fn apply(&mut self, suggestion: &Suggestion) {
        self.category = suggestion.category.clone();
        if self.description.trim().is_empty() {
            self.description = suggestion.description.clone();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub category: String,
    pub description: String,
}

/// Category by keyword in the item name.
pub fn suggest_category(name: &str) -> &'static str {
    let lowered = name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

pub trait SuggestionService {
    fn suggest(&self, name: &str) -> impl Future<Output = Result<Suggestion, ListingError>>;
}

/// Fabricates a suggestion from the name after a fixed delay.
#[derive(Clone, Debug)]
pub struct SimulatedSuggestions {
    delay: Duration,
}

impl SimulatedSuggestions {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SuggestionService for SimulatedSuggestions {
    async fn suggest(&self, name: &str) -> Result<Suggestion, ListingError> {
        let name = name.trim();
        if char_len(name) < MIN_NAME {
            return Err(ListingError::NameTooShort);
        }
        delay::sleep(self.delay).await;
        let category = suggest_category(name);
        tracing::debug!(name, category, "suggested listing category");
        Ok(Suggestion {
            category: category.to_string(),
            description: format!(
                "{name} i god stand, klar for utleie. Passer for alle som trenger \
                 {} en kort periode.",
                article(category)
            ),
        })
    }
}

fn article(category: &str) -> &'static str {
    match category {
        "Verktøy" => "godt verktøy i",
        "Hage" => "hjelp i hagen i",
        _ => "utstyr i",
    }
}

pub trait ListingService {
    fn publish(
        &self,
        owner_id: &str,
        listing: ValidListing,
    ) -> impl Future<Output = Result<RentalItem, ListingError>>;
}

/// Adds published listings to the in-memory catalog.
#[derive(Clone, Debug)]
pub struct SimulatedListings<C> {
    catalog: C,
    delay: Duration,
    counter: Arc<AtomicU64>,
}

impl<C> SimulatedListings<C> {
    pub fn new(catalog: C, delay: Duration) -> Self {
        Self {
            catalog,
            delay,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<C: Catalog> ListingService for SimulatedListings<C> {
    async fn publish(&self, owner_id: &str, listing: ValidListing) -> Result<RentalItem, ListingError> {
        delay::sleep(self.delay).await;
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let item = RentalItem {
            id: format!("listing-{owner_id}-{n}"),
            name: listing.name,
            description: listing.description,
            image_url: "https://placehold.co/300x200.png".to_string(),
            owner_id: owner_id.to_string(),
            hourly_rate: None,
            daily_rate: Some(listing.daily_rate),
            category: Some(listing.category),
            availability: true,
            location: None,
            qr_code_value: None,
            image_hint: None,
        };
        self.catalog.add_item(item.clone()).await;
        tracing::info!(item_id = %item.id, "listing published");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;

    fn draft() -> ListingDraft {
        ListingDraft {
            name: "Slagdrill".into(),
            description: "Kraftig drill med to batterier".into(),
            category: "Verktøy".into(),
            daily_rate: "120".into(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let listing = draft().validate().unwrap();
        assert_eq!(listing.daily_rate, 120);
    }

    #[test]
    fn test_each_rule() {
        let bad = ListingDraft {
            name: "Ab".into(),
            description: "kort".into(),
            category: "Biler".into(),
            daily_rate: "0".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Navn må være minst 3 tegn"));
        assert_eq!(
            errors.get(FIELD_DESCRIPTION),
            Some("Beskrivelse må være minst 10 tegn")
        );
        assert_eq!(errors.get(FIELD_CATEGORY), Some("Velg en kategori"));
        assert_eq!(errors.get(FIELD_PRICE), Some("Pris må være større enn 0"));

        let mut text_price = draft();
        text_price.daily_rate = "gratis".into();
        assert!(text_price.validate().unwrap_err().get(FIELD_PRICE).is_some());
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(suggest_category("Profesjonell Drone"), "Elektronikk");
        assert_eq!(suggest_category("Høytrykksspyler"), "Hage");
        assert_eq!(suggest_category("Boremaskin"), "Verktøy");
        assert_eq!(suggest_category("Paraply"), FALLBACK_CATEGORY);
    }

    #[tokio::test]
    async fn test_short_name_rejected_before_delay() {
        // An hour-long delay would hang the test if it were awaited.
        let service = SimulatedSuggestions::new(Duration::from_secs(3600));
        assert_eq!(service.suggest("ab").await, Err(ListingError::NameTooShort));
    }

    #[tokio::test]
    async fn test_suggestion_fills_empty_description() {
        let service = SimulatedSuggestions::new(Duration::ZERO);
        let suggestion = service.suggest("Telt for fire").await.unwrap();
        assert_eq!(suggestion.category, "Sport & Fritid");

        let mut form = ListingDraft {
            name: "Telt for fire".into(),
            ..ListingDraft::default()
        };
        form.apply(&suggestion);
        assert_eq!(form.category, "Sport & Fritid");
        assert!(form.description.starts_with("Telt for fire"));

        let mut typed = draft();
        typed.apply(&suggestion);
        assert_eq!(typed.description, draft().description);
    }

    #[tokio::test]
    async fn test_publish_adds_to_catalog_without_scan_code() {
        let catalog = MemoryCatalog::with_items(Vec::new());
        let listings = SimulatedListings::new(catalog.clone(), Duration::ZERO);
        let item = listings
            .publish("u1", draft().validate().unwrap())
            .await
            .unwrap();

        let stored = catalog.item(&item.id).await.unwrap();
        assert_eq!(stored.owner_id, "u1");
        assert_eq!(stored.daily_rate, Some(120));
        assert!(stored.qr_code_value.is_none());
    }
}
