//! # Return checklist
//!
//! Returning an item is a linear five-step form filled in at the station:
//! check-in, photo evidence, condition notes, rating, feedback. Only the first
//! two are required. Submitting closes the renter's open rental for the item.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{NaiveTime, Utc};

use crate::catalog::Catalog;
use crate::delay;
use crate::ledger::{LedgerError, RentalLedger};
use crate::models::{ActiveRental, RentalItem};
use crate::validation::FieldErrors;

pub const FIELD_LOCATION: &str = "location_confirmation";
pub const FIELD_PHOTO: &str = "photo_confirmation";

const DEFAULT_RETURN_POINT: &str = "Anvist retursted på gjenvinningsstasjonen";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnStep {
    CheckIn,
    Photo,
    ConditionNotes,
    Rating,
    Feedback,
}

impl ReturnStep {
    pub const ALL: [ReturnStep; 5] = [
        Self::CheckIn,
        Self::Photo,
        Self::ConditionNotes,
        Self::Rating,
        Self::Feedback,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CheckIn => "1. Bekreft ankomst til retursted",
            Self::Photo => "2. Bildebevis av gjenstand på anvist plass",
            Self::ConditionNotes => "3. Eventuelle merknader om tilstand (valgfritt)",
            Self::Rating => "4. Vurdering av leieobjektet (valgfritt)",
            Self::Feedback => "5. Tilbakemelding til eier (valgfritt)",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::CheckIn | Self::Photo)
    }
}

/// An image proving where the item was left.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoEvidence {
    pub file_name: String,
    pub content_type: String,
    /// `data:` URL with the encoded image, also used for the preview.
    pub data_url: String,
}

impl PhotoEvidence {
    /// A frame grabbed from the camera.
    pub fn captured(item_id: &str, data_url: String) -> Self {
        Self {
            file_name: format!("returbilde-{item_id}.png"),
            content_type: "image/png".to_string(),
            data_url,
        }
    }

    /// A file picked through the file input.
    pub fn chosen(file_name: String, content_type: String, data_url: String) -> Self {
        Self {
            file_name,
            content_type,
            data_url,
        }
    }
}

impl fmt::Debug for PhotoEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoEvidence")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("data_len", &self.data_url.len())
            .finish()
    }
}

/// Star rating, 1 to 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, ReturnError> {
        if (1..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(ReturnError::InvalidRating(stars))
        }
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ReturnError {
    #[error("Kunne ikke finne gjenstanden for retur.")]
    ItemNotFound(String),
    #[error("Vurderingen må være mellom 1 og 5.")]
    InvalidRating(u8),
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Local state of the return form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReturnForm {
    item_id: String,
    location_confirmation: Option<String>,
    photo: Option<PhotoEvidence>,
    pub condition_notes: String,
    rating: Option<Rating>,
    pub feedback: String,
}

impl ReturnForm {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ..Self::default()
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Records arrival at the item's return point and returns the
    /// confirmation line.
    pub fn check_in(&mut self, item: &RentalItem, at: NaiveTime) -> &str {
        let place = item.location.as_deref().unwrap_or(DEFAULT_RETURN_POINT);
        let line = format!("Registrert på: {place} kl. {}", at.format("%H:%M:%S"));
        self.location_confirmation.insert(line).as_str()
    }

    pub fn location_confirmation(&self) -> Option<&str> {
        self.location_confirmation.as_deref()
    }

    pub fn attach_photo(&mut self, photo: PhotoEvidence) {
        tracing::debug!(file_name = %photo.file_name, "return photo attached");
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    pub fn photo(&self) -> Option<&PhotoEvidence> {
        self.photo.as_ref()
    }

    pub fn set_rating(&mut self, stars: u8) -> Result<(), ReturnError> {
        self.rating = Some(Rating::new(stars)?);
        Ok(())
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Checks the required steps and builds the submission.
    pub fn validate(&self) -> Result<ReturnSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.location_confirmation.is_none() {
            errors.push(FIELD_LOCATION, "Registrering av ankomst er påkrevd.");
        }
        if self.photo.is_none() {
            errors.push(FIELD_PHOTO, "Bildebekreftelse er påkrevd.");
        }
        let (Some(location_confirmation), Some(photo)) =
            (self.location_confirmation.clone(), self.photo.clone())
        else {
            return Err(errors);
        };
        Ok(ReturnSubmission {
            item_id: self.item_id.clone(),
            location_confirmation,
            photo,
            condition_notes: optional_text(&self.condition_notes),
            rating: self.rating,
            feedback: optional_text(&self.feedback),
        })
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A validated return.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnSubmission {
    pub item_id: String,
    pub location_confirmation: String,
    pub photo: PhotoEvidence,
    pub condition_notes: Option<String>,
    pub rating: Option<Rating>,
    pub feedback: Option<String>,
}

/// Outcome of a submitted return.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnReceipt {
    pub item_name: String,
    /// The rental that was closed, if the renter had one open for the item.
    pub rental: Option<ActiveRental>,
}

impl ReturnReceipt {
    pub fn title(&self) -> &'static str {
        "Retur Registrert & Abonnement Avsluttet!"
    }

    pub fn description(&self) -> String {
        format!("{} er markert som returnert. Takk!", self.item_name)
    }
}

/// Backend collaborator of the return page.
pub trait ReturnService {
    fn load_item(&self, item_id: &str) -> impl Future<Output = Result<RentalItem, ReturnError>>;
    fn submit(
        &self,
        renter_id: &str,
        submission: ReturnSubmission,
    ) -> impl Future<Output = Result<ReturnReceipt, ReturnError>>;
}

/// Return service over the in-memory catalog and ledger, with fixed
/// latencies.
#[derive(Clone, Debug)]
pub struct SimulatedReturns<C, L> {
    catalog: C,
    ledger: L,
    item_delay: Duration,
    submit_delay: Duration,
}

impl<C, L> SimulatedReturns<C, L> {
    pub fn new(catalog: C, ledger: L, item_delay: Duration, submit_delay: Duration) -> Self {
        Self {
            catalog,
            ledger,
            item_delay,
            submit_delay,
        }
    }
}

impl<C: Catalog, L: RentalLedger> ReturnService for SimulatedReturns<C, L> {
    async fn load_item(&self, item_id: &str) -> Result<RentalItem, ReturnError> {
        delay::sleep(self.item_delay).await;
        self.catalog
            .item(item_id)
            .await
            .ok_or_else(|| ReturnError::ItemNotFound(item_id.to_string()))
    }

    async fn submit(
        &self,
        renter_id: &str,
        submission: ReturnSubmission,
    ) -> Result<ReturnReceipt, ReturnError> {
        tracing::info!(
            item_id = %submission.item_id,
            rating = ?submission.rating.map(|r| r.stars()),
            "submitting return"
        );
        delay::sleep(self.submit_delay).await;

        let item_name = match self.catalog.item(&submission.item_id).await {
            Some(item) => item.name,
            None => submission.item_id.clone(),
        };
        let rental = match self
            .ledger
            .open_rental_for_item(renter_id, &submission.item_id)
            .await
        {
            Some(open) => Some(self.ledger.close_rental(&open.id, Utc::now()).await?),
            None => {
                tracing::warn!(
                    item_id = %submission.item_id,
                    "no open rental for returned item"
                );
                None
            }
        };
        Ok(ReturnReceipt { item_name, rental })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::ledger::MemoryLedger;
    use crate::seed;

    fn service() -> (SimulatedReturns<MemoryCatalog, MemoryLedger>, MemoryLedger) {
        let ledger = MemoryLedger::new();
        let returns = SimulatedReturns::new(
            MemoryCatalog::new(),
            ledger.clone(),
            Duration::ZERO,
            Duration::ZERO,
        );
        (returns, ledger)
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 9).unwrap()
    }

    #[test]
    fn test_check_in_uses_item_location() {
        let items = seed::demo_items();
        let mut form = ReturnForm::new("item1");
        let line = form.check_in(&items[0], noon());
        assert_eq!(line, "Registrert på: Henteskap A3, Rema 1000 Nydalen kl. 12:05:09");

        let mut form = ReturnForm::new("item5");
        form.check_in(&items[2], noon());
        assert_eq!(
            form.location_confirmation(),
            Some("Registrert på: Anvist retursted på gjenvinningsstasjonen kl. 12:05:09")
        );
    }

    #[test]
    fn test_required_steps() {
        let form = ReturnForm::new("item1");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(FIELD_LOCATION),
            Some("Registrering av ankomst er påkrevd.")
        );
        assert_eq!(errors.get(FIELD_PHOTO), Some("Bildebekreftelse er påkrevd."));

        let mut form = ReturnForm::new("item1");
        form.check_in(&seed::demo_items()[0], noon());
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(FIELD_LOCATION).is_none());
    }

    #[test]
    fn test_rating_bounds() {
        let mut form = ReturnForm::new("item1");
        assert_eq!(form.set_rating(0), Err(ReturnError::InvalidRating(0)));
        assert_eq!(form.set_rating(6), Err(ReturnError::InvalidRating(6)));
        assert!(form.rating().is_none());
        form.set_rating(5).unwrap();
        assert_eq!(form.rating().map(|r| r.stars()), Some(5));
    }

    #[test]
    fn test_captured_photo_naming_and_debug_hides_data() {
        let photo = PhotoEvidence::captured("item2", "data:image/png;base64,AAAA".into());
        assert_eq!(photo.file_name, "returbilde-item2.png");
        assert_eq!(photo.content_type, "image/png");
        assert!(!format!("{photo:?}").contains("base64"));
    }

    #[test]
    fn test_optional_fields_are_trimmed() {
        let mut form = ReturnForm::new("item1");
        form.check_in(&seed::demo_items()[0], noon());
        form.attach_photo(PhotoEvidence::captured("item1", "data:".into()));
        form.condition_notes = "   ".into();
        form.feedback = " Alt ok ".into();
        let submission = form.validate().unwrap();
        assert_eq!(submission.condition_notes, None);
        assert_eq!(submission.feedback.as_deref(), Some("Alt ok"));
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let (returns, _) = service();
        let result = returns.load_item("nope").await;
        assert_eq!(result, Err(ReturnError::ItemNotFound("nope".into())));
        assert_eq!(
            ReturnError::ItemNotFound("nope".into()).to_string(),
            "Kunne ikke finne gjenstanden for retur."
        );
    }

    #[tokio::test]
    async fn test_submit_closes_open_rental() {
        let (returns, ledger) = service();
        ledger.seed_demo_for("u1");
        let item = returns.load_item("item2").await.unwrap();

        let mut form = ReturnForm::new(&item.id);
        form.check_in(&item, noon());
        form.attach_photo(PhotoEvidence::captured(&item.id, "data:".into()));
        let receipt = returns.submit("u1", form.validate().unwrap()).await.unwrap();

        assert_eq!(receipt.description(), "Verktøysett er markert som returnert. Takk!");
        let closed = receipt.rental.unwrap();
        assert!(closed.end_date.is_some());
        assert_eq!(closed.total_cost, Some(220));
        assert_eq!(ledger.ongoing_for("u1").await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_open_rental_still_succeeds() {
        let (returns, _) = service();
        let item = returns.load_item("item1").await.unwrap();
        let mut form = ReturnForm::new(&item.id);
        form.check_in(&item, noon());
        form.attach_photo(PhotoEvidence::captured(&item.id, "data:".into()));

        let receipt = returns.submit("u1", form.validate().unwrap()).await.unwrap();
        assert_eq!(receipt.item_name, "Høytrykksspyler");
        assert!(receipt.rental.is_none());
    }
}
