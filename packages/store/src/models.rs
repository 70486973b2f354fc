//! # Domain models for rental items and rentals
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`RentalItem`] | A catalog entry that can be leased. Rates are whole kroner. |
//! | [`ActiveRental`] | A lease linking a renter to an item. Ongoing while `end_date` is `None`, historical afterwards. The item is denormalised into `item_details`. |
//! | [`RentalStatus`] | The badge shown on a rental card. |
//!
//! Relationships between items and rentals are kept by convention only; no
//! referential integrity is enforced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Amount in Norwegian kroner.
pub type Nok = u32;

/// A catalog entry available for time-bounded lease.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentalItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Owning party (a station or a private owner).
    pub owner_id: String,
    pub hourly_rate: Option<Nok>,
    pub daily_rate: Option<Nok>,
    pub category: Option<String>,
    pub availability: bool,
    /// Pickup / return point, e.g. "Henteskap A3, Rema 1000 Nydalen".
    pub location: Option<String>,
    /// Value printed in the item's QR code.
    pub qr_code_value: Option<String>,
    /// Short description of the image, used as alt text.
    pub image_hint: Option<String>,
}

impl RentalItem {
    /// Alt text for the item image.
    pub fn image_alt(&self) -> &str {
        self.image_hint.as_deref().unwrap_or("rental item")
    }
}

/// An open or closed lease record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveRental {
    pub id: String,
    pub item_id: String,
    pub renter_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// Accrued cost while ongoing, final cost once returned.
    pub total_cost: Option<Nok>,
    pub item_details: Option<RentalItem>,
}

impl ActiveRental {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn status(&self) -> RentalStatus {
        if self.is_ongoing() {
            RentalStatus::Ongoing
        } else {
            RentalStatus::History
        }
    }

    pub fn item_name(&self) -> &str {
        self.item_details
            .as_ref()
            .map(|item| item.name.as_str())
            .unwrap_or(&self.item_id)
    }

    /// Cost to charge when the rental ends at `ended_at`.
    ///
    /// An accrued cost wins. Otherwise the item's daily rate is charged per
    /// started day, with a minimum of one day.
    pub fn final_cost(&self, ended_at: DateTime<Utc>) -> Option<Nok> {
        if let Some(cost) = self.total_cost {
            return Some(cost);
        }
        let rate = self.item_details.as_ref()?.daily_rate?;
        Some(rate.saturating_mul(started_days(self.start_date, ended_at)))
    }
}

fn started_days(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let secs = u64::try_from((end - start).num_seconds()).unwrap_or(0);
    let days = secs.div_ceil(86_400).max(1);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Status badge of a rental card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalStatus {
    Ongoing,
    Available,
    RentedOut,
    Unavailable,
    History,
}

impl RentalStatus {
    /// Badge text, `None` for statuses without a badge.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Ongoing => Some("Pågående leie"),
            Self::Available => Some("Tilgjengelig"),
            Self::RentedOut => Some("Utleid"),
            Self::Unavailable => Some("Utilgjengelig"),
            Self::History => None,
        }
    }
}

/// `450` → `"450,- kr"`.
pub fn format_nok(amount: Nok) -> String {
    format!("{amount},- kr")
}

/// Norwegian short date, `01.10.2023`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rental(total_cost: Option<Nok>, daily_rate: Option<Nok>) -> ActiveRental {
        ActiveRental {
            id: "r".into(),
            item_id: "i".into(),
            renter_id: "u".into(),
            start_date: Utc.with_ymd_and_hms(2023, 10, 1, 12, 0, 0).unwrap(),
            end_date: None,
            total_cost,
            item_details: Some(RentalItem {
                id: "i".into(),
                name: "Drill".into(),
                description: String::new(),
                image_url: String::new(),
                owner_id: "o".into(),
                hourly_rate: None,
                daily_rate,
                category: None,
                availability: true,
                location: None,
                qr_code_value: None,
                image_hint: None,
            }),
        }
    }

    #[test]
    fn test_accrued_cost_is_kept() {
        let r = rental(Some(450), Some(200));
        let end = Utc.with_ymd_and_hms(2023, 10, 9, 12, 0, 0).unwrap();
        assert_eq!(r.final_cost(end), Some(450));
    }

    #[test]
    fn test_cost_charges_started_days() {
        let r = rental(None, Some(200));
        let end = Utc.with_ymd_and_hms(2023, 10, 3, 13, 0, 0).unwrap();
        assert_eq!(r.final_cost(end), Some(600));

        let same_hour = Utc.with_ymd_and_hms(2023, 10, 1, 12, 30, 0).unwrap();
        assert_eq!(r.final_cost(same_hour), Some(200));
    }

    #[test]
    fn test_cost_unknown_without_rate() {
        let r = rental(None, None);
        let end = Utc.with_ymd_and_hms(2023, 10, 3, 13, 0, 0).unwrap();
        assert_eq!(r.final_cost(end), None);
    }

    #[test]
    fn test_status_follows_end_date() {
        let mut r = rental(None, None);
        assert_eq!(r.status(), RentalStatus::Ongoing);
        r.end_date = Some(Utc::now());
        assert_eq!(r.status(), RentalStatus::History);
        assert_eq!(RentalStatus::History.label(), None);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_nok(350), "350,- kr");
        let d = Utc.with_ymd_and_hms(2023, 9, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(d), "05.09.2023");
    }
}
