//! Demo data: the items on the stations and a renter's rentals.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ActiveRental, RentalItem};

/// Scan code printed on the demo drone.
pub const DEMO_SCAN_CODE: &str = "RELIVERY-123";

const STATION_OWNER: &str = "station-owner";
const PLACEHOLDER_SMALL: &str = "https://placehold.co/300x200.png";

fn item(id: &str, name: &str, description: &str, daily_rate: u32, hint: &str) -> RentalItem {
    RentalItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        image_url: PLACEHOLDER_SMALL.to_string(),
        owner_id: STATION_OWNER.to_string(),
        hourly_rate: None,
        daily_rate: Some(daily_rate),
        category: None,
        availability: true,
        location: None,
        qr_code_value: None,
        image_hint: Some(hint.to_string()),
    }
}

/// Every item the in-memory catalog starts with.
pub fn demo_items() -> Vec<RentalItem> {
    let mut washer = item(
        "item1",
        "Høytrykksspyler",
        "Kraftig Kärcher høytrykksspyler",
        200,
        "power washer",
    );
    washer.category = Some("Hage".to_string());
    washer.location = Some("Henteskap A3, Rema 1000 Nydalen".to_string());

    let mut toolkit = item(
        "item2",
        "Verktøysett",
        "Komplett verktøysett for hjemmefiksere",
        150,
        "tool kit",
    );
    toolkit.category = Some("Verktøy".to_string());
    toolkit.location = Some("Serviceskranke, Byggmakker".to_string());

    let mut drill = item("item5", "Boremaskin", "Bosch boremaskin", 160, "drill machine");
    drill.category = Some("Verktøy".to_string());

    vec![washer, toolkit, drill, drone()]
}

/// The item behind [`DEMO_SCAN_CODE`].
pub fn drone() -> RentalItem {
    RentalItem {
        id: "item-qr-123".to_string(),
        name: "Profesjonell Drone".to_string(),
        description: "DJI Mavic Pro drone med 4K kamera. Perfekt for profesjonelle \
                      videoopptak og inspeksjoner."
            .to_string(),
        image_url: "https://placehold.co/600x400.png".to_string(),
        owner_id: "owner-456".to_string(),
        hourly_rate: Some(75),
        daily_rate: Some(350),
        category: Some("Elektronikk".to_string()),
        availability: true,
        location: None,
        qr_code_value: Some(DEMO_SCAN_CODE.to_string()),
        image_hint: Some("drone aerial".to_string()),
    }
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn detail(id: &str) -> Option<RentalItem> {
    demo_items().into_iter().find(|item| item.id == id)
}

/// Two ongoing rentals and one returned rental for `renter_id`.
///
/// Rental ids are prefixed with the renter so several accounts can hold demo
/// data in the same ledger.
pub fn demo_rentals(renter_id: &str) -> Vec<ActiveRental> {
    let rental = |suffix: &str, item_id: &str, start: DateTime<Utc>, cost: u32| ActiveRental {
        id: format!("{renter_id}-{suffix}"),
        item_id: item_id.to_string(),
        renter_id: renter_id.to_string(),
        start_date: start,
        end_date: None,
        total_cost: Some(cost),
        item_details: detail(item_id),
    };

    let mut returned = rental("rh1", "item5", day(2023, 9, 1), 800);
    returned.end_date = Some(day(2023, 9, 5));

    vec![
        rental("r1", "item1", day(2023, 10, 1), 450),
        rental("r2", "item2", day(2023, 10, 5), 220),
        returned,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_drone_carries_a_scan_code() {
        let coded: Vec<_> = demo_items()
            .into_iter()
            .filter(|item| item.qr_code_value.is_some())
            .collect();
        assert_eq!(coded.len(), 1);
        assert_eq!(coded[0].name, "Profesjonell Drone");
    }

    #[test]
    fn test_demo_rentals_belong_to_renter() {
        let rentals = demo_rentals("abc");
        assert!(rentals.iter().all(|r| r.renter_id == "abc"));
        assert_eq!(rentals.iter().filter(|r| r.is_ongoing()).count(), 2);
        assert_eq!(rentals[2].item_name(), "Boremaskin");
        assert_eq!(rentals[2].end_date, Some(day(2023, 9, 5)));
    }
}
