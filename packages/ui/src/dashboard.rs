//! Dashboard widgets: the greeting with counts, and the rental tabs.

use api::{Navigation, UserInfo};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use store::models::{format_date, format_nok, RentalStatus};
use store::{ActiveRental, Nok, RentalItem, RentalLedger};

use crate::components::{
    Badge, Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Spinner,
};
use crate::icons::{
    FaBoxOpen, FaCalendarDays, FaCircleMinus, FaClock, FaClockRotateLeft, FaCoins, FaPenToSquare,
    FaPlus, FaQrcode, FaRepeat,
};
use crate::services::use_services;
use crate::{use_auth, Icon};

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x300.png";

#[derive(Clone, Debug, Default, PartialEq)]
struct Activity {
    ongoing: Vec<ActiveRental>,
    history: Vec<ActiveRental>,
}

/// Greeting, counts and both rental tabs for the signed-in renter.
#[component]
pub fn RenterDashboard() -> Element {
    let services = use_services();
    let session = use_auth();

    let ledger = services.ledger.clone();
    let activity = use_resource(move || {
        let ledger = ledger.clone();
        let user = session().user;
        async move {
            let user = user?;
            if ledger.seed_demo_for(&user.id) {
                tracing::debug!(renter = %user.id, "seeded demo rentals");
            }
            Some(Activity {
                ongoing: ledger.ongoing_for(&user.id).await,
                history: ledger.history_for(&user.id).await,
            })
        }
    });

    let user = session().user;
    let current = activity.read_unchecked().clone().flatten();
    let active_rentals = current.as_ref().map(|a| a.ongoing.len()).unwrap_or(0);

    rsx! {
        div { class: "stack-lg",
            ActivityOverview { user, active_rentals }
            match current {
                Some(activity) => rsx! {
                    ActivityTabs { ongoing: activity.ongoing, history: activity.history }
                },
                None => rsx! {
                    div { class: "loading-row",
                        Spinner { class: "spinner-lg" }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ActivityOverview(#[props(!optional)] user: Option<UserInfo>, active_rentals: usize) -> Element {
    let first_name = user
        .as_ref()
        .and_then(UserInfo::first_name)
        .unwrap_or("Bruker")
        .to_string();

    rsx! {
        div { class: "overview",
            h2 { class: "page-title",
                "Velkommen tilbake, "
                span { class: "text-primary", "{first_name}" }
                "!"
            }
            p { class: "muted", "Her er en rask oversikt over din Relivery-aktivitet." }
            div { class: "stat-grid",
                Card {
                    CardHeader { class: "row between",
                        CardTitle { class: "stat-title", "Aktive Leieforhold" }
                        span { class: "text-primary",
                            Icon { width: 22, height: 22, icon: FaBoxOpen }
                        }
                    }
                    CardContent {
                        div { class: "stat-value", "{active_rentals}" }
                    }
                }
                Card { class: "quick-links",
                    CardTitle { class: "centered", "Klar for mer?" }
                    div { class: "row wrap",
                        Link { class: "button button-primary grow", to: Navigation::Scan.path(),
                            Icon { width: 16, height: 16, icon: FaQrcode }
                            "Skann & Lei"
                        }
                        Link { class: "button button-outline grow", to: Navigation::ListItem.path(),
                            Icon { width: 16, height: 16, icon: FaPlus }
                            "List Nytt"
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Ongoing,
    History,
}

/// "Ting Jeg Leier" and "Historikk".
#[component]
pub fn ActivityTabs(ongoing: Vec<ActiveRental>, history: Vec<ActiveRental>) -> Element {
    let mut tab = use_signal(|| Tab::Ongoing);

    rsx! {
        div { class: "tabs",
            div { class: "tab-list", role: "tablist",
                button {
                    class: "tab-trigger",
                    role: "tab",
                    "data-state": if tab() == Tab::Ongoing { "active" } else { "inactive" },
                    onclick: move |_| tab.set(Tab::Ongoing),
                    Icon { width: 18, height: 18, icon: FaBoxOpen }
                    "Ting Jeg Leier"
                }
                button {
                    class: "tab-trigger",
                    role: "tab",
                    "data-state": if tab() == Tab::History { "active" } else { "inactive" },
                    onclick: move |_| tab.set(Tab::History),
                    Icon { width: 18, height: 18, icon: FaClockRotateLeft }
                    "Historikk"
                }
            }
            match tab() {
                Tab::Ongoing => rsx! {
                    div { class: "card-grid",
                        if ongoing.is_empty() {
                            EmptyState { message: "Du leier ingen gjenstander for øyeblikket.", offer_scan: true }
                        }
                        for rental in ongoing {
                            if let Some(item) = rental.item_details.clone() {
                                RentalCard {
                                    key: "{rental.id}",
                                    item,
                                    status: RentalStatus::Ongoing,
                                    start_date: rental.start_date,
                                    current_cost: rental.total_cost,
                                }
                            }
                        }
                    }
                },
                Tab::History => rsx! {
                    div { class: "stack-lg",
                        if history.is_empty() {
                            EmptyState { message: "Ingen tidligere leieforhold." }
                        }
                        for rental in history {
                            HistoryCard { key: "{rental.id}", rental }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn EmptyState(message: String, #[props(default)] offer_scan: bool) -> Element {
    rsx! {
        div { class: "empty-state",
            p { class: "muted", "{message}" }
            if offer_scan {
                Link { class: "button button-primary", to: Navigation::Scan.path(), "Skann & Lei" }
            }
        }
    }
}

#[component]
fn HistoryCard(rental: ActiveRental) -> Element {
    let item = rental.item_details.as_ref();
    let image = item
        .map(|i| i.image_url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let hint = item
        .and_then(|i| i.image_hint.clone())
        .unwrap_or_else(|| "rented item".to_string());
    let name = rental.item_name().to_string();
    let started = format_date(rental.start_date);
    let returned = rental
        .end_date
        .map(format_date)
        .unwrap_or_else(|| "Pågående".to_string());
    let total = rental
        .total_cost
        .map(format_nok)
        .unwrap_or_else(|| "N/A".to_string());

    rsx! {
        Card { class: "history-card",
            img {
                class: "history-image",
                src: "{image}",
                alt: "{name}",
                width: 200,
                height: 150,
                "data-ai-hint": "{hint}",
            }
            div { class: "history-body",
                CardTitle { "{name}" }
                p { class: "muted small", "Leid fra: {started}" }
                p { class: "muted small", "Returnert: {returned}" }
                p { class: "muted small", "Totalpris: {total}" }
            }
        }
    }
}

/// Item card with a status badge and the action that fits the status.
#[component]
pub fn RentalCard(
    item: RentalItem,
    status: Option<RentalStatus>,
    start_date: Option<DateTime<Utc>>,
    #[props(!optional)] current_cost: Option<Nok>,
) -> Element {
    let image = if item.image_url.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        item.image_url.clone()
    };
    let hint = item
        .image_hint
        .clone()
        .unwrap_or_else(|| "rental item".to_string());
    let badge = status.and_then(|s| s.label().map(|label| (badge_class(s), label)));
    let ongoing = status == Some(RentalStatus::Ongoing);
    let since = start_date.filter(|_| ongoing).map(format_date);
    let cost = current_cost.filter(|_| ongoing).map(format_nok);
    let daily = item.daily_rate.filter(|_| !ongoing);
    let hourly = item.hourly_rate.filter(|_| !ongoing);
    let return_path = Navigation::ReturnItem(item.id.clone()).path();

    rsx! {
        Card { class: "rental-card",
            CardHeader { class: "relative flush",
                img {
                    class: "rental-image",
                    src: "{image}",
                    alt: "{item.name}",
                    width: 400,
                    height: 225,
                    "data-ai-hint": "{hint}",
                }
                if let Some((tone, label)) = badge {
                    Badge { class: "badge-corner {tone}", "{label}" }
                }
            }
            CardContent { class: "grow",
                CardTitle { class: "truncate", "{item.name}" }
                CardDescription { class: "clamp", "{item.description}" }
                if let Some(since) = since {
                    p { class: "muted small row",
                        Icon { width: 14, height: 14, icon: FaCalendarDays }
                        "Leid siden: {since}"
                    }
                }
                if let Some(cost) = cost {
                    p { class: "small row strong",
                        span { class: "text-primary",
                            Icon { width: 14, height: 14, icon: FaCoins }
                        }
                        "Påløpt kostnad: {cost}"
                    }
                }
                if daily.is_some() || hourly.is_some() {
                    div { class: "row between small",
                        if let Some(rate) = daily {
                            p { span { class: "strong", "{rate},-" } " kr/dag" }
                        }
                        if let Some(rate) = hourly {
                            p { span { class: "strong", "{rate},-" } " kr/time" }
                        }
                    }
                }
            }
            CardFooter { class: "bordered",
                match status {
                    Some(RentalStatus::Ongoing) => rsx! {
                        Link { class: "button button-primary w-full", to: return_path,
                            Icon { width: 16, height: 16, icon: FaRepeat }
                            "Returner & Avslutt Leie"
                        }
                    },
                    Some(RentalStatus::Available) => rsx! {
                        Link { class: "button button-outline w-full", to: Navigation::ListItem.path(),
                            Icon { width: 16, height: 16, icon: FaPenToSquare }
                            "Administrer"
                        }
                    },
                    Some(RentalStatus::RentedOut) => rsx! {
                        Button { class: "w-full", variant: ButtonVariant::Outline, disabled: true,
                            Icon { width: 16, height: 16, icon: FaClock }
                            "Utleid"
                        }
                    },
                    Some(RentalStatus::Unavailable) => rsx! {
                        Button { class: "w-full", variant: ButtonVariant::Outline, disabled: true,
                            Icon { width: 16, height: 16, icon: FaCircleMinus }
                            "Utilgjengelig"
                        }
                    },
                    Some(RentalStatus::History) | None => rsx! {
                        Link { class: "button button-primary w-full", to: Navigation::Scan.path(),
                            "Vis & Lei"
                        }
                    },
                }
            }
        }
    }
}

fn badge_class(status: RentalStatus) -> &'static str {
    match status {
        RentalStatus::Ongoing => "badge-success",
        RentalStatus::Available => "badge-info",
        RentalStatus::RentedOut => "badge-secondary",
        RentalStatus::Unavailable | RentalStatus::History => "badge-outline",
    }
}
