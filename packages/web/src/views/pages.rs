//! Signed-in pages outside the dashboard chrome.

use api::Navigation;
use dioxus::prelude::*;
use ui::{use_services, ListItemForm, ListingDisabled, Logo, QrScanner, ReturnProcessForm};

#[component]
fn PageFrame(children: Element) -> Element {
    rsx! {
        header { class: "public-header",
            div { class: "container row between",
                Logo {}
                Link { class: "button button-ghost", to: Navigation::Dashboard.path(), "Min Side" }
            }
        }
        div { class: "container page", {children} }
    }
}

#[component]
pub fn Scan() -> Element {
    rsx! {
        PageFrame {
            QrScanner {}
        }
    }
}

#[component]
pub fn ListItem() -> Element {
    let services = use_services();
    let enabled = services.config.features.listing_enabled;

    rsx! {
        PageFrame {
            if enabled {
                ListItemForm {}
            } else {
                ListingDisabled {}
            }
        }
    }
}

#[component]
pub fn ReturnItem(id: String) -> Element {
    rsx! {
        PageFrame {
            if id.trim().is_empty() {
                p { class: "text-destructive centered", "Gjenstand-ID mangler i URL." }
            } else {
                ReturnProcessForm { item_id: id.clone() }
            }
        }
    }
}
