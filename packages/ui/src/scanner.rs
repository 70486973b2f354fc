use api::Navigation;
use chrono::Utc;
use dioxus::prelude::*;
use store::camera::CameraStatus;
use store::models::format_nok;
use store::scan::{ScanRequest, DEMO_SCAN_CODE};
use store::{RentalItem, RentalLedger};

use crate::camera::{toggle_camera, use_camera_panel};
use crate::components::{
    use_toast, Alert, AlertVariant, Badge, Button, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardHeader, CardTitle, Input, Label, Spinner, ToastOptions,
};
use crate::icons::{FaBolt, FaCalendarDays, FaCamera, FaCircleCheck, FaCircleXmark, FaQrcode, FaVideoSlash};
use crate::services::use_services;
use crate::{use_auth, Icon};

const VIDEO_ID: &str = "scan-camera";

/// "Skann & Lei": camera preview, simulated scan and manual code search.
#[component]
pub fn QrScanner() -> Element {
    let services = use_services();
    let toast = use_toast();
    let panel = use_camera_panel();

    let mut typed = use_signal(String::new);
    let mut scanned = use_signal(|| None::<RentalItem>);
    let mut loading = use_signal(|| false);

    let scanner = services.scanner();
    let lookup = use_callback(move |request: ScanRequest| {
        let scanner = scanner.clone();
        spawn(async move {
            loading.set(true);
            scanned.set(None);
            match scanner.resolve(&request).await {
                Ok(item) => {
                    toast.success(
                        "Gjenstand Funnet!".to_string(),
                        ToastOptions::new().description(item.name.clone()),
                    );
                    scanned.set(Some(item));
                }
                Err(err) => {
                    toast.error(
                        err.to_string(),
                        ToastOptions::new().description(err.detail().to_string()),
                    );
                }
            }
            loading.set(false);
        });
    });

    let status = panel.read().status();
    let starting = status == CameraStatus::Starting;
    let is_typed = !typed.read().trim().is_empty();

    rsx! {
        div { class: "stack-lg",
            Card {
                CardHeader {
                    CardTitle { class: "row",
                        span { class: "text-primary",
                            Icon { width: 28, height: 28, icon: FaQrcode }
                        }
                        "Skann & Lei"
                    }
                    CardDescription {
                        "Skann en Relivery QR-kode for å se detaljer og leie en gjenstand. For demonstrasjon, bruk simuleringsknappen eller skriv inn \"{DEMO_SCAN_CODE}\"."
                    }
                }
                CardContent { class: "stack",
                    div { class: "row wrap",
                        Button {
                            class: "grow",
                            variant: ButtonVariant::Outline,
                            disabled: starting,
                            onclick: move |_| toggle_camera(panel, VIDEO_ID),
                            if starting {
                                Spinner {}
                            } else {
                                Icon { width: 18, height: 18, icon: FaCamera }
                            }
                            if status.is_visible() { "Skjul Kamera" } else { "Åpne Kamera" }
                        }
                        Button {
                            class: "grow",
                            disabled: loading(),
                            onclick: move |_| lookup.call(ScanRequest::Simulated { typed: typed() }),
                            if loading() && !is_typed {
                                Spinner {}
                            } else {
                                Icon { width: 18, height: 18, icon: FaBolt }
                            }
                            "Simuler Skann ({DEMO_SCAN_CODE})"
                        }
                    }

                    if status.is_visible() {
                        div { class: "camera-frame",
                            video {
                                id: VIDEO_ID,
                                class: "camera-video",
                                autoplay: true,
                                muted: true,
                                playsinline: true,
                            }
                            if let Some((title, body)) = status.alert() {
                                Alert {
                                    variant: AlertVariant::Destructive,
                                    title: title.to_string(),
                                    description: body.to_string(),
                                    icon: rsx! { Icon { width: 18, height: 18, icon: FaVideoSlash } },
                                }
                            }
                            if status == CameraStatus::Live {
                                p { class: "muted small", "Pek kameraet mot en QR-kode." }
                            }
                        }
                    }

                    div { class: "row end",
                        div { class: "field grow",
                            Label { html_for: "qrInput", "Eller skriv inn QR-kode manuelt:" }
                            Input {
                                id: "qrInput",
                                value: typed(),
                                placeholder: "f.eks. {DEMO_SCAN_CODE}",
                                oninput: move |evt: FormEvent| typed.set(evt.value()),
                            }
                        }
                        Button {
                            disabled: loading() || !is_typed,
                            onclick: move |_| lookup.call(ScanRequest::Manual(typed())),
                            if loading() && is_typed {
                                Spinner {}
                            }
                            "Søk"
                        }
                    }
                }
            }

            if loading() && scanned.read().is_none() {
                div { class: "loading-row",
                    Spinner { class: "spinner-lg" }
                    p { "Leter etter gjenstand..." }
                }
            }

            if let Some(item) = scanned() {
                ScannedItemCard { item }
            }
        }
    }
}

#[component]
fn ScannedItemCard(item: RentalItem) -> Element {
    let services = use_services();
    let session = use_auth();
    let nav = use_navigator();
    let toast = use_toast();
    let mut starting = use_signal(|| false);

    let ledger = services.ledger.clone();
    let rented = item.clone();
    let onstart = move |_| {
        let ledger = ledger.clone();
        let rented = rented.clone();
        async move {
            let Some(user) = session().user else {
                nav.push(Navigation::Login.path());
                return;
            };
            starting.set(true);
            let result = ledger.start_rental(&user.id, &rented, Utc::now()).await;
            starting.set(false);
            match result {
                Ok(rental) => {
                    tracing::info!(rental = %rental.id, item = %rented.id, "rental started");
                    toast.success(
                        "Leieforhold Startet!".to_string(),
                        ToastOptions::new().description(rented.name.clone()),
                    );
                    nav.push(Navigation::Dashboard.path());
                }
                Err(err) => toast.error(
                    "Kunne ikke starte leieforhold".to_string(),
                    ToastOptions::new().description(err.to_string()),
                ),
            }
        }
    };

    let alt = item.image_alt().to_string();
    let hint = item.image_hint.clone().unwrap_or_else(|| "rental item".to_string());
    let daily = item.daily_rate.map(format_nok_short);
    let hourly = item.hourly_rate.map(format_nok_short);

    rsx! {
        Card { class: "item-card",
            CardHeader { class: "relative",
                img {
                    class: "item-image",
                    src: "{item.image_url}",
                    alt: "{alt}",
                    width: 600,
                    height: 400,
                    "data-ai-hint": "{hint}",
                }
                if item.availability {
                    Badge { class: "badge-corner badge-success",
                        Icon { width: 14, height: 14, icon: FaCircleCheck }
                        "Tilgjengelig"
                    }
                } else {
                    Badge { class: "badge-corner badge-destructive",
                        Icon { width: 14, height: 14, icon: FaCircleXmark }
                        "Utilgjengelig"
                    }
                }
            }
            CardContent { class: "stack-sm",
                CardTitle { "{item.name}" }
                CardDescription { "{item.description}" }
                div { class: "row wrap small",
                    if let Some(rate) = daily {
                        p { span { class: "price", "{rate}" } " kr/dag" }
                    }
                    if let Some(rate) = hourly {
                        p { span { class: "price", "{rate}" } " kr/time" }
                    }
                }
                if let Some(category) = item.category.as_deref() {
                    p { class: "muted small", "Kategori: {category}" }
                }
            }
            CardFooter {
                Button {
                    class: "w-full",
                    disabled: !item.availability || starting(),
                    onclick: onstart,
                    if starting() {
                        Spinner {}
                    } else {
                        Icon { width: 18, height: 18, icon: FaCalendarDays }
                    }
                    "Start Leieforhold"
                }
            }
        }
    }
}

/// `350,-` without the currency suffix; the unit follows in the label.
fn format_nok_short(amount: store::Nok) -> String {
    format_nok(amount).trim_end_matches(" kr").to_string()
}
