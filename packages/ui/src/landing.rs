use dioxus::prelude::*;

use crate::icons::{FaBolt, FaMagnifyingGlass, FaQrcode, FaThumbsUp};
use crate::{Icon, PublicHeader};

#[derive(Clone, Copy, PartialEq)]
enum StepIcon {
    Find,
    Scan,
    Activate,
    Done,
}

const STEPS: [(StepIcon, &str); 4] = [
    (StepIcon::Find, "Finn produktet"),
    (StepIcon::Scan, "Skann QR-koden"),
    (StepIcon::Activate, "Aktiver leie"),
    (StepIcon::Done, "Ferdig – bruk det du trenger!"),
];

#[component]
fn StepCard(number: usize, icon: StepIcon, title: String) -> Element {
    let glyph = match icon {
        StepIcon::Find => rsx! { Icon { width: 36, height: 36, icon: FaMagnifyingGlass } },
        StepIcon::Scan => rsx! { Icon { width: 36, height: 36, icon: FaQrcode } },
        StepIcon::Activate => rsx! { Icon { width: 36, height: 36, icon: FaBolt } },
        StepIcon::Done => rsx! { Icon { width: 36, height: 36, icon: FaThumbsUp } },
    };

    rsx! {
        div { class: "step-card",
            div { class: "step-icon",
                span { class: "step-number", "{number}" }
                div { class: "step-glyph", {glyph} }
            }
            h3 { class: "step-title", "{title}" }
        }
    }
}

/// The public front page.
#[component]
pub fn Landing() -> Element {
    let year = {
        use chrono::Datelike;
        chrono::Local::now().year()
    };

    rsx! {
        div { class: "landing",
            PublicHeader {}
            main { class: "landing-main",
                section { class: "container hero",
                    h1 { class: "hero-title", "Vi leier ut – sammen" }
                    p { class: "hero-lead",
                        "Vi begynner med å gjenbruke det vi har, og bygger veien videre herfra. Når du leier hos oss, gir du nytt liv til produkter som fortsatt virker – og gir andre mulighet til å reparere, bruke og sirkulere videre."
                    }
                    p { class: "hero-lead strong", "Enkelt for deg. Bra for alle." }
                    p { class: "muted", "Logg inn eller opprett en konto via knappene øverst for å komme i gang." }
                }
                section { class: "container steps",
                    h2 { class: "steps-title", "Så enkelt er det:" }
                    div { class: "step-grid",
                        for (index, (icon, title)) in STEPS.into_iter().enumerate() {
                            StepCard { key: "{index}", number: index + 1, icon, title: title.to_string() }
                        }
                    }
                }
            }
            footer { class: "landing-footer",
                p { "© {year} Relivery Simplified. Alle rettigheter reservert." }
                p { class: "small", "Sammen for en sirkulær fremtid!" }
            }
        }
    }
}
