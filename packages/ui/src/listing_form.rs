use api::Navigation;
use dioxus::prelude::*;
use store::listing::{
    ListingDraft, ListingService, SuggestionService, CATEGORIES, FIELD_CATEGORY,
    FIELD_DESCRIPTION, FIELD_NAME, FIELD_PRICE,
};
use store::FieldErrors;

use crate::components::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    FieldError, Input, Label, Spinner, Textarea, ToastOptions,
};
use crate::icons::FaWandMagicSparkles;
use crate::services::use_services;
use crate::{use_auth, Icon};

/// Shown at `/list-item` while listing is switched off.
#[component]
pub fn ListingDisabled() -> Element {
    rsx! {
        div { class: "centered stack",
            h1 { class: "page-title", "Funksjon Deaktivert" }
            p { class: "muted",
                "Muligheten for å liste nye gjenstander for utleie er for øyeblikket ikke tilgjengelig."
            }
        }
    }
}

#[component]
pub fn ListItemForm() -> Element {
    let services = use_services();
    let session = use_auth();
    let nav = use_navigator();
    let toast = use_toast();

    let mut draft = use_signal(ListingDraft::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut suggesting = use_signal(|| false);
    let mut publishing = use_signal(|| false);

    let suggestions = services.suggestions();
    let onsuggest = move |_| {
        let suggestions = suggestions.clone();
        async move {
            suggesting.set(true);
            let name = draft.read().name.clone();
            let result = suggestions.suggest(&name).await;
            suggesting.set(false);
            match result {
                Ok(suggestion) => {
                    draft.write().apply(&suggestion);
                    errors.write().clear(FIELD_CATEGORY);
                    toast.success(
                        "Forslag Klart!".to_string(),
                        ToastOptions::new()
                            .description(format!("Foreslått kategori: {}", suggestion.category)),
                    );
                }
                Err(err) => toast.error(
                    "Ingen forslag".to_string(),
                    ToastOptions::new().description(err.to_string()),
                ),
            }
        }
    };

    let listings = services.listings.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let listings = listings.clone();
        async move {
            let listing = match draft.read().validate() {
                Ok(listing) => listing,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            let Some(user) = session().user else {
                nav.push(Navigation::Login.path());
                return;
            };
            publishing.set(true);
            let result = listings.publish(&user.id, listing).await;
            publishing.set(false);
            match result {
                Ok(item) => {
                    toast.success(
                        "Gjenstand Listet!".to_string(),
                        ToastOptions::new().description(format!("{} er nå tilgjengelig for utleie.", item.name)),
                    );
                    draft.set(ListingDraft::default());
                    nav.push(Navigation::Dashboard.path());
                }
                Err(err) => toast.error(
                    "Feil".to_string(),
                    ToastOptions::new().description(err.to_string()),
                ),
            }
        }
    };

    let error_for = move |field: &str| errors.read().get(field).map(str::to_string);
    let selected = draft.read().category.clone();

    rsx! {
        Card { class: "narrow",
            CardHeader {
                CardTitle { "List en Gjenstand" }
                CardDescription { "Leie ut noe du eier. Fyll inn detaljene nedenfor." }
            }
            CardContent {
                form { class: "stack", onsubmit,
                    div { class: "field",
                        Label { html_for: "listing-name", "Navn på gjenstand" }
                        div { class: "row",
                            Input {
                                id: "listing-name",
                                class: "grow",
                                placeholder: "f.eks. Slagdrill",
                                value: draft.read().name.clone(),
                                oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                            }
                            Button {
                                r#type: "button",
                                variant: ButtonVariant::Outline,
                                disabled: suggesting(),
                                onclick: onsuggest,
                                if suggesting() {
                                    Spinner {}
                                } else {
                                    Icon { width: 16, height: 16, icon: FaWandMagicSparkles }
                                }
                                "Foreslå"
                            }
                        }
                        FieldError { message: error_for(FIELD_NAME) }
                    }
                    div { class: "field",
                        Label { html_for: "listing-description", "Beskrivelse" }
                        Textarea {
                            id: "listing-description",
                            placeholder: "Beskriv tilstand, tilbehør og annet leietakeren bør vite.",
                            value: draft.read().description.clone(),
                            oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                        }
                        FieldError { message: error_for(FIELD_DESCRIPTION) }
                    }
                    div { class: "field",
                        Label { html_for: "listing-category", "Kategori" }
                        select {
                            id: "listing-category",
                            class: "select",
                            value: "{selected}",
                            onchange: move |evt: FormEvent| draft.write().category = evt.value(),
                            option { value: "", disabled: true, selected: selected.is_empty(), "Velg kategori" }
                            for category in CATEGORIES {
                                option {
                                    key: "{category}",
                                    value: category,
                                    selected: selected == category,
                                    "{category}"
                                }
                            }
                        }
                        FieldError { message: error_for(FIELD_CATEGORY) }
                    }
                    div { class: "field",
                        Label { html_for: "listing-price", "Pris per dag (kr)" }
                        Input {
                            id: "listing-price",
                            r#type: "number",
                            min: "1",
                            placeholder: "150",
                            value: draft.read().daily_rate.clone(),
                            oninput: move |evt: FormEvent| draft.write().daily_rate = evt.value(),
                        }
                        FieldError { message: error_for(FIELD_PRICE) }
                    }
                    Button { r#type: "submit", class: "w-full", disabled: publishing(),
                        if publishing() {
                            Spinner {}
                        }
                        "List Gjenstand"
                    }
                }
            }
        }
    }
}
