//! The five-step return checklist at `/return-item/:id`.

use api::Navigation;
use chrono::Local;
use dioxus::prelude::*;
use store::camera::CameraStatus;
use store::returns::{
    PhotoEvidence, Rating, ReturnError, ReturnForm, ReturnService, ReturnStep, FIELD_LOCATION,
    FIELD_PHOTO,
};
use store::{FieldErrors, RentalItem};

use crate::camera::{capture_frame, read_picked_file, toggle_camera, use_camera_panel};
use crate::components::{
    use_toast, Alert, AlertVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, FieldError, Input, Label, Spinner, Textarea, ToastOptions,
};
use crate::icons::{FaCamera, FaCircleCheck, FaLocationDot, FaStar, FaVideo, FaVideoSlash};
use crate::services::use_services;
use crate::{use_auth, Icon};

const VIDEO_ID: &str = "return-camera";
const FILE_INPUT_ID: &str = "photoConfirmationInput";

#[component]
pub fn ReturnProcessForm(item_id: String) -> Element {
    let services = use_services();

    // Keep the id in a signal so the item reloads when the route param changes.
    let mut id_signal = use_signal(|| item_id.clone());
    if *id_signal.peek() != item_id {
        id_signal.set(item_id.clone());
    }

    let returns = services.returns();
    let item = use_resource(move || {
        let returns = returns.clone();
        let id = id_signal();
        async move { returns.load_item(&id).await }
    });

    match &*item.read_unchecked() {
        None => rsx! {
            div { class: "loading-row",
                Spinner { class: "spinner-lg" }
                p { "Laster gjenstandsdetaljer..." }
            }
        },
        Some(Err(err)) => rsx! {
            Card {
                CardContent {
                    p { class: "text-destructive centered", "{err}" }
                }
            }
        },
        Some(Ok(found)) => rsx! {
            ReturnChecklist { key: "{found.id}", item: found.clone() }
        },
    }
}

#[component]
fn ReturnChecklist(item: RentalItem) -> Element {
    let services = use_services();
    let session = use_auth();
    let nav = use_navigator();
    let toast = use_toast();
    let mut panel = use_camera_panel();

    let mut form = use_signal(|| ReturnForm::new(item.id.clone()));
    let mut errors = use_signal(FieldErrors::new);
    let mut submitting = use_signal(|| false);

    let checked_in = item.clone();
    let on_check_in = move |_| {
        form.write().check_in(&checked_in, Local::now().time());
        errors.write().clear(FIELD_LOCATION);
        toast.success(
            "Ankomst Registrert".to_string(),
            ToastOptions::new().description("Din ankomst er bekreftet (simulert).".to_string()),
        );
    };

    let snap_id = item.id.clone();
    let on_snap = move |_| {
        let snap_id = snap_id.clone();
        async move {
            let Some(data_url) = capture_frame(VIDEO_ID).await else {
                toast.error(
                    "Kunne ikke ta bilde".to_string(),
                    ToastOptions::new().description("Kameraet har ikke levert noe bilde ennå.".to_string()),
                );
                return;
            };
            form.write().attach_photo(PhotoEvidence::captured(&snap_id, data_url));
            errors.write().clear(FIELD_PHOTO);
            panel.write().close();
            toast.success(
                "Bilde tatt!".to_string(),
                ToastOptions::new().description("Bildet er lagt til i returskjemaet.".to_string()),
            );
        }
    };

    let on_file = move |_| async move {
        match read_picked_file(FILE_INPUT_ID).await {
            Some(file) => {
                form.write()
                    .attach_photo(PhotoEvidence::chosen(file.name, file.content_type, file.data));
                errors.write().clear(FIELD_PHOTO);
            }
            None => form.write().clear_photo(),
        }
    };

    let returns = services.returns();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let returns = returns.clone();
        async move {
            let submission = match form.read().validate() {
                Ok(submission) => submission,
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
            submitting.set(true);
            let result = returns.submit(&user.id, submission).await;
            submitting.set(false);
            match result {
                Ok(receipt) => {
                    toast.success(
                        receipt.title().to_string(),
                        ToastOptions::new().description(receipt.description()),
                    );
                    nav.push(Navigation::Dashboard.path());
                }
                Err(ReturnError::Invalid(found)) => errors.set(found),
                Err(err) => toast.error(
                    "Feil".to_string(),
                    ToastOptions::new().description(err.to_string()),
                ),
            }
        }
    };

    let status = panel.read().status();
    let camera_starting = status == CameraStatus::Starting;
    let confirmation = form.read().location_confirmation().map(str::to_string);
    let preview = form.read().photo().map(|photo| photo.data_url.clone());
    let stars = form.read().rating().map(|r| r.stars()).unwrap_or(0);
    let location_error = errors.read().get(FIELD_LOCATION).map(str::to_string);
    let photo_error = errors.read().get(FIELD_PHOTO).map(str::to_string);
    let hint = item.image_hint.clone().unwrap_or_else(|| "rental item".to_string());
    let [arrive, photo_step, notes_step, rating_step, feedback_step] = ReturnStep::ALL.map(|s| s.label());

    rsx! {
        Card { class: "narrow",
            CardHeader {
                CardTitle { "Returner: {item.name}" }
                if !item.image_url.is_empty() {
                    img {
                        class: "return-image",
                        src: "{item.image_url}",
                        alt: "{item.name}",
                        width: 400,
                        height: 250,
                        "data-ai-hint": "{hint}",
                    }
                }
                CardDescription {
                    "Følg stegene nedenfor for å fullføre returen og avslutte leieforholdet. Dette må gjøres på gjenvinningsstasjonen."
                }
            }
            form { onsubmit,
                CardContent { class: "stack-lg",
                    div { class: "field",
                        Label { "{arrive}" }
                        if let Some(location) = item.location.as_deref() {
                            p { class: "muted small",
                                "Avtalt retursted: "
                                strong { "{location}" }
                            }
                        }
                        Button {
                            r#type: "button",
                            class: "w-full",
                            variant: ButtonVariant::Outline,
                            onclick: on_check_in,
                            Icon { width: 16, height: 16, icon: FaLocationDot }
                            "Registrer Ankomst (Simulert)"
                        }
                        if let Some(line) = confirmation {
                            p { class: "text-success small", "{line}" }
                        }
                        FieldError { message: location_error }
                    }

                    div { class: "field",
                        Label { html_for: FILE_INPUT_ID, "{photo_step}" }
                        div { class: "row wrap",
                            Button {
                                r#type: "button",
                                class: "grow",
                                variant: ButtonVariant::Outline,
                                disabled: camera_starting,
                                onclick: move |_| toggle_camera(panel, VIDEO_ID),
                                if camera_starting {
                                    Spinner {}
                                } else {
                                    Icon { width: 16, height: 16, icon: FaVideo }
                                }
                                if status.is_visible() { "Skjul Kamera" } else { "Åpne Kamera" }
                            }
                            Input {
                                id: FILE_INPUT_ID,
                                class: "grow",
                                r#type: "file",
                                accept: "image/*",
                                onchange: on_file,
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
                                        description: format!("{body} Du kan også laste opp en fil manuelt."),
                                        icon: rsx! { Icon { width: 18, height: 18, icon: FaVideoSlash } },
                                    }
                                }
                                if status == CameraStatus::Live {
                                    Button {
                                        r#type: "button",
                                        class: "w-full",
                                        onclick: on_snap,
                                        Icon { width: 16, height: 16, icon: FaCamera }
                                        "Ta Bilde & Bruk"
                                    }
                                }
                            }
                        }
                        if let Some(src) = preview {
                            img {
                                class: "photo-preview",
                                src: "{src}",
                                alt: "Forhåndsvisning av bilde",
                                width: 200,
                                height: 150,
                                "data-ai-hint": "item condition",
                            }
                        }
                        FieldError { message: photo_error }
                    }

                    div { class: "field",
                        Label { html_for: "conditionNotes", "{notes_step}" }
                        Textarea {
                            id: "conditionNotes",
                            placeholder: "F.eks. Normal slitasje, liten ripe på venstre side...",
                            value: form.read().condition_notes.clone(),
                            oninput: move |evt: FormEvent| form.write().condition_notes = evt.value(),
                        }
                    }

                    div { class: "field divided",
                        Label { "{rating_step}" }
                        StarRating {
                            value: stars,
                            onrate: move |star: u8| {
                                if let Err(err) = form.write().set_rating(star) {
                                    tracing::warn!("{err}");
                                }
                            },
                        }
                    }

                    div { class: "field",
                        Label { html_for: "feedback", "{feedback_step}" }
                        Textarea {
                            id: "feedback",
                            placeholder: "Var alt som forventet? Noe eier bør vite?",
                            value: form.read().feedback.clone(),
                            oninput: move |evt: FormEvent| form.write().feedback = evt.value(),
                        }
                    }
                }
                CardFooter {
                    Button { r#type: "submit", class: "w-full", disabled: submitting(),
                        if submitting() {
                            Spinner {}
                        } else {
                            Icon { width: 16, height: 16, icon: FaCircleCheck }
                        }
                        "Fullfør Retur & Avslutt Leieforhold"
                    }
                }
            }
        }
    }
}

/// One to five stars; hovering previews a rating.
#[component]
fn StarRating(value: u8, onrate: EventHandler<u8>) -> Element {
    let mut hover = use_signal(|| 0u8);
    let shown = if hover() > 0 { hover() } else { value };

    rsx! {
        div { class: "stars", onmouseleave: move |_| hover.set(0),
            for star in 1..=Rating::MAX {
                button {
                    key: "{star}",
                    r#type: "button",
                    class: if shown >= star { "star filled" } else { "star" },
                    "aria-label": "{star} av 5",
                    onmouseenter: move |_| hover.set(star),
                    onclick: move |_| onrate.call(star),
                    Icon { width: 28, height: 28, icon: FaStar }
                }
            }
        }
    }
}
