//! Profile and password forms of the dashboard.

use api::account::{change_password, update_profile, AccountError};
use api::forms::{
    ChangePasswordForm, EditProfileForm, FIELD_CONFIRM_PASSWORD, FIELD_NAME, FIELD_NEW_PASSWORD,
};
use dioxus::prelude::*;
use store::FieldErrors;

use crate::components::{
    use_toast, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, FieldError,
    Input, Label, Spinner, ToastOptions,
};
use crate::services::use_services;
use crate::use_auth;

/// Field errors land under the inputs; anything else becomes a toast.
fn split_error(err: AccountError) -> Result<FieldErrors, AccountError> {
    match err {
        AccountError::Invalid(errors) => Ok(errors),
        other => Err(other),
    }
}

#[component]
pub fn EditProfileCard() -> Element {
    let services = use_services();
    let session = use_auth();
    let toast = use_toast();

    let mut form = use_signal(EditProfileForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

    // Refill whenever the signed-in user changes, e.g. after a rename.
    use_effect(move || {
        if let Some(user) = session().user {
            form.set(EditProfileForm::for_user(&user));
        }
    });

    let ctx = services.session.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        async move {
            busy.set(true);
            let submitted = form();
            let result = update_profile(ctx.provider(), &submitted).await;
            busy.set(false);
            match result {
                Ok(name) => {
                    errors.set(FieldErrors::new());
                    toast.success(
                        "Profil Oppdatert!".to_string(),
                        ToastOptions::new().description(format!("Navnet ditt er nå {name}.")),
                    );
                }
                Err(err) => match split_error(err) {
                    Ok(found) => errors.set(found),
                    Err(other) => toast.error(
                        "Feil".to_string(),
                        ToastOptions::new().description(other.to_string()),
                    ),
                },
            }
        }
    };

    let name_error = errors.read().get(FIELD_NAME).map(str::to_string);

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Rediger Profil" }
                CardDescription { "Oppdater ditt navn. E-postadressen kan ikke endres her." }
            }
            CardContent {
                form { class: "stack", onsubmit,
                    div { class: "field",
                        Label { html_for: "profile-name", "Navn" }
                        Input {
                            id: "profile-name",
                            r#type: "text",
                            value: form.read().name.clone(),
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                        FieldError { message: name_error }
                    }
                    div { class: "field",
                        Label { html_for: "profile-email", "E-post" }
                        Input {
                            id: "profile-email",
                            r#type: "email",
                            value: form.read().email().to_string(),
                            readonly: true,
                            disabled: true,
                        }
                    }
                    Button { r#type: "submit", disabled: busy(),
                        if busy() {
                            Spinner {}
                        }
                        "Lagre Endringer"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ChangePasswordCard() -> Element {
    let services = use_services();
    let toast = use_toast();

    let mut form = use_signal(ChangePasswordForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);

    let ctx = services.session.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        async move {
            busy.set(true);
            let mut submitted = form();
            let result = change_password(ctx.provider(), &mut submitted).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    form.set(submitted);
                    errors.set(FieldErrors::new());
                    toast.success(
                        "Passord Oppdatert!".to_string(),
                        ToastOptions::new().description("Passordet ditt er endret.".to_string()),
                    );
                }
                Err(err) => match split_error(err) {
                    Ok(found) => errors.set(found),
                    Err(other) => toast.error(
                        "Feil ved passordendring".to_string(),
                        ToastOptions::new().description(other.to_string()),
                    ),
                },
            }
        }
    };

    let new_error = errors.read().get(FIELD_NEW_PASSWORD).map(str::to_string);
    let confirm_error = errors.read().get(FIELD_CONFIRM_PASSWORD).map(str::to_string);

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Endre Passord" }
                CardDescription { "Oppdater passordet for din konto. Velg et sterkt og unikt passord." }
            }
            CardContent {
                form { class: "stack", onsubmit,
                    div { class: "field",
                        Label { html_for: "new-password", "Nytt Passord" }
                        Input {
                            id: "new-password",
                            r#type: "password",
                            value: form.read().new_password.clone(),
                            oninput: move |evt: FormEvent| form.write().new_password = evt.value(),
                        }
                        FieldError { message: new_error }
                    }
                    div { class: "field",
                        Label { html_for: "confirm-password", "Bekreft Nytt Passord" }
                        Input {
                            id: "confirm-password",
                            r#type: "password",
                            value: form.read().confirm_password.clone(),
                            oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                        }
                        FieldError { message: confirm_error }
                    }
                    Button { r#type: "submit", disabled: busy(),
                        if busy() {
                            Spinner {}
                        }
                        "Oppdater Passord"
                    }
                }
            }
        }
    }
}
