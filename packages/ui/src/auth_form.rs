use api::account::request_password_reset;
use api::forms::{LoginForm, SignupForm, FIELD_EMAIL, FIELD_NAME, FIELD_PASSWORD};
use dioxus::prelude::*;
use store::FieldErrors;

use crate::components::{
    use_toast, Button, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, FieldError, Input, Label, Spinner, ToastOptions,
};
use crate::services::use_services;
use crate::use_auth;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// Login and signup card. A signed-in visitor is sent on to the dashboard.
#[component]
pub fn AuthForm(mode: AuthMode) -> Element {
    let is_login = mode == AuthMode::Login;
    let services = use_services();
    let session = use_auth();
    let nav = use_navigator();
    let toast = use_toast();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut busy = use_signal(|| false);
    let mut resetting = use_signal(|| false);

    use_effect(move || {
        if session().already_signed_in() {
            nav.replace(api::Navigation::Dashboard.path());
        }
    });

    let ctx = services.session.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let ctx = ctx.clone();
        async move {
            let checked = if is_login {
                LoginForm {
                    email: email(),
                    password: password(),
                }
                .validate()
            } else {
                SignupForm {
                    name: name(),
                    email: email(),
                    password: password(),
                }
                .validate()
            };
            if let Err(found) = checked {
                errors.set(found);
                return;
            }
            errors.set(FieldErrors::new());
            busy.set(true);

            let result = if is_login {
                ctx.login(&email(), &password()).await
            } else {
                ctx.signup(&name(), &email(), &password()).await
            };
            busy.set(false);
            match result {
                Ok(target) => {
                    let (title, description) = if is_login {
                        ("Vellykket innlogging!", "Velkommen tilbake.")
                    } else {
                        ("Registrering vellykket!", "Velkommen til Relivery.")
                    };
                    toast.success(
                        title.to_string(),
                        ToastOptions::new().description(description.to_string()),
                    );
                    nav.push(target.path());
                }
                Err(err) => {
                    toast.error(
                        "Feil".to_string(),
                        ToastOptions::new().description(err.to_string()),
                    );
                }
            }
        }
    };

    let provider = services.session.clone();
    let onreset = move |_| {
        let provider = provider.clone();
        async move {
            resetting.set(true);
            match request_password_reset(provider.provider(), &email()).await {
                Ok(notice) => toast.success(
                    "E-post for tilbakestilling sendt".to_string(),
                    ToastOptions::new().description(notice),
                ),
                Err(err) => toast.error(
                    err.to_string(),
                    ToastOptions::new().description(err.detail().unwrap_or_default().to_string()),
                ),
            }
            resetting.set(false);
        }
    };

    let error_for = move |field: &str| errors.read().get(field).map(str::to_string);
    let switch_to = if is_login {
        api::Navigation::Signup.path()
    } else {
        api::Navigation::Login.path()
    };

    rsx! {
        Card {
            class: "auth-card",
            CardHeader {
                CardTitle { class: "text-primary",
                    if is_login { "Logg Inn" } else { "Opprett Konto" }
                }
                CardDescription {
                    if is_login {
                        "Få tilgang til din Relivery-konto."
                    } else {
                        "Bli med i Relivery-fellesskapet i dag!"
                    }
                }
            }
            CardContent {
                form {
                    class: "stack",
                    onsubmit,
                    if !is_login {
                        div { class: "field",
                            Label { html_for: "name", "Navn" }
                            Input {
                                id: "name",
                                r#type: "text",
                                placeholder: "Ditt Navn",
                                value: name(),
                                oninput: move |evt: FormEvent| name.set(evt.value()),
                            }
                            FieldError { message: error_for(FIELD_NAME) }
                        }
                    }
                    div { class: "field",
                        Label { html_for: "email", "E-post" }
                        Input {
                            id: "email",
                            r#type: "email",
                            placeholder: "deg@eksempel.com",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                        FieldError { message: error_for(FIELD_EMAIL) }
                    }
                    div { class: "field",
                        div { class: "row between",
                            Label { html_for: "password", "Passord" }
                            if is_login {
                                Button {
                                    r#type: "button",
                                    variant: ButtonVariant::Link,
                                    disabled: resetting(),
                                    onclick: onreset,
                                    if resetting() {
                                        Spinner {}
                                    }
                                    "Glemt passord?"
                                }
                            }
                        }
                        Input {
                            id: "password",
                            r#type: "password",
                            placeholder: "••••••••",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        FieldError { message: error_for(FIELD_PASSWORD) }
                    }
                    Button {
                        r#type: "submit",
                        class: "w-full",
                        disabled: busy(),
                        if busy() {
                            Spinner {}
                        }
                        if is_login { "Logg Inn" } else { "Opprett Konto" }
                    }
                }
            }
            CardFooter {
                p { class: "muted",
                    if is_login { "Har du ikke konto? " } else { "Har du allerede en konto? " }
                    Link {
                        to: switch_to,
                        if is_login { "Opprett en her" } else { "Logg inn her" }
                    }
                }
            }
        }
    }
}
