//! Pages reachable without a session.

use dioxus::prelude::*;
use ui::{AuthForm, AuthMode, Landing, Logo};

#[component]
pub fn Home() -> Element {
    rsx! {
        Landing {}
    }
}

#[component]
pub fn Login() -> Element {
    rsx! {
        AuthPage { mode: AuthMode::Login }
    }
}

#[component]
pub fn Signup() -> Element {
    rsx! {
        AuthPage { mode: AuthMode::Signup }
    }
}

#[component]
fn AuthPage(mode: AuthMode) -> Element {
    rsx! {
        div { class: "auth-page landing",
            div { class: "auth-logo",
                Logo {}
            }
            main { class: "auth-main",
                AuthForm { mode }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    tracing::debug!(%path, "no route");

    rsx! {
        div { class: "not-found stack",
            Logo {}
            h1 { class: "page-title", "Siden finnes ikke" }
            p { class: "muted", "Vi fant ingen side på /{path}." }
            Link { class: "button button-primary", to: api::Navigation::Home.path(), "Til forsiden" }
        }
    }
}
