//! Session context and hooks for the UI.

use api::{Gate, Navigation, SessionState};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Spinner};
use crate::icons::FaRightFromBracket;
use crate::services::use_services;
use crate::Icon;

/// Get the current session state.
/// Returns a signal that updates on every session change.
pub fn use_auth() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that follows the identity provider's session events.
/// Must sit below the [`AppServices`](crate::AppServices) context.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_services();
    let mut session = use_signal(SessionState::default);

    // The watcher lives as long as this component; dropping it unsubscribes.
    use_future(move || {
        let ctx = services.session.clone();
        async move {
            let mut watcher = ctx.watch();
            while let Some(state) = watcher.next().await {
                session.set(state);
            }
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Renders `children` only for a signed-in user. While the first session
/// event is pending a spinner is shown; without a session the user is sent
/// to the login page.
#[component]
pub fn RequireSession(children: Element) -> Element {
    let session = use_auth();
    let nav = use_navigator();
    let gate = session().gate();

    use_effect(move || {
        if session().gate() == Gate::RedirectToLogin {
            nav.replace(Navigation::Login.path());
        }
    });

    match gate {
        Gate::Allow => rsx! { {children} },
        Gate::Wait | Gate::RedirectToLogin => rsx! {
            div { class: "loading-row fill",
                Spinner { class: "spinner-lg" }
                p { class: "text-primary", "Laster Relivery-opplevelsen..." }
            }
        },
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logg Ut".to_string())] label: String,
    #[props(default = ButtonVariant::Ghost)] variant: ButtonVariant,
) -> Element {
    let services = use_services();
    let nav = use_navigator();

    let onclick = move |_| {
        let ctx = services.session.clone();
        async move {
            let target = ctx.logout().await;
            nav.replace(target.path());
        }
    };

    rsx! {
        Button {
            variant,
            onclick,
            Icon { width: 16, height: 16, icon: FaRightFromBracket }
            span { "{label}" }
        }
    }
}
