//! The signed-in area: the session gate and the dashboard pages.

use dioxus::prelude::*;
use ui::{
    use_auth, ChangePasswordCard, DashboardHeader, DashboardSidebar, EditProfileCard,
    RenterDashboard, RequireSession,
};

use crate::Route;

/// Gate for every route that needs a session.
#[component]
pub fn SessionShell() -> Element {
    rsx! {
        RequireSession {
            Outlet::<Route> {}
        }
    }
}

/// Sidebar, header and content area of `/dashboard/*`.
#[component]
pub fn DashboardShell() -> Element {
    let route = use_route::<Route>();
    let mut sidebar_open = use_signal(|| true);

    rsx! {
        div { class: "dashboard-shell",
            DashboardSidebar { current: route.to_string(), open: sidebar_open() }
            div { class: "dashboard-main",
                DashboardHeader { on_menu_click: move |_| sidebar_open.toggle() }
                main { class: "dashboard-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
pub fn DashboardHome() -> Element {
    rsx! {
        RenterDashboard {}
    }
}

#[component]
fn PageHeader(title: String, subtitle: String) -> Element {
    rsx! {
        div { class: "page-header",
            h1 { "{title}" }
            p { class: "muted", "{subtitle}" }
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let session = use_auth();
    let user = session().user;
    let name = user
        .as_ref()
        .and_then(|u| u.name.clone())
        .unwrap_or_else(|| "Navn ikke satt".to_string());
    let email = user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    let initials = user.as_ref().map(|u| u.initials()).unwrap_or_else(|| "U".to_string());
    let avatar = user.as_ref().and_then(|u| u.avatar_url.clone());

    rsx! {
        div { class: "stack-lg",
            PageHeader { title: "Min Profil", subtitle: "Administrer din profilinformasjon." }
            div { class: "profile-summary",
                div { class: "avatar-large",
                    if let Some(src) = avatar {
                        img { src: "{src}", alt: "{name}", "data-ai-hint": "person avatar" }
                    } else {
                        "{initials}"
                    }
                }
                div {
                    h2 { "{name}" }
                    p { class: "muted", "{email}" }
                }
            }
            EditProfileCard {}
        }
    }
}

#[component]
pub fn Settings() -> Element {
    rsx! {
        div { class: "stack-lg",
            PageHeader { title: "Innstillinger", subtitle: "Administrer dine konto-innstillinger." }
            ChangePasswordCard {}
        }
    }
}
