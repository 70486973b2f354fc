//! Page chrome: logo, the public header, and the dashboard sidebar and header.

use api::Navigation;
use dioxus::prelude::*;

use crate::icons::{FaBars, FaGear, FaHouse, FaQrcode, FaRecycle, FaUser};
use crate::{use_auth, Icon, LogoutButton};

const LAYOUT_CSS: Asset = asset!("/assets/styling/layout.css");

#[component]
pub fn Logo(#[props(default = 28)] icon_size: u32, #[props(default)] compact: bool) -> Element {
    rsx! {
        Link { class: "logo", to: Navigation::Home.path(),
            span { class: "text-primary",
                Icon { width: icon_size, height: icon_size, icon: FaRecycle }
            }
            if !compact {
                span { class: "logo-text", "Relivery" }
            }
        }
    }
}

#[component]
pub fn PublicHeader() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: LAYOUT_CSS }
        header { class: "public-header",
            div { class: "container row between",
                Logo {}
                nav { class: "row",
                    Link { class: "button button-ghost", to: Navigation::Login.path(), "Logg Inn" }
                    Link { class: "button button-primary", to: Navigation::Signup.path(), "Opprett Konto" }
                }
            }
        }
    }
}

struct NavItem {
    target: Navigation,
    label: &'static str,
}

static NAV_ITEMS: [NavItem; 4] = [
    NavItem { target: Navigation::Dashboard, label: "Min Side" },
    NavItem { target: Navigation::Scan, label: "Skann QR" },
    NavItem { target: Navigation::Profile, label: "Profil" },
    NavItem { target: Navigation::Settings, label: "Innstillinger" },
];

fn nav_icon(target: &Navigation) -> Element {
    match target {
        Navigation::Scan => rsx! { Icon { width: 18, height: 18, icon: FaQrcode } },
        Navigation::Profile => rsx! { Icon { width: 18, height: 18, icon: FaUser } },
        Navigation::Settings => rsx! { Icon { width: 18, height: 18, icon: FaGear } },
        _ => rsx! { Icon { width: 18, height: 18, icon: FaHouse } },
    }
}

/// `/dashboard` is only active on itself; the others also match below them.
fn is_active(target: &Navigation, current: &str) -> bool {
    let path = target.path();
    current == path || (*target != Navigation::Dashboard && current.starts_with(&path))
}

/// Side navigation of the signed-in area. `current` is the current route path.
#[component]
pub fn DashboardSidebar(current: String, #[props(default = true)] open: bool) -> Element {
    let logo_size = if open { 28 } else { 20 };
    let year = copyright_year();

    rsx! {
        aside { class: "sidebar", "data-state": if open { "open" } else { "collapsed" },
            div { class: "sidebar-header",
                Logo { icon_size: logo_size, compact: !open }
            }
            nav { class: "sidebar-menu",
                for item in NAV_ITEMS.iter() {
                    Link {
                        key: "{item.label}",
                        class: item_class(&item.target, &current).to_string(),
                        to: item.target.path(),
                        {nav_icon(&item.target)}
                        if open {
                            span { "{item.label}" }
                        }
                    }
                }
            }
            if open {
                div { class: "sidebar-footer",
                    p { class: "muted tiny", "© {year} Relivery. Alle rettigheter reservert." }
                }
            }
        }
    }
}

fn item_class(target: &Navigation, current: &str) -> &'static str {
    if is_active(target, current) {
        "sidebar-item active"
    } else {
        "sidebar-item"
    }
}

fn copyright_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Top bar of the signed-in area with the account menu.
#[component]
pub fn DashboardHeader(on_menu_click: EventHandler<()>) -> Element {
    let session = use_auth();
    let mut menu_open = use_signal(|| false);

    let user = session().user;
    let initials = user.as_ref().map(|u| u.initials()).unwrap_or_else(|| "U".to_string());
    let label = user
        .as_ref()
        .and_then(|u| u.name.clone())
        .unwrap_or_else(|| "Min Konto".to_string());
    let avatar = user.as_ref().and_then(|u| u.avatar_url.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: LAYOUT_CSS }
        header { class: "dashboard-header",
            button {
                class: "button button-outline icon-only mobile-only",
                "aria-label": "Vis navigasjonsmeny",
                onclick: move |_| on_menu_click.call(()),
                Icon { width: 18, height: 18, icon: FaBars }
            }
            div { class: "desktop-only",
                Logo { icon_size: 24 }
            }
            div { class: "account-menu",
                button {
                    class: "avatar",
                    "aria-haspopup": "menu",
                    "aria-expanded": "{menu_open}",
                    onclick: move |_| menu_open.toggle(),
                    if let Some(src) = avatar {
                        img { src: "{src}", alt: "{label}", "data-ai-hint": "person avatar" }
                    } else {
                        span { class: "avatar-fallback", "{initials}" }
                    }
                }
                if menu_open() {
                    div { class: "menu", role: "menu", onclick: move |_| menu_open.set(false),
                        div { class: "menu-label", "{label}" }
                        hr { class: "menu-separator" }
                        Link { class: "menu-item", to: Navigation::Profile.path(),
                            Icon { width: 14, height: 14, icon: FaUser }
                            "Profil"
                        }
                        Link { class: "menu-item", to: Navigation::Settings.path(),
                            Icon { width: 14, height: 14, icon: FaGear }
                            "Innstillinger"
                        }
                        hr { class: "menu-separator" }
                        LogoutButton {}
                    }
                }
            }
        }
    }
}
