use dioxus::prelude::*;

use store::ReliveryConfig;
use ui::components::ToastProvider;
use ui::{AppServices, AuthProvider};
use views::{
    DashboardHome, DashboardShell, Home, ListItem, Login, NotFound, Profile, ReturnItem, Scan,
    SessionShell, Settings, Signup,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[layout(SessionShell)]
        #[nest("/dashboard")]
            #[layout(DashboardShell)]
                #[route("/")]
                DashboardHome {},
                #[route("/profile")]
                Profile {},
                #[route("/settings")]
                Settings {},
            #[end_layout]
        #[end_nest]
        #[route("/scan")]
        Scan {},
        #[route("/list-item")]
        ListItem {},
        #[route("/return-item/:id")]
        ReturnItem { id: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

const CONFIG_TOML: &str = include_str!("../relivery.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> ReliveryConfig {
    match ReliveryConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("invalid {}, using defaults: {e}", ReliveryConfig::filename());
            ReliveryConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| AppServices::new(load_config()));

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::DX_COMPONENTS_CSS }
        document::Link { rel: "stylesheet", href: ui::RELIVERY_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
