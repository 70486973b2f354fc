//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const DX_COMPONENTS_CSS: Asset = asset!("/assets/dx-components-theme.css");
pub const RELIVERY_CSS: Asset = asset!("/assets/relivery.css");

mod bridge;

mod services;
pub use services::{use_services, AppServices};

mod auth;
pub use auth::{use_auth, AuthProvider, LogoutButton, RequireSession};

pub mod camera;

mod layout;
pub use layout::{DashboardHeader, DashboardSidebar, Logo, PublicHeader};

mod landing;
pub use landing::Landing;

mod auth_form;
pub use auth_form::{AuthForm, AuthMode};

mod account_forms;
pub use account_forms::{ChangePasswordCard, EditProfileCard};

mod scanner;
pub use scanner::QrScanner;

mod return_form;
pub use return_form::ReturnProcessForm;

mod listing_form;
pub use listing_form::{ListItemForm, ListingDisabled};

mod dashboard;
pub use dashboard::{ActivityOverview, ActivityTabs, RenterDashboard, RentalCard};
