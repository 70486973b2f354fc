//! # API crate: identity, session and account logic for Relivery
//!
//! Everything between the screens and the identity provider lives here. There
//! is no server: the provider is a client-side adapter and all calls stay
//! in-process.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`IdentityProvider`] trait, provider error codes, [`MemoryIdentity`], Argon2id hashing |
//! | [`models`] | [`ProviderUser`] and the application's [`UserInfo`] |
//! | [`session`] | [`SessionContext`] (login / signup / logout) and the subscription-driven [`SessionState`] |
//! | [`forms`] | Login, signup, profile and password-change schemas |
//! | [`account`] | Profile edit, password change and reset mail |

pub mod account;
pub mod auth;
pub mod forms;
pub mod models;
pub mod session;

#[cfg(test)]
mod testing;

pub use auth::{AuthError, IdentityProvider, MemoryIdentity, ProviderErrorCode};
pub use models::{ProviderUser, UserInfo};
pub use session::{Gate, Navigation, SessionContext, SessionState, SessionStatus, SessionWatcher};

/// Identity provider the application ships with.
pub type AppIdentity = MemoryIdentity;

/// Session context over [`AppIdentity`].
pub type AppSession = SessionContext<AppIdentity>;
