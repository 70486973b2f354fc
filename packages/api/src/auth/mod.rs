//! Identity provider client: the provider trait, its error codes, the
//! in-process implementation and password hashing.

mod error;
mod identity;
mod memory;
pub mod password;

pub use error::{AuthError, ProviderErrorCode};
pub use identity::{IdentityProvider, SessionSubscription};
pub use memory::{MemoryIdentity, MIN_PASSWORD_LEN};
