//! Styled building blocks shared by every view.

mod alert;
mod button;
mod card;
mod form;

pub use alert::{Alert, AlertVariant, Badge};
pub use button::{Button, ButtonVariant, Spinner};
pub use card::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle};
pub use form::{FieldError, Input, Label, Textarea};

pub use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};
