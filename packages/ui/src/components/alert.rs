use dioxus::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum AlertVariant {
    #[default]
    Default,
    Destructive,
}

impl AlertVariant {
    fn class(&self) -> &'static str {
        match self {
            AlertVariant::Default => "default",
            AlertVariant::Destructive => "destructive",
        }
    }
}

/// Persistent inline notice, for problems the user has to act on.
#[component]
pub fn Alert(
    #[props(default)] variant: AlertVariant,
    title: String,
    #[props(default)] description: String,
    icon: Option<Element>,
) -> Element {
    rsx! {
        div {
            class: "alert",
            "data-style": variant.class(),
            role: "alert",
            if let Some(icon) = icon {
                div { class: "alert-icon", {icon} }
            }
            div {
                h5 { class: "alert-title", "{title}" }
                if !description.is_empty() {
                    p { class: "alert-description", "{description}" }
                }
            }
        }
    }
}

#[component]
pub fn Badge(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        span { class: "badge {class}", {children} }
    }
}
