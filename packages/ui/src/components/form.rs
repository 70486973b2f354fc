use dioxus::prelude::*;

#[component]
pub fn Input(
    oninput: Option<EventHandler<FormEvent>>,
    onchange: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        input {
            class: "input",
            oninput: move |e| _ = oninput.map(|callback| callback(e)),
            onchange: move |e| _ = onchange.map(|callback| callback(e)),
            ..attributes,
        }
    }
}

#[component]
pub fn Textarea(
    oninput: Option<EventHandler<FormEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
) -> Element {
    rsx! {
        textarea {
            class: "textarea",
            oninput: move |e| _ = oninput.map(|callback| callback(e)),
            ..attributes,
        }
    }
}

#[component]
pub fn Label(
    html_for: Option<String>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: html_for,
            ..attributes,
            {children}
        }
    }
}

/// Inline validation message under a field; renders nothing without one.
#[component]
pub fn FieldError(#[props(!optional)] message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", role: "alert", "{message}" }
        }
    }
}
