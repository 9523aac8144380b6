use dioxus::prelude::*;
use kopia_console_core::tasks::StatusDisplay;
use kopia_console_core::ApiError;

#[component]
pub fn Spinner() -> Element {
    rsx! { span { class: "spinner", "" } }
}

/// Statuszelle: Spinner, Haken, Fehler oder Sperrsymbol.
#[component]
pub fn StatusCell(display: StatusDisplay) -> Element {
    match display {
        StatusDisplay::InProgress { label, elapsed } => rsx! {
            span { class: "status status-running", Spinner {} " {label} " span { class: "muted", "{elapsed}" } }
        },
        StatusDisplay::Succeeded { elapsed } => rsx! {
            span { class: "status status-success", title: "Finished", "✔ " span { class: "muted", "{elapsed}" } }
        },
        StatusDisplay::Failed { message } => rsx! {
            span { class: "status status-error", title: "{message}", "✖ Error: {message}" }
        },
        StatusDisplay::Canceled => rsx! { span { class: "status status-canceled", "⦸ Canceled" } },
        StatusDisplay::Plain(text) => rsx! { span { class: "status", "{text}" } },
    }
}

/// Inline-Fehlerblock für fehlgeschlagene Ladevorgänge.
#[component]
pub fn ErrorBlock(prefix: String, error: ApiError) -> Element {
    let message = error.user_message();
    let raw = error.details();
    rsx! {
        div { class: "alert alert-error",
            "{prefix}: {message}"
            {raw.map(|d| rsx!(details { summary { "Details" } pre { "{d}" } }))}
        }
    }
}
