use dioxus::prelude::*;

use crate::api;
use crate::ui_utils::copy_to_clipboard;

/// Pfad der Kommandozeilen-Binary laut `/api/v1/cli`; leer bis geladen.
pub fn use_cli_executable() -> Signal<String> {
    let mut exe = use_signal(String::new);
    use_hook(move || {
        spawn(async move {
            if let Ok(info) = api::client().cli().await {
                exe.set(info.executable);
            }
        });
    });
    exe
}

#[component]
pub fn CliEquivalent(command: String) -> Element {
    let mut open = use_signal(|| false);
    let copy = command.clone();
    rsx! {
        div { class: "cli-equivalent",
            button { class: "btn btn-small", title: "Show command-line equivalent",
                onclick: move |_| { let current = *open.read(); open.set(!current); },
                ">_"
            }
            {open.read().then(|| rsx!(
                code { class: "cli-line", "{command}" }
                button { class: "btn btn-small", onclick: move |_| copy_to_clipboard(copy.clone()), "Copy" }
            ))}
        }
    }
}
