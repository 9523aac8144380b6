//! Repository-Status; Ziel der Weiterleitung, wenn kein Repository verbunden ist.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::error::alert_text;

use crate::components::status::{ErrorBlock, Spinner};
use crate::ui_utils::{alert, show_toast};
use crate::{api, Route};

#[component]
pub fn Repository() -> Element {
    let mut reload = use_signal(|| 0u32);
    let status = use_resource(move || {
        let _ = reload();
        async move { api::client().repo_status().await }
    });

    let sync = move |_| {
        spawn(async move {
            match api::client().sync_repo().await {
                Ok(()) => {
                    show_toast("Repository synchronized");
                    reload += 1;
                }
                Err(e) => alert(&alert_text("Error synchronizing repository", &e)),
            }
        });
    };

    let body = match &*status.read() {
        None => rsx!(div { class: "muted", Spinner {} " Loading status..." }),
        Some(Err(e)) => rsx!(ErrorBlock { prefix: "Unable to get repository status", error: e.clone() }),
        Some(Ok(s)) if !s.connected => {
            let init = s.init_task_id.clone();
            rsx! {
                p { "Not connected to a repository." }
                p { class: "muted", "Connect or create a repository with the command-line tool, then reload this page." }
                {init.map(|tid| rsx!(
                    p { "Initializing: " Link { to: Route::TaskDetails { tid: tid.clone() }, "show task" } }
                ))}
            }
        }
        Some(Ok(s)) => {
            let s = s.clone();
            let format_version = s.format_version.as_ref().map(|v| v.to_string()).unwrap_or_default();
            let identity = format!("{}@{}", s.username, s.hostname);
            rsx! {
                table { class: "kv",
                    tbody {
                        tr { th { "Description" } td { "{s.description}" } }
                        tr { th { "Config File" } td { code { "{s.config_file}" } } }
                        tr { th { "Storage" } td { "{s.storage}" } }
                        tr { th { "Hash" } td { "{s.hash}" } }
                        tr { th { "Encryption" } td { "{s.encryption}" } }
                        tr { th { "Splitter" } td { "{s.splitter}" } }
                        tr { th { "Format Version" } td { "{format_version}" } }
                        tr { th { "Connected As" } td { "{identity}" } }
                        {s.read_only.then(|| rsx!(tr { th { "Mode" } td { "read-only" } }))}
                    }
                }
                div { class: "toolbar",
                    button { class: "btn", onclick: sync, "Sync" }
                }
            }
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Repository" }
            {body}
        }
    }
}
