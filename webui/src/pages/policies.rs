//! Liste aller Richtlinien und Einstieg in den Editor.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::cli;
use kopia_console_core::policy::{policy_rows, PolicyFilter, PolicyRow};
use kopia_console_core::sources::SourcesView;
use kopia_console_core::table::SortKey;
use kopia_console_core::types::SourceInfo;

use crate::components::cli_equivalent::{use_cli_executable, CliEquivalent};
use crate::components::data_table::{use_table, Pager, SortHeader};
use crate::components::status::{ErrorBlock, Spinner};
use crate::hooks::redirect_if_disconnected;
use crate::ui_utils::alert;
use crate::{api, Route};

fn policy_key(column: usize, row: &PolicyRow) -> SortKey {
    match column {
        0 => row.target.to_string().into(),
        1 => (row.level as usize).into(),
        _ => row.summary.as_str().into(),
    }
}

pub fn edit_route(target: &SourceInfo) -> Route {
    Route::PolicyEdit {
        user_name: target.user_name.clone(),
        host: target.host.clone(),
        path: target.path.clone(),
    }
}

#[component]
pub fn Policies() -> Element {
    let nav = use_navigator();
    let mut filter_kind = use_signal(|| "local".to_string());
    let mut new_target = use_signal(String::new);
    let mut identity = use_signal(|| (String::new(), String::new()));
    let table = use_table();
    let exe = use_cli_executable();

    let policies = use_resource(move || async move {
        let result = api::client().policies().await;
        if let Err(e) = &result {
            redirect_if_disconnected(nav, e);
        }
        result
    });

    use_hook(move || {
        spawn(async move {
            let mut view = SourcesView::default();
            view.refresh(&api::client()).await;
            identity.set(view.local_identity());
        });
    });

    let (local_user, local_host) = identity.read().clone();
    let filter = match filter_kind.read().as_str() {
        "all" => PolicyFilter::All,
        "global" => PolicyFilter::Global,
        "local" => PolicyFilter::Local { user_name: local_user.clone(), host: local_host.clone() },
        owner => PolicyFilter::Owner(owner.to_string()),
    };
    let (rows, error) = match &*policies.read() {
        Some(Ok(resp)) => (policy_rows(resp, &filter), None),
        Some(Err(e)) => (Vec::new(), Some(e.clone())),
        None => (Vec::new(), None),
    };
    let mut other_owners: Vec<String> = match &*policies.read() {
        Some(Ok(resp)) => resp
            .policies
            .iter()
            .filter(|p| !p.id.user_name.is_empty())
            .map(|p| p.id.owner())
            .filter(|o| *o != format!("{}@{}", local_user, local_host))
            .collect(),
        _ => Vec::new(),
    };
    other_owners.sort();
    other_owners.dedup();
    let loading = policies.read().is_none();
    let row_count = rows.len();
    let visible: Vec<PolicyRow> = table.read().visible_rows(&rows, policy_key).into_iter().cloned().collect();
    let selected = filter_kind.read().clone();

    let open_new = move |_| {
        let (user, host) = identity.read().clone();
        match SourceInfo::parse(&new_target.read(), &user, &host) {
            Some(target) => {
                nav.push(edit_route(&target));
            }
            None => alert("Enter a path, user@host, user@host:path or @host."),
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Policies" }
            div { class: "toolbar",
                select {
                    value: "{selected}",
                    oninput: move |e| filter_kind.set(e.value()),
                    option { value: "local", "Local Policies" }
                    option { value: "all", "All Policies" }
                    option { value: "global", "Global Policy" }
                    for o in other_owners {
                        option { key: "{o}", value: "{o}", "{o}" }
                    }
                }
                Link { to: edit_route(&SourceInfo::global()), class: "btn", "Edit Global Policy" }
                input {
                    class: "input grow",
                    placeholder: "enter directory to find or set policy",
                    value: "{new_target}",
                    oninput: move |e| new_target.set(e.value()),
                }
                button { class: "btn btn-primary", disabled: new_target.read().trim().is_empty(), onclick: open_new, "Set Policy" }
                {loading.then(|| rsx!(Spinner {}))}
            }
            {error.map(|e| rsx!(ErrorBlock { prefix: "Unable to load policies", error: e }))}
            table { class: "grid",
                thead { tr {
                    SortHeader { table, column: 0, label: "Target" }
                    SortHeader { table, column: 1, label: "Level" }
                    SortHeader { table, column: 2, label: "Defined" }
                    th { "" }
                } }
                tbody {
                    for row in visible {
                        tr { key: "{row.target}",
                            td { "{row.target}" }
                            td { {row.level.label()} }
                            td { class: "muted", "{row.summary}" }
                            td { Link { to: edit_route(&row.target), class: "btn btn-small", "Edit" } }
                        }
                    }
                }
            }
            Pager { table, row_count }
            CliEquivalent { command: cli::policy_show(&exe.read(), &SourceInfo::global()) }
        }
    }
}
