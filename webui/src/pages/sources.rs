//! Quellen-Übersicht ("Snapshots") und das Anlegen neuer Snapshots.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::cli;
use kopia_console_core::error::alert_text;
use kopia_console_core::polling::SOURCES_INTERVAL;
use kopia_console_core::restore::EstimateRequest;
use kopia_console_core::sources::{owners, OwnerFilter, SourceAction, SourceRow, SourcesView};
use kopia_console_core::table::SortKey;
use kopia_console_core::types::CreateSourceRequest;

use crate::components::cli_equivalent::{use_cli_executable, CliEquivalent};
use crate::components::data_table::{use_table, Pager, SortHeader};
use crate::components::status::{ErrorBlock, Spinner, StatusCell};
use crate::components::task_view::TaskView;
use crate::hooks::{redirect_if_disconnected, use_polling};
use crate::ui_utils::{alert, has_kopia_ui, now, select_directory, show_toast};
use crate::{api, prefs, Route};

const ALL_OWNERS: &str = "*all*";
const LOCAL_OWNER: &str = "*local*";

fn source_key(column: usize, row: &SourceRow) -> SortKey {
    match column {
        0 => row.source.path.as_str().into(),
        1 => row.owner.as_str().into(),
        2 => Some(row.last_snapshot_time.clone()).filter(|s| !s.is_empty()).into(),
        3 => row.last_snapshot_size.into(),
        4 => Some(row.next_snapshot_time.clone()).filter(|s| !s.is_empty()).into(),
        _ => row.status.text().into(),
    }
}

#[component]
pub fn Snapshots() -> Element {
    let store = prefs::use_prefs();
    let nav = use_navigator();
    let mut view = use_signal(SourcesView::default);
    let mut owner = use_signal(|| OwnerFilter::Local);
    let table = use_table();

    use_polling(SOURCES_INTERVAL, move || async move {
        let mut v = view.peek().clone();
        let control = v.refresh(&api::client()).await;
        if let Some(e) = &v.error {
            redirect_if_disconnected(nav, e);
        }
        view.set(v);
        control
    });

    let base2 = prefs::base2(store);
    let v = view.read();
    let rows = v.rows(&owner.read(), base2, now());
    let all_owners = v.response.as_ref().map(owners).unwrap_or_default();
    let (local_user, local_host) = v.local_identity();
    let local_owner = format!("{}@{}", local_user, local_host);
    let multi_user = v.response.as_ref().is_some_and(|r| r.multi_user);
    let error = v.error.clone();
    let loading = v.response.is_none() && error.is_none();
    drop(v);

    let row_count = rows.len();
    let visible: Vec<SourceRow> = table.read().visible_rows(&rows, source_key).into_iter().cloned().collect();
    let selected_owner = match &*owner.read() {
        OwnerFilter::All => ALL_OWNERS.to_string(),
        OwnerFilter::Local => LOCAL_OWNER.to_string(),
        OwnerFilter::Owner(o) => o.clone(),
    };

    let sync = move |_| {
        spawn(async move {
            match api::client().sync_repo().await {
                Ok(()) => show_toast("Repository synchronized"),
                Err(e) => alert(&alert_text("Error synchronizing repository", &e)),
            }
        });
    };

    rsx! {
        section { class: "panel",
            h2 { "Snapshots" }
            div { class: "toolbar",
                {multi_user.then(|| rsx!(
                    select {
                        value: "{selected_owner}",
                        oninput: move |e| {
                            let value = e.value();
                            owner.set(match value.as_str() {
                                ALL_OWNERS => OwnerFilter::All,
                                LOCAL_OWNER => OwnerFilter::Local,
                                _ => OwnerFilter::Owner(value.clone()),
                            });
                        },
                        option { value: ALL_OWNERS, "All Snapshots" }
                        option { value: LOCAL_OWNER, "Local Snapshots" }
                        for o in all_owners.into_iter().filter(|o| *o != local_owner) {
                            option { key: "{o}", value: "{o}", "{o}" }
                        }
                    }
                ))}
                button { class: "btn btn-primary", onclick: move |_| { nav.push(Route::NewSnapshot {}); }, "New Snapshot" }
                button { class: "btn", onclick: sync, "Sync" }
                {loading.then(|| rsx!(Spinner {}))}
            }
            {error.map(|e| rsx!(ErrorBlock { prefix: "Unable to load sources", error: e }))}
            table { class: "grid",
                thead { tr {
                    SortHeader { table, column: 0, label: "Path" }
                    {(*owner.read() != OwnerFilter::Local).then(|| rsx!(SortHeader { table, column: 1, label: "Owner" }))}
                    SortHeader { table, column: 2, label: "Last Snapshot" }
                    SortHeader { table, column: 3, label: "Size", numeric: true }
                    SortHeader { table, column: 4, label: "Next Snapshot" }
                    SortHeader { table, column: 5, label: "Status" }
                    th { "Actions" }
                } }
                tbody {
                    for row in visible {
                        SourceRowView { key: "{row.source}", row: row.clone(), show_owner: *owner.read() != OwnerFilter::Local }
                    }
                }
            }
            Pager { table, row_count }
        }
    }
}

#[component]
fn SourceRowView(row: SourceRow, show_owner: bool) -> Element {
    let source = row.source.clone();
    let history = Route::SnapshotHistory {
        user_name: source.user_name.clone(),
        host: source.host.clone(),
        path: source.path.clone(),
    };
    let task_link = row.current_task.clone().filter(|_| row.status.has_spinner());

    rsx! {
        tr {
            td { Link { to: history, "{row.source.path}" } }
            {show_owner.then(|| rsx!(td { "{row.owner}" }))}
            td { "{row.last_snapshot_time}" }
            td { class: "num", "{row.last_snapshot_size_text}" }
            td { title: "{row.next_snapshot_time}", "{row.next_snapshot_relative}" }
            td {
                StatusCell { display: row.status.clone() }
                {task_link.map(|tid| rsx!(" " Link { to: Route::TaskDetails { tid }, "Details" }))}
            }
            td {
                for action in row.actions.clone() {
                    SourceActionButton { key: "{action:?}", source: source.clone(), action }
                }
            }
        }
    }
}

#[component]
fn SourceActionButton(source: kopia_console_core::types::SourceInfo, action: SourceAction) -> Element {
    let (label, class) = match action {
        SourceAction::SnapshotNow => ("Snapshot Now", "btn btn-small btn-primary"),
        SourceAction::Cancel => ("Stop", "btn btn-small btn-danger"),
    };
    let onclick = move |_| {
        let source = source.clone();
        spawn(async move {
            let api = api::client();
            let result = match action {
                SourceAction::SnapshotNow => api.start_upload(&source).await,
                SourceAction::Cancel => api.cancel_upload(&source).await,
            };
            if let Err(e) = result {
                let prefix = match action {
                    SourceAction::SnapshotNow => "Error starting snapshot",
                    SourceAction::Cancel => "Error stopping snapshot",
                };
                alert(&alert_text(prefix, &e));
            }
        });
    };
    rsx! { button { class: "{class}", onclick, "{label}" } }
}

// ----- Neuer Snapshot: Pfad, optionale Schätzung, Start -----
#[component]
pub fn NewSnapshot() -> Element {
    let nav = use_navigator();
    let mut path = use_signal(String::new);
    let mut estimate_task = use_signal(|| None as Option<String>);
    let mut busy = use_signal(|| false);
    let exe = use_cli_executable();

    let estimate = move |_| {
        let req = match EstimateRequest::new(&path.read()) {
            Ok(r) => r,
            Err(e) => {
                alert(&e.to_string());
                return;
            }
        };
        spawn(async move {
            match api::client().estimate(&req).await {
                Ok(created) => estimate_task.set(Some(created.id)),
                Err(e) => {
                    if !redirect_if_disconnected(nav, &e) {
                        alert(&alert_text("Error estimating", &e));
                    }
                }
            }
        });
    };

    let snapshot_now = move |_| {
        let value = path.read().trim().to_string();
        if value.is_empty() {
            alert("Must specify directory to snapshot.");
            return;
        }
        busy.set(true);
        spawn(async move {
            let req = CreateSourceRequest { path: value, create_snapshot: true, policy: None };
            match api::client().create_source(&req).await {
                Ok(_) => {
                    show_toast("Snapshot started");
                    nav.push(Route::Snapshots {});
                }
                Err(e) => alert(&alert_text("Error creating snapshot", &e)),
            }
            busy.set(false);
        });
    };

    let pick_folder = move |_| select_directory(move |p| path.set(p));
    let current = path.read().clone();
    let command = if estimate_task.read().is_some() {
        cli::snapshot_estimate(&exe.read(), &current)
    } else {
        cli::snapshot_create(&exe.read(), &current)
    };

    rsx! {
        section { class: "panel",
            h2 { "New Snapshot" }
            div { class: "toolbar",
                input {
                    class: "input grow",
                    placeholder: "enter path to snapshot",
                    value: "{current}",
                    oninput: move |e| { path.set(e.value()); estimate_task.set(None); },
                }
                {has_kopia_ui().then(|| rsx!(button { class: "btn", onclick: pick_folder, "Select Folder" }))}
                button { class: "btn", disabled: current.trim().is_empty(), onclick: estimate, "Estimate" }
                button { class: "btn btn-primary", disabled: current.trim().is_empty() || *busy.read(), onclick: snapshot_now, "Snapshot Now" }
            }
            {estimate_task.read().clone().map(|tid| rsx!(
                h3 { "Estimation" }
                TaskView { key: "{tid}", task_id: tid.clone() }
            ))}
            CliEquivalent { command }
        }
    }
}
