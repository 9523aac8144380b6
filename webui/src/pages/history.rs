//! Snapshot-Verlauf einer Quelle: Auswahl, Löschen, Beschreibung und Pins.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::cli;
use kopia_console_core::error::alert_text;
use kopia_console_core::snapshots::{
    delete_confirmation, delete_request, description_edit, hidden_caption, history_rows, pin_edit, Selection, SnapshotRow,
};
use kopia_console_core::table::SortKey;
use kopia_console_core::types::{EditSnapshotsRequest, SourceInfo};

use crate::components::cli_equivalent::{use_cli_executable, CliEquivalent};
use crate::components::data_table::{use_table, Pager, SortHeader};
use crate::components::status::{ErrorBlock, Spinner};
use crate::hooks::redirect_if_disconnected;
use crate::ui_utils::{alert, confirm, prompt};
use crate::{api, prefs, Route};

fn snapshot_key(column: usize, row: &SnapshotRow) -> SortKey {
    match column {
        0 => row.start_time.as_str().into(),
        1 => row.description.as_str().into(),
        2 => row.root_id.as_str().into(),
        3 => row.retention.as_str().into(),
        4 => row.pins.join(", ").into(),
        5 => row.size.into(),
        6 => row.files.into(),
        _ => row.dirs.into(),
    }
}

async fn apply_edit(req: EditSnapshotsRequest, mut reload: Signal<u32>) {
    match api::client().edit_snapshots(&req).await {
        Ok(()) => *reload.write() += 1,
        Err(e) => alert(&alert_text("Error updating snapshot", &e)),
    }
}

#[component]
pub fn SnapshotHistory(user_name: String, host: String, path: String) -> Element {
    let store = prefs::use_prefs();
    let nav = use_navigator();
    let source = SourceInfo::new(user_name, host, path);
    let mut show_all = use_signal(|| store.peek().prefs().default_snapshot_view_all);
    let reload = use_signal(|| 0u32);
    let mut selection = use_signal(Selection::default);
    let table = use_table();
    let exe = use_cli_executable();

    let snapshots = {
        let source = source.clone();
        use_resource(move || {
            let all = *show_all.read();
            let _ = reload.read();
            let source = source.clone();
            async move {
                let result = api::client().snapshots(&source, all).await;
                match &result {
                    Ok(resp) => selection.write().retain_existing(resp),
                    Err(e) => {
                        redirect_if_disconnected(nav, e);
                    }
                }
                result
            }
        })
    };

    let base2 = prefs::base2(store);
    let (rows, caption, error) = match &*snapshots.read() {
        Some(Ok(resp)) => (history_rows(resp, base2), hidden_caption(resp, *show_all.read()), None),
        Some(Err(e)) => (Vec::new(), String::new(), Some(e.clone())),
        None => (Vec::new(), String::new(), None),
    };
    let loading = snapshots.read().is_none();
    let row_count = rows.len();
    let visible: Vec<SnapshotRow> = table.read().visible_rows(&rows, snapshot_key).into_iter().cloned().collect();
    let all_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
    let selected = selection.read().len();

    let delete_selected = {
        let source = source.clone();
        let total = all_ids.len();
        move |_| {
            let count = selection.read().len();
            if count == 0 {
                return;
            }
            let with_source = count == total && confirm("Also delete the source and its policy?");
            if !confirm(&delete_confirmation(count, with_source)) {
                return;
            }
            let req = delete_request(&source, &selection.read(), with_source);
            let mut reload = reload;
            spawn(async move {
                match api::client().delete_snapshots(&req).await {
                    Ok(()) => {
                        selection.write().clear();
                        if with_source {
                            nav.push(Route::Snapshots {});
                        } else {
                            *reload.write() += 1;
                        }
                    }
                    Err(e) => alert(&alert_text("Error deleting snapshots", &e)),
                }
            });
        }
    };

    let select_all = move |_| {
        let mut sel = selection.write();
        sel.select_all(all_ids.iter().map(String::as_str));
    };

    let command = cli::snapshot_list(&exe.read(), &source);

    rsx! {
        section { class: "panel",
            h2 { "Snapshots of {source}" }
            div { class: "toolbar",
                label { style: "display:flex;gap:6px;align-items:center;",
                    input { r#type: "checkbox", checked: *show_all.read(), oninput: move |_| { let current = *show_all.read(); show_all.set(!current); } }
                    " Show all snapshots"
                }
                span { class: "muted", "{caption}" }
                button { class: "btn", onclick: select_all, "Select All" }
                button { class: "btn", disabled: selected == 0, onclick: move |_| selection.write().clear(), "Clear Selection" }
                button { class: "btn btn-danger", disabled: selected == 0, onclick: delete_selected, "Delete Selected ({selected})" }
                {loading.then(|| rsx!(Spinner {}))}
            }
            {error.map(|e| rsx!(ErrorBlock { prefix: "Unable to load snapshots", error: e }))}
            table { class: "grid",
                thead { tr {
                    th { "" }
                    SortHeader { table, column: 0, label: "Start time" }
                    SortHeader { table, column: 1, label: "Description" }
                    SortHeader { table, column: 2, label: "Root" }
                    SortHeader { table, column: 3, label: "Retention" }
                    SortHeader { table, column: 4, label: "Pins" }
                    SortHeader { table, column: 5, label: "Size", numeric: true }
                    SortHeader { table, column: 6, label: "Files", numeric: true }
                    SortHeader { table, column: 7, label: "Dirs", numeric: true }
                    th { "" }
                } }
                tbody {
                    for row in visible {
                        SnapshotRowView { key: "{row.id}", row: row.clone(), selection, reload }
                    }
                }
            }
            Pager { table, row_count }
            CliEquivalent { command }
        }
    }
}

#[component]
fn SnapshotRowView(row: SnapshotRow, selection: Signal<Selection>, reload: Signal<u32>) -> Element {
    let checked = selection.read().contains(&row.id);
    let browse = Route::DirBrowser { oid: row.root_id.clone(), label: row.start_time.clone() };
    let restore = Route::Restore { oid: row.root_id.clone(), label: row.start_time.clone() };
    let id = row.id.clone();
    let row_class = if row.incomplete { "incomplete" } else { "" };

    let edit_description = {
        let id = id.clone();
        let current = row.description.clone();
        move |_| {
            let Some(text) = prompt("Snapshot description", &current) else { return };
            spawn(apply_edit(description_edit(&id, &text), reload));
        }
    };
    let add_pin = {
        let id = id.clone();
        move |_| {
            let Some(pin) = prompt("Add pin to protect the snapshot from deletion", "do-not-delete") else { return };
            if let Some(req) = pin_edit(&id, "", &pin) {
                spawn(apply_edit(req, reload));
            }
        }
    };

    rsx! {
        tr { class: "{row_class}",
            td { input { r#type: "checkbox", checked, oninput: move |_| selection.write().toggle(&id) } }
            td { Link { to: browse, "{row.start_time}" } }
            td {
                span { class: "description", "{row.description}" }
                " "
                button { class: "btn btn-small", title: "Edit description", onclick: edit_description, "✎" }
            }
            td { code { "{row.root_id}" } }
            td { "{row.retention}" }
            td {
                for pin in row.pins.clone() {
                    PinBadge { key: "{pin}", snapshot_id: row.id.clone(), pin: pin.clone(), reload }
                }
                button { class: "btn btn-small", title: "Add pin", onclick: add_pin, "+" }
            }
            td { class: "num", "{row.size_text}" }
            td { class: "num", "{row.files}" }
            td { class: "num", "{row.dirs}" }
            td { Link { to: restore, class: "btn btn-small", "Restore" } }
        }
    }
}

#[component]
fn PinBadge(snapshot_id: String, pin: String, reload: Signal<u32>) -> Element {
    let rename = {
        let (snapshot_id, pin) = (snapshot_id.clone(), pin.clone());
        move |_| {
            let Some(new) = prompt("Change pin (empty to remove)", &pin) else { return };
            if let Some(req) = pin_edit(&snapshot_id, &pin, &new) {
                spawn(apply_edit(req, reload));
            }
        }
    };
    let label = pin.clone();
    let remove = move |_| {
        if let Some(req) = pin_edit(&snapshot_id, &pin, "") {
            spawn(apply_edit(req, reload));
        }
    };
    rsx! {
        span { class: "pin",
            span { onclick: rename, "📌 {label}" }
            button { class: "btn btn-small", title: "Remove pin", onclick: remove, "×" }
        }
    }
}
