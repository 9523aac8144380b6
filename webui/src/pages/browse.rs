//! Verzeichnisansicht eines Snapshots mit Mount/Unmount.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::browse::{directory_rows, Breadcrumbs, DirEntryRow, MountState};
use kopia_console_core::error::alert_text;
use kopia_console_core::table::SortKey;

use crate::components::data_table::{use_table, Pager, SortHeader};
use crate::components::status::{ErrorBlock, Spinner};
use crate::hooks::redirect_if_disconnected;
use crate::ui_utils::{alert, browse_directory, copy_to_clipboard, has_kopia_ui, trigger_download};
use crate::{api, prefs, Route};

fn entry_key(column: usize, row: &DirEntryRow) -> SortKey {
    match column {
        0 => row.name.as_str().into(),
        1 => row.size.into(),
        2 => row.mtime.as_str().into(),
        3 => row.files.into(),
        _ => row.dirs.into(),
    }
}

#[component]
pub fn DirBrowser(oid: String, label: String) -> Element {
    let store = prefs::use_prefs();
    let nav = use_navigator();
    let mut crumbs = use_signal(|| Breadcrumbs::root(&label, &oid));
    let mut mount = use_signal(MountState::default);
    let table = use_table();

    // Neuer Snapshot über die Route: Pfad zurücksetzen
    use_effect(use_reactive((&oid, &label), move |(oid, label)| {
        let same_root = crumbs.peek().entries.first().is_some_and(|(_, root)| *root == oid);
        if !same_root {
            crumbs.set(Breadcrumbs::root(&label, &oid));
        }
    }));

    let listing = use_resource(move || {
        let current = crumbs.read().current().unwrap_or_default().to_string();
        async move {
            let result = api::client().directory(&current).await;
            if let Err(e) = &result {
                redirect_if_disconnected(nav, e);
            }
            result
        }
    });

    {
        let root = oid.clone();
        use_hook(move || {
            spawn(async move {
                match api::client().mount_status(&root).await {
                    Ok(m) => mount.set(MountState::from(m)),
                    Err(e) => web_sys::console::warn_1(&format!("Mount-Status: {}", e).into()),
                }
            });
        });
    }

    let base2 = prefs::base2(store);
    let (rows, error) = match &*listing.read() {
        Some(Ok(manifest)) => (directory_rows(manifest, base2), None),
        Some(Err(e)) => (Vec::new(), Some(e.clone())),
        None => (Vec::new(), None),
    };
    let loading = listing.read().is_none();
    let row_count = rows.len();
    let visible: Vec<DirEntryRow> = table.read().visible_rows(&rows, entry_key).into_iter().cloned().collect();

    let trail = crumbs.read().entries.clone();
    let current_oid = crumbs.read().current().unwrap_or_default().to_string();
    let relative = crumbs.read().relative_path();
    let restore_label = if relative.is_empty() { label.clone() } else { format!("{}/{}", label, relative) };
    let mounted_path = mount.read().path().map(str::to_string);

    let do_mount = {
        let root = oid.clone();
        move |_| {
            let root = root.clone();
            spawn(async move {
                match api::client().mount(&root).await {
                    Ok(m) => mount.set(MountState::from(Some(m))),
                    Err(e) => alert(&alert_text("Error mounting snapshot", &e)),
                }
            });
        }
    };
    let do_unmount = {
        let root = oid.clone();
        move |_| {
            let root = root.clone();
            spawn(async move {
                match api::client().unmount(&root).await {
                    Ok(()) => mount.set(MountState::Unmounted),
                    Err(e) => alert(&alert_text("Error unmounting snapshot", &e)),
                }
            });
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Browse" }
            nav { class: "breadcrumbs",
                for (i, (name, crumb_oid)) in trail.into_iter().enumerate() {
                    Crumb { key: "{i}", first: i == 0, name, oid: crumb_oid, crumbs }
                }
            }
            div { class: "toolbar",
                {match mounted_path.clone() {
                    Some(path) => rsx! {
                        span { "Mounted at " code { "{path}" } }
                        button { class: "btn btn-small", onclick: { let p = path.clone(); move |_| copy_to_clipboard(p.clone()) }, "Copy" }
                        {has_kopia_ui().then(|| {
                            let p = path.clone();
                            rsx!(button { class: "btn", onclick: move |_| browse_directory(&p), "Browse" })
                        })}
                        button { class: "btn", onclick: do_unmount, "Unmount" }
                    },
                    None => rsx! { button { class: "btn", onclick: do_mount, "Mount as Local Filesystem" } },
                }}
                Link { to: Route::Restore { oid: current_oid.clone(), label: restore_label }, class: "btn btn-primary", "Restore Files & Directories" }
                {loading.then(|| rsx!(Spinner {}))}
            }
            {error.map(|e| rsx!(ErrorBlock { prefix: "Unable to list directory", error: e }))}
            table { class: "grid",
                thead { tr {
                    SortHeader { table, column: 0, label: "Name" }
                    SortHeader { table, column: 1, label: "Size", numeric: true }
                    SortHeader { table, column: 2, label: "Last Modification" }
                    SortHeader { table, column: 3, label: "Files", numeric: true }
                    SortHeader { table, column: 4, label: "Directories", numeric: true }
                } }
                tbody {
                    for row in visible {
                        EntryRow { key: "{row.object_id}-{row.name}", row: row.clone(), crumbs }
                    }
                }
            }
            Pager { table, row_count }
        }
    }
}

#[component]
fn Crumb(first: bool, name: String, oid: String, crumbs: Signal<Breadcrumbs>) -> Element {
    let label = name.clone();
    rsx! {
        span {
            {(!first).then(|| rsx!(" / "))}
            a { href: "#",
                onclick: move |e: Event<MouseData>| {
                    e.prevent_default();
                    crumbs.write().enter(&name, &oid);
                },
                "{label}"
            }
        }
    }
}

#[component]
fn EntryRow(row: DirEntryRow, crumbs: Signal<Breadcrumbs>) -> Element {
    let files = row.files.map(|f| f.to_string()).unwrap_or_default();
    let dirs = row.dirs.map(|d| d.to_string()).unwrap_or_default();
    let name_cell = match row.download_url() {
        None => {
            let (name, oid) = (row.name.clone(), row.object_id.clone());
            rsx! {
                a { href: "#", class: "dir",
                    onclick: move |e: Event<MouseData>| {
                        e.prevent_default();
                        crumbs.write().enter(&name, &oid);
                    },
                    "📁 {row.name}/"
                }
            }
        }
        Some(url) => {
            let name = row.name.clone();
            let href = url.clone();
            rsx! {
                a { href: "{href}", class: "file",
                    onclick: move |e: Event<MouseData>| {
                        e.prevent_default();
                        trigger_download(&url, Some(&name));
                    },
                    "{row.name}"
                }
            }
        }
    };
    rsx! {
        tr {
            td { {name_cell} }
            td { class: "num", "{row.size_text}" }
            td { "{row.mtime}" }
            td { class: "num", "{files}" }
            td { class: "num", "{dirs}" }
        }
    }
}
