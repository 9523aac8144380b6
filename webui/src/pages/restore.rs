//! Wiederherstellen eines Snapshot-Verzeichnisses in ZIP, TAR oder Dateisystem.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::cli;
use kopia_console_core::error::alert_text;
use kopia_console_core::restore::{RestoreOptions, RestoreRequest, RestoreTarget};

use crate::components::cli_equivalent::{use_cli_executable, CliEquivalent};
use crate::hooks::redirect_if_disconnected;
use crate::ui_utils::{alert, has_kopia_ui, select_directory};
use crate::{api, Route};

type Flag = fn(&mut RestoreOptions) -> &mut bool;

const COMMON_FLAGS: &[(&str, Flag)] = &[
    ("Skip previously restored files and symlinks", |o: &mut RestoreOptions| &mut o.incremental),
    ("Continue on errors", |o: &mut RestoreOptions| &mut o.continue_on_errors),
];

const FS_FLAGS: &[(&str, Flag)] = &[
    ("Restore file ownership", |o: &mut RestoreOptions| &mut o.restore_ownership),
    ("Restore file permissions", |o: &mut RestoreOptions| &mut o.restore_permissions),
    ("Restore file modification time", |o: &mut RestoreOptions| &mut o.restore_mod_times),
    ("Ignore permission errors", |o: &mut RestoreOptions| &mut o.ignore_permission_errors),
    ("Overwrite files", |o: &mut RestoreOptions| &mut o.overwrite_files),
    ("Overwrite directories", |o: &mut RestoreOptions| &mut o.overwrite_directories),
    ("Overwrite symbolic links", |o: &mut RestoreOptions| &mut o.overwrite_symlinks),
    ("Write files atomically", |o: &mut RestoreOptions| &mut o.write_files_atomically),
    ("Write sparse files", |o: &mut RestoreOptions| &mut o.write_sparse_files),
];

const ZIP_FLAGS: &[(&str, Flag)] = &[("Disable ZIP compression", |o: &mut RestoreOptions| &mut o.uncompressed_zip)];

fn flag_boxes(flags: &'static [(&'static str, Flag)], mut opts: Signal<RestoreOptions>) -> Element {
    let current = opts.read().clone();
    rsx! {
        {flags.iter().map(|&(text, flag)| {
            let value = *flag(&mut current.clone());
            rsx! {
                label { key: "{text}", class: "check",
                    input { r#type: "checkbox", checked: value,
                        oninput: move |_| {
                            let mut o = opts.write();
                            let f = flag(&mut o);
                            *f = !*f;
                        }
                    }
                    " {text}"
                }
            }
        })}
    }
}

#[component]
pub fn Restore(oid: String, label: String) -> Element {
    let nav = use_navigator();
    let mut destination = use_signal(String::new);
    let mut opts = use_signal(RestoreOptions::default);
    let mut busy = use_signal(|| false);
    let exe = use_cli_executable();

    let submit = {
        let root = oid.clone();
        move |_| {
            let req = match RestoreRequest::build(&root, &destination.read(), &opts.read()) {
                Ok(r) => r,
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };
            busy.set(true);
            spawn(async move {
                match api::client().restore(&req).await {
                    Ok(created) => {
                        nav.push(Route::TaskDetails { tid: created.id });
                    }
                    Err(e) => {
                        if !redirect_if_disconnected(nav, &e) {
                            alert(&alert_text("Error starting restore", &e));
                        }
                    }
                }
                busy.set(false);
            });
        }
    };

    let dest = destination.read().clone();
    let target = RestoreTarget::for_destination(&dest);
    let depth = opts.read().restore_dir_entry_at_depth;
    let min_size = opts.read().min_size_for_placeholder;
    let command = cli::restore(&exe.read(), &oid, &dest);

    rsx! {
        section { class: "panel",
            h2 { "Restore" }
            p { class: "muted", "Restoring {label} " code { "{oid}" } }
            div { class: "toolbar",
                input {
                    class: "input grow",
                    placeholder: "enter destination path, or a .zip / .tar file name",
                    value: "{dest}",
                    oninput: move |e| destination.set(e.value()),
                }
                {has_kopia_ui().then(|| rsx!(button { class: "btn", onclick: move |_| select_directory(move |p| destination.set(p)), "Select Folder" }))}
            }
            p { class: "muted",
                {match target {
                    RestoreTarget::Zip => "Output: ZIP archive",
                    RestoreTarget::Tar => "Output: TAR archive",
                    RestoreTarget::Filesystem => "Output: local directory",
                }}
            }
            fieldset {
                legend { "Options" }
                {flag_boxes(COMMON_FLAGS, opts)}
                {(target == RestoreTarget::Filesystem).then(|| flag_boxes(FS_FLAGS, opts))}
                {(target == RestoreTarget::Zip).then(|| flag_boxes(ZIP_FLAGS, opts))}
                label { class: "field",
                    "Shallow restore at depth "
                    input { r#type: "number", min: "0", value: "{depth}",
                        oninput: move |e| {
                            if let Ok(v) = e.value().parse::<i64>() { opts.write().restore_dir_entry_at_depth = v; }
                        }
                    }
                }
                label { class: "field",
                    "Minimal file size for shallow restore "
                    input { r#type: "number", min: "0", value: "{min_size}",
                        oninput: move |e| {
                            if let Ok(v) = e.value().parse::<i64>() { opts.write().min_size_for_placeholder = v; }
                        }
                    }
                }
            }
            div { class: "toolbar",
                button { class: "btn btn-primary", disabled: dest.trim().is_empty() || *busy.read(), onclick: submit, "Begin Restore" }
                button { class: "btn", onclick: move |_| { nav.go_back(); }, "Back" }
            }
            CliEquivalent { command }
        }
    }
}
