//! Richtlinien-Editor: ein Formular je Abschnitt, daneben der geerbte Wert.
//!
//! Jede Änderung landet sofort im Entwurf und wird beim Backend aufgelöst,
//! damit "effektiver Wert" und die nächsten Snapshot-Zeiten aktuell bleiben.
//! Gespeichert wird nur ein bereinigter Entwurf.

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::cli;
use kopia_console_core::error::alert_text;
use kopia_console_core::policy::{EditorError, FieldKind, FieldSpec, PolicyEditor, SECTIONS};
use kopia_console_core::types::SourceInfo;
use kopia_console_core::ApiError;

use crate::components::cli_equivalent::{use_cli_executable, CliEquivalent};
use crate::components::status::{ErrorBlock, Spinner};
use crate::hooks::redirect_if_disconnected;
use crate::pages::policies::edit_route;
use crate::ui_utils::{alert, confirm, show_toast};
use crate::{api, Route};

const BOOL_OPTIONS: &[(&str, &str)] = &[("true", "yes"), ("false", "no")];

fn report(prefix: &str, err: &EditorError) {
    match err {
        EditorError::Api(e) => alert(&alert_text(prefix, e)),
        other => alert(&format!("{}: {}", prefix, other)),
    }
}

/// Entwurf beim Backend auflösen; nur das Ergebnis wird zurückgeschrieben.
fn resolve(mut editor: Signal<PolicyEditor>) {
    let (target, draft) = {
        let ed = editor.peek();
        (ed.target().clone(), ed.draft().clone())
    };
    spawn(async move {
        if let Some(resolved) = PolicyEditor::fetch_resolved(&api::client(), &target, &draft).await {
            editor.write().apply_resolved(&draft, resolved);
        }
    });
}

#[component]
pub fn PolicyEdit(user_name: String, host: String, path: String) -> Element {
    let nav = use_navigator();
    let target = SourceInfo::new(user_name, host, path);
    let mut editor = use_signal(|| PolicyEditor::new(target.clone()));
    let mut load_error = use_signal(|| None as Option<ApiError>);
    let mut loaded = use_signal(|| false);
    let exe = use_cli_executable();

    // Neues Ziel über die Route: neu laden
    use_effect(use_reactive((&target,), move |(target,)| {
        spawn(async move {
            loaded.set(false);
            let mut ed = PolicyEditor::new(target);
            match ed.load(&api::client()).await {
                Ok(()) => load_error.set(None),
                Err(e) => {
                    redirect_if_disconnected(nav, &e);
                    load_error.set(Some(e));
                }
            }
            editor.set(ed);
            loaded.set(true);
        });
    }));

    let save = move |_| {
        spawn(async move {
            let mut ed = editor.peek().clone();
            match ed.save(&api::client()).await {
                Ok(()) => {
                    editor.set(ed);
                    show_toast("Policy saved");
                    nav.push(Route::Policies {});
                }
                Err(e) => report("Error saving policy", &e),
            }
        });
    };

    let delete = move |_| {
        let message = editor.read().delete_confirmation();
        if !confirm(&message) {
            return;
        }
        spawn(async move {
            let mut ed = editor.peek().clone();
            match ed.delete(&api::client()).await {
                Ok(()) => {
                    show_toast("Policy deleted");
                    nav.push(Route::Policies {});
                }
                Err(e) => report("Error deleting policy", &e),
            }
        });
    };

    let ed = editor.read();
    let is_global = ed.is_global();
    let is_new = ed.is_new();
    let has_errors = ed.has_errors();
    let invalid_times = ed.draft().invalid_times().join(", ");
    let preview = ed.draft().preview();
    let (upcoming, scheduling_error) = ed
        .resolved()
        .map(|r| (r.upcoming_times(), r.scheduling_error.clone()))
        .unwrap_or_default();
    drop(ed);
    let command = cli::policy_set(&exe.read(), &target);
    let title = if is_global { "Global Policy".to_string() } else { format!("Policy for {}", target) };

    rsx! {
        section { class: "panel",
            h2 { "{title}" }
            {is_new.then(|| rsx!(p { class: "muted", "No policy is defined yet; saving creates one." }))}
            {(!*loaded.read()).then(|| rsx!(div { class: "muted", Spinner {} " Loading policy..." }))}
            {load_error.read().clone().map(|e| rsx!(ErrorBlock { prefix: "Unable to load policy", error: e }))}
            {(!invalid_times.is_empty()).then(|| rsx!(
                div { class: "alert alert-error", "Invalid time of day: {invalid_times}" }
            ))}
            for section in SECTIONS {
                fieldset { key: "{section.title}", class: "policy-section",
                    legend { "{section.title}" }
                    for field in section.fields {
                        PolicyField { key: "{field.path}", editor, field }
                    }
                }
            }
            fieldset { class: "policy-section",
                legend { "Upcoming Snapshots" }
                {scheduling_error.map(|e| rsx!(div { class: "alert alert-error", "{e}" }))}
                {upcoming.is_empty().then(|| rsx!(p { class: "muted", "No upcoming snapshots" }))}
                ul {
                    for t in upcoming {
                        li { key: "{t}", "{t}" }
                    }
                }
            }
            details {
                summary { "JSON" }
                pre { class: "policy-preview", "{preview}" }
            }
            div { class: "toolbar",
                button { class: "btn btn-primary", disabled: has_errors || !invalid_times.is_empty(), onclick: save, "Save Policy" }
                {(!is_global && !is_new).then(|| rsx!(button { class: "btn btn-danger", onclick: delete, "Delete Policy" }))}
                Link { to: Route::Policies {}, class: "btn", "Back" }
            }
            CliEquivalent { command }
        }
    }
}

#[component]
fn PolicyField(editor: Signal<PolicyEditor>, field: &'static FieldSpec) -> Element {
    let ed = editor.read();
    let value = ed.draft().display(field);
    let error = ed.field_error(field.path).map(str::to_string);
    let effective = ed.effective(field.path);
    let defined_elsewhere = effective.defined_elsewhere(ed.target()).cloned();
    let compressors = matches!(field.kind, FieldKind::Compressor).then(|| ed.compression_options());
    drop(ed);
    let effective_text = effective.text();
    let field_class = if error.is_some() { "policy-field has-error" } else { "policy-field" };

    let on_input = move |e: Event<FormData>| {
        let input = e.value();
        // Ungültige Eingaben bleiben markiert, ohne den Entwurf zu ändern
        if editor.write().update(field, &input).is_ok() {
            resolve(editor);
        }
    };

    let control = match field.kind {
        FieldKind::Bool => select_control(&value, BOOL_OPTIONS.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect(), on_input),
        FieldKind::Select(options) => select_control(&value, options.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect(), on_input),
        FieldKind::Compressor => {
            // Erster Eintrag ist "(inherit)" mit leerem Wert
            let options = compressors.unwrap_or_default().into_iter().skip(1).collect();
            select_control(&value, options, on_input)
        }
        FieldKind::StringList | FieldKind::TimeOfDayList => rsx! {
            textarea { class: "input", rows: "3", value: "{value}", onchange: on_input }
        },
        FieldKind::Number | FieldKind::Bytes | FieldKind::Text => rsx! {
            input { class: "input", value: "{value}", placeholder: "{effective_text}", onchange: on_input }
        },
    };

    rsx! {
        div { class: field_class,
            label { title: "{field.help}", "{field.label}" }
            {control}
            span { class: "effective muted",
                "{effective_text}"
                {defined_elsewhere.map(|src| rsx!(
                    " Defined by "
                    Link { to: edit_route(&src), "{src}" }
                ))}
            }
            {error.map(|e| rsx!(span { class: "field-error", "{e}" }))}
        }
    }
}

fn select_control(value: &str, options: Vec<(String, String)>, on_input: impl FnMut(Event<FormData>) + 'static) -> Element {
    rsx! {
        select { class: "input", value: "{value}", oninput: on_input,
            option { value: "", "(inherit)" }
            for (v, l) in options {
                option { key: "{v}", value: "{v}", "{l}" }
            }
        }
    }
}
