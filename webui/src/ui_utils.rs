use std::time::Duration;

use chrono::{DateTime, Utc};
use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

pub fn now() -> DateTime<Utc> { Utc::now() }

/// Timer für `poll_until`.
pub async fn sleep(d: Duration) { gloo_timers::future::sleep(d).await }

// Copy text to clipboard and show a toast on success
pub fn copy_to_clipboard(text: String) {
    if let Some(win) = web_sys::window() {
        let promise = win.navigator().clipboard().write_text(&text);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => show_toast("Copied to clipboard"),
                Err(_) => show_toast("Unable to copy to clipboard"),
            }
        });
    }
}

// Show a transient toast in the #toasts container
pub fn show_toast(message: &str) {
    let Some(win) = web_sys::window() else { return };
    let Some(doc) = win.document() else { return };
    let Some(container) = doc.get_element_by_id("toasts") else { return };
    let Ok(toast) = doc.create_element("div") else { return };
    toast.set_class_name("toast fade-in");
    toast.set_text_content(Some(message));
    if container.append_child(&toast).is_err() {
        return;
    }

    // Auto-remove after timeout
    let cb = Closure::wrap(Box::new(move || {
        let _ = container.remove_child(&toast);
    }) as Box<dyn FnMut()>);
    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 1600);
    cb.forget();
}

/// Blockierender Hinweis für fehlgeschlagene Aktionen.
pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` bei Abbruch.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window().and_then(|w| w.prompt_with_message_and_default(message, default).ok().flatten())
}

pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// Ersetzt die Klassenliste von <html> vollständig (Theme + Schriftgröße).
pub fn apply_root_classes(classes: &[String]) {
    if let Some(root) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
        root.set_class_name(&classes.join(" "));
    }
}

// ----- Desktop-Einbettung: window.kopiaUI -----

fn kopia_ui() -> Option<JsValue> {
    let win = web_sys::window()?;
    let host = Reflect::get(&win, &JsValue::from_str("kopiaUI")).ok()?;
    (!host.is_undefined() && !host.is_null()).then_some(host)
}

fn kopia_ui_fn(name: &str) -> Option<(JsValue, Function)> {
    let host = kopia_ui()?;
    let f = Reflect::get(&host, &JsValue::from_str(name)).ok()?.dyn_into::<Function>().ok()?;
    Some((host, f))
}

/// Im normalen Browser fehlt das Objekt; Knöpfe werden dann ausgeblendet.
pub fn has_kopia_ui() -> bool { kopia_ui().is_some() }

/// Öffnet einen Pfad im Dateimanager des Hosts.
pub fn browse_directory(path: &str) {
    if let Some((host, f)) = kopia_ui_fn("browseDirectory") {
        let _ = f.call1(&host, &JsValue::from_str(path));
    }
}

/// Nativer Ordnerdialog; `on_selected` erhält den gewählten Pfad.
pub fn select_directory<F>(on_selected: F)
where
    F: 'static + FnMut(String),
{
    let Some((host, f)) = kopia_ui_fn("selectDirectory") else { return };
    let mut on_selected = on_selected;
    let cb = Closure::<dyn FnMut(JsValue)>::new(move |v: JsValue| {
        if let Some(path) = v.as_string().filter(|p| !p.is_empty()) {
            on_selected(path);
        }
    });
    let _ = f.call1(&host, cb.as_ref().unchecked_ref());
    // Der Host ruft genau einmal zurück
    cb.forget();
}

// Trigger a download from a regular URL (server-provided content)
/// If a suggested filename is provided, set the 'download' attribute to hint the browser.
pub fn trigger_download(url: &str, suggested_filename: Option<&str>) {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else { return };
    let Ok(a) = doc.create_element("a") else { return };
    let _ = a.set_attribute("href", url);
    if let Some(name) = suggested_filename {
        let _ = a.set_attribute("download", name);
    }
    if let Some(body) = doc.body() {
        let _ = body.append_child(&a);
        if let Some(ae) = a.dyn_ref::<web_sys::HtmlElement>() {
            ae.click();
        }
        let _ = body.remove_child(&a);
    }
}
