//! Anzeige-Einstellungen; jede Änderung wird sofort übernommen und gespeichert.

use dioxus::prelude::*;
use kopia_console_core::preferences::{FONT_SIZES, PAGE_SIZES, THEMES};

use crate::prefs::{self, use_prefs};

fn font_size_label(class: &str) -> &'static str {
    match class {
        "fs-6" => "Small",
        "fs-5" => "Medium",
        "fs-4" => "Large",
        _ => "Custom",
    }
}

#[component]
pub fn Preferences() -> Element {
    let store = use_prefs();
    let p = store.read().prefs().clone();
    let base = if p.bytes_string_base2 { "2" } else { "10" };
    let page_size = p.page_size.to_string();

    rsx! {
        section { class: "panel",
            h2 { "Preferences" }
            div { class: "form-row",
                label { "Theme" }
                select {
                    class: "input",
                    value: "{p.theme}",
                    oninput: move |e| prefs::update(store, |s| s.set_theme(&e.value())),
                    for t in THEMES {
                        option { key: "{t}", value: "{t}", "{t}" }
                    }
                }
            }
            div { class: "form-row",
                label { "Font Size" }
                select {
                    class: "input",
                    value: "{p.font_size}",
                    oninput: move |e| prefs::update(store, |s| s.set_font_size(&e.value())),
                    for f in FONT_SIZES {
                        option { key: "{f}", value: "{f}", {font_size_label(f)} }
                    }
                }
            }
            div { class: "form-row",
                label { "Byte Representation" }
                select {
                    class: "input",
                    value: "{base}",
                    oninput: move |e| {
                        let base2 = e.value() == "2";
                        prefs::update(store, |s| s.set_byte_string_base(base2));
                    },
                    option { value: "10", "Base-10 (KB, MB, GB)" }
                    option { value: "2", "Base-2 (KiB, MiB, GiB)" }
                }
            }
            div { class: "form-row",
                label { "Page Size" }
                select {
                    class: "input",
                    value: "{page_size}",
                    oninput: move |e| {
                        if let Ok(size) = e.value().parse::<usize>() {
                            prefs::update(store, |s| s.set_page_size(size));
                        }
                    },
                    for n in PAGE_SIZES {
                        option { key: "{n}", value: "{n}", "{n}" }
                    }
                }
            }
            div { class: "form-row",
                label {
                    input {
                        r#type: "checkbox",
                        checked: p.default_snapshot_view_all,
                        onchange: move |e| {
                            let all = e.checked();
                            prefs::update(store, |s| s.set_default_snapshot_view_all(all));
                        },
                    }
                    " Show all snapshots by default, including identical ones"
                }
            }
        }
    }
}
