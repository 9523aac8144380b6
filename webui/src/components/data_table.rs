//! Sortierung und Seitensteuerung der Tabellen.
//!
//! Jede Seite hält ihren eigenen `TableState` (über [`use_table`]) und rendert
//! die Zeilen selbst; hier liegen nur Kopfzelle und Pager.

use dioxus::prelude::*;
use kopia_console_core::preferences::PAGE_SIZES;
use kopia_console_core::table::{page_window, PageButton, SortDirection, TableState, MAX_PAGE_BUTTONS};

use crate::prefs;

/// Tabellenzustand, dessen Seitengröße der gemeinsamen Einstellung folgt.
pub fn use_table() -> Signal<TableState> {
    let store = prefs::use_prefs();
    let mut table = use_signal(|| TableState::new(prefs::page_size(store)));
    use_effect(move || {
        let wanted = prefs::page_size(store);
        if table.peek().page_size() != wanted {
            table.write().set_page_size(wanted);
        }
    });
    table
}

#[component]
pub fn SortHeader(table: Signal<TableState>, column: usize, label: String, #[props(default)] numeric: bool) -> Element {
    let marker = match table.read().sort() {
        Some(s) if s.column == column && s.direction == SortDirection::Ascending => " ▲",
        Some(s) if s.column == column => " ▼",
        _ => "",
    };
    let class = if numeric { "sortable num" } else { "sortable" };
    rsx! {
        th { class: "{class}", onclick: move |_| table.write().toggle_sort(column),
            "{label}{marker}"
        }
    }
}

#[component]
pub fn Pager(table: Signal<TableState>, row_count: usize) -> Element {
    let store = prefs::use_prefs();

    // Nach Filterung kann die Seite ausserhalb liegen
    use_effect(use_reactive((&row_count,), move |(row_count,)| {
        if table.peek().page_index() >= table.peek().page_count(row_count) {
            table.write().clamp_page(row_count);
        }
    }));

    let state = table.read().clone();
    let count = state.page_count(row_count);
    let current = state.page_index();
    let buttons = page_window(current, count, MAX_PAGE_BUTTONS);
    let page_size = state.page_size();
    let range = state.page_range(row_count);
    let summary = if row_count == 0 {
        "No items".to_string()
    } else {
        format!("Showing {}-{} of {}", range.start + 1, range.end, row_count)
    };

    rsx! {
        div { class: "pager",
            button { class: "btn", disabled: !state.can_previous(), onclick: move |_| table.write().first(), "«" }
            button { class: "btn", disabled: !state.can_previous(), onclick: move |_| table.write().previous(), "‹" }
            {buttons.into_iter().enumerate().map(|(i, b)| match b {
                PageButton::Page(p) => {
                    let class = if p == current { "btn btn-primary" } else { "btn" };
                    rsx! {
                        button { key: "{i}", class: "{class}", onclick: move |_| table.write().go_to(p, row_count), "{p + 1}" }
                    }
                }
                PageButton::Ellipsis => rsx! { span { key: "{i}", class: "muted", "…" } },
            })}
            button { class: "btn", disabled: !state.can_next(row_count), onclick: move |_| table.write().next(row_count), "›" }
            button { class: "btn", disabled: !state.can_next(row_count), onclick: move |_| table.write().last(row_count), "»" }
            span { class: "muted", "{summary}" }
            select {
                value: "{page_size}",
                oninput: move |e| {
                    let Ok(n) = e.value().parse::<usize>() else { return };
                    let used = table.write().set_page_size(n);
                    prefs::update(store, move |s| s.set_page_size(used));
                },
                for size in PAGE_SIZES {
                    option { value: "{size}", "Page size: {size}" }
                }
            }
        }
    }
}
