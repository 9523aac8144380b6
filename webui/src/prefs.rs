//! Gemeinsame Anzeige-Einstellungen als Kontext-Signal.
//!
//! Die Shell lädt die Einstellungen einmal beim Start und stellt sie allen
//! Seiten bereit. Änderungen wirken sofort; das Zurückschreiben läuft im
//! Hintergrund, Fehler landen nur im Log.

use dioxus::prelude::*;
use kopia_console_core::preferences::{save_preferences, PreferencesStore, UiPreferences};

use crate::api;
use crate::ui_utils::{apply_root_classes, prefers_dark};

pub type Prefs = Signal<PreferencesStore>;

/// In der Shell aufrufen.
pub fn use_prefs_provider() -> Prefs {
    let store = use_context_provider(|| Signal::new(PreferencesStore::default()));
    use_hook(move || {
        let mut store = store;
        spawn(async move {
            let loaded = PreferencesStore::load(&api::client(), prefers_dark()).await;
            apply_root_classes(&loaded.prefs().root_classes());
            store.set(loaded);
        });
    });
    store
}

pub fn use_prefs() -> Prefs { use_context::<Prefs>() }

/// Ändert eine Einstellung und schreibt das ganze Objekt zurück.
pub fn update(mut store: Prefs, change: impl FnOnce(&mut PreferencesStore) -> UiPreferences) {
    let prefs = change(&mut store.write());
    apply_root_classes(&prefs.root_classes());
    spawn(async move {
        if !save_preferences(&api::client(), &prefs).await {
            web_sys::console::warn_1(&"Einstellungen konnten nicht gespeichert werden".into());
        }
    });
}

pub fn base2(store: Prefs) -> bool { store.read().prefs().bytes_string_base2 }

pub fn page_size(store: Prefs) -> usize { store.read().prefs().page_size }
