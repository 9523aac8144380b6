//! Display preferences shared by every screen.
//!
//! The backend stores the preferences as an opaque blob behind
//! `/api/v1/ui-preferences`. The console fetches it once at start-up, fills
//! in defaults for anything missing, and writes the whole object back after
//! every change. Writes are optimistic: the in-memory copy changes first and a
//! failed write is only logged.

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, Backend};

/// Page sizes offered by every table.
pub const PAGE_SIZES: [usize; 6] = [10, 20, 30, 40, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const THEMES: [&str; 4] = ["light", "dark", "pastel", "ocean"];
pub const FONT_SIZES: [&str; 3] = ["fs-6", "fs-5", "fs-4"];
pub const DEFAULT_FONT_SIZE: &str = "fs-6";

/// Snaps an arbitrary page size to one of [`PAGE_SIZES`]: the largest allowed
/// value not above the input, 10 for anything smaller and 100 for anything
/// larger.
pub fn normalize_page_size(page_size: usize) -> usize {
    for (i, &allowed) in PAGE_SIZES.iter().enumerate() {
        if page_size == allowed {
            return allowed;
        }
        if page_size < allowed {
            return if i == 0 { allowed } else { PAGE_SIZES[i - 1] };
        }
    }
    PAGE_SIZES[PAGE_SIZES.len() - 1]
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub page_size: usize,
    #[serde(default)]
    pub bytes_string_base2: bool,
    #[serde(default)]
    pub default_snapshot_view_all: bool,
    #[serde(default)]
    pub font_size: String,
}

impl UiPreferences {
    /// Fills missing or empty fields. The theme follows the OS colour scheme.
    pub fn with_defaults(mut self, prefers_dark: bool) -> Self {
        if self.theme.is_empty() {
            self.theme = if prefers_dark { "dark" } else { "light" }.to_string();
        }
        self.page_size = if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            normalize_page_size(self.page_size)
        };
        if self.font_size.is_empty() {
            self.font_size = DEFAULT_FONT_SIZE.to_string();
        }
        self
    }

    /// Class list of the document root element: exactly the theme and the
    /// font size, replacing whatever was there.
    pub fn root_classes(&self) -> Vec<String> {
        vec![self.theme.clone(), self.font_size.clone()]
    }
}

/// In-memory owner of the current preferences.
///
/// Every setter mutates synchronously and returns the full object that has to
/// be written back with [`save_preferences`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesStore {
    prefs: UiPreferences,
}

impl PreferencesStore {
    pub fn new(prefs: UiPreferences) -> Self {
        Self { prefs }
    }

    /// Fetches the stored preferences; falls back to defaults on any error.
    pub async fn load<B: Backend>(api: &ApiClient<B>, prefers_dark: bool) -> Self {
        let prefs = match api.get_preferences().await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("unable to load UI preferences, using defaults: {}", e);
                UiPreferences::default()
            }
        };
        Self::new(prefs.with_defaults(prefers_dark))
    }

    pub fn prefs(&self) -> &UiPreferences {
        &self.prefs
    }

    pub fn set_theme(&mut self, theme: &str) -> UiPreferences {
        self.prefs.theme = theme.to_string();
        self.prefs.clone()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> UiPreferences {
        self.prefs.page_size = normalize_page_size(page_size);
        self.prefs.clone()
    }

    pub fn set_byte_string_base(&mut self, base2: bool) -> UiPreferences {
        self.prefs.bytes_string_base2 = base2;
        self.prefs.clone()
    }

    pub fn set_default_snapshot_view_all(&mut self, all: bool) -> UiPreferences {
        self.prefs.default_snapshot_view_all = all;
        self.prefs.clone()
    }

    pub fn set_font_size(&mut self, font_size: &str) -> UiPreferences {
        self.prefs.font_size = font_size.to_string();
        self.prefs.clone()
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new(UiPreferences::default().with_defaults(false))
    }
}

/// Writes the preferences back. Failures are logged and reported as `false`;
/// the caller's in-memory state already reflects the change.
pub async fn save_preferences<B: Backend>(api: &ApiClient<B>, prefs: &UiPreferences) -> bool {
    match api.put_preferences(prefs).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("unable to save UI preferences: {}", e);
            false
        }
    }
}
