#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::{ApiClient, Method};
    use crate::error::ApiError;
    use crate::preferences::*;
    use crate::tests::MockBackend;

    #[test]
    fn test_normalize_page_size_examples() {
        let cases = [(5, 10), (15, 10), (25, 20), (35, 30), (45, 40), (75, 50), (150, 100)];
        for (input, expected) in cases {
            assert_eq!(normalize_page_size(input), expected, "input {}", input);
        }
    }

    #[test]
    fn test_normalize_page_size_keeps_allowed_values() {
        for size in PAGE_SIZES {
            assert_eq!(normalize_page_size(size), size);
        }
        assert_eq!(normalize_page_size(0), 10);
    }

    #[test]
    fn test_with_defaults_fills_missing_fields() {
        let prefs = UiPreferences::default().with_defaults(true);
        assert_eq!(prefs.theme, "dark");
        assert_eq!(prefs.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(prefs.font_size, "fs-6");

        let light = UiPreferences::default().with_defaults(false);
        assert_eq!(light.theme, "light");
    }

    #[test]
    fn test_with_defaults_keeps_stored_values() {
        let stored = UiPreferences {
            theme: "ocean".into(),
            page_size: 75,
            bytes_string_base2: true,
            default_snapshot_view_all: true,
            font_size: "fs-4".into(),
        };
        let prefs = stored.with_defaults(true);
        assert_eq!(prefs.theme, "ocean");
        assert_eq!(prefs.page_size, 50);
        assert!(prefs.bytes_string_base2);
        assert_eq!(prefs.font_size, "fs-4");
    }

    #[test]
    fn test_root_classes_are_theme_and_font_size() {
        let prefs = UiPreferences { theme: "pastel".into(), font_size: "fs-5".into(), ..Default::default() };
        assert_eq!(prefs.root_classes(), vec!["pastel".to_string(), "fs-5".to_string()]);
    }

    #[tokio::test]
    async fn test_load_uses_backend_values() {
        let backend = MockBackend::new();
        backend.ok(
            Method::Get,
            "/ui-preferences",
            json!({ "theme": "light", "pageSize": 30, "bytesStringBase2": true }),
        );
        let api = ApiClient::new(backend);

        let store = PreferencesStore::load(&api, true).await;
        assert_eq!(store.prefs().theme, "light");
        assert_eq!(store.prefs().page_size, 30);
        assert!(store.prefs().bytes_string_base2);
        assert_eq!(store.prefs().font_size, "fs-6");
    }

    #[tokio::test]
    async fn test_load_falls_back_to_defaults_on_error() {
        let backend = MockBackend::new();
        backend.respond(Method::Get, "/ui-preferences", Err(ApiError::Network("offline".into())));
        let api = ApiClient::new(backend);

        let store = PreferencesStore::load(&api, true).await;
        assert_eq!(store.prefs().theme, "dark");
        assert_eq!(store.prefs().page_size, 10);
    }

    #[tokio::test]
    async fn test_setter_updates_memory_and_writes_full_object() {
        let backend = MockBackend::new();
        backend.ok(Method::Put, "/ui-preferences", json!({}));
        let api = ApiClient::new(backend);

        let mut store = PreferencesStore::default();
        let updated = store.set_page_size(25);
        assert_eq!(store.prefs().page_size, 20);
        assert!(save_preferences(&api, &updated).await);

        let puts = api.backend().calls_to(Method::Put, "/ui-preferences");
        assert_eq!(puts.len(), 1);
        let body = puts[0].body.clone().unwrap();
        assert_eq!(body["pageSize"], 20);
        assert_eq!(body["theme"], "light");
        assert_eq!(body["fontSize"], "fs-6");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_optimistic_state() {
        let backend = MockBackend::new();
        backend.respond(Method::Put, "/ui-preferences", Err(ApiError::Network("offline".into())));
        let api = ApiClient::new(backend);

        let mut store = PreferencesStore::default();
        let updated = store.set_theme("ocean");
        assert!(!save_preferences(&api, &updated).await);
        assert_eq!(store.prefs().theme, "ocean");
    }
}
