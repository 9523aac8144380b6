#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::{object_download_url, ApiClient, Method};
    use crate::browse::*;
    use crate::cli;
    use crate::error::*;
    use crate::restore::*;
    use crate::tests::MockBackend;
    use crate::types::{DirManifest, SourceInfo};

    #[test]
    fn test_not_connected_is_recognised() {
        let err = ApiError::from_response(400, r#"{"code":"NOT_CONNECTED","error":"not connected"}"#);
        assert_eq!(err, ApiError::NotConnected);
        assert!(err.is_not_connected());
    }

    #[test]
    fn test_structured_error_message() {
        let err = ApiError::from_response(500, r#"{"code":"INTERNAL","error":"unable to open repository"}"#);
        assert_eq!(err.user_message(), "unable to open repository");
        assert_eq!(alert_text("Error saving policy", &err), "Error saving policy: unable to open repository");
        assert!(err.details().unwrap().contains("\"code\": \"INTERNAL\""));
    }

    #[test]
    fn test_unstructured_error_falls_back_to_generic_text() {
        let err = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.user_message(), "request failed with status code 502 (Bad Gateway)");
        assert_eq!(err.details().as_deref(), Some("<html>bad gateway</html>"));

        let not_found = ApiError::from_response(404, "");
        assert!(not_found.is_not_found());

        let network = ApiError::Network("connection refused".into());
        assert_eq!(alert_text("Error", &network), "Error: network error: connection refused");
    }

    #[test]
    fn test_alert_text_dumps_json_without_message() {
        let err = ApiError::from_response(500, r#"{"code":"INTERNAL","details":{"blob":"abc"}}"#);
        let text = alert_text("Error restoring", &err);
        assert!(text.starts_with("Error restoring: request failed with status code 500 (Internal Server Error)\n"));
        assert!(text.contains("\"blob\": \"abc\""));

        // no dump for non-JSON bodies
        let html = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(alert_text("Error", &html), "Error: request failed with status code 502 (Bad Gateway)");
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::InvalidNumber { field: "retention.keepDaily".into(), value: "x".into() };
        assert_eq!(err.field(), Some("retention.keepDaily"));
        assert_eq!(err.to_string(), "retention.keepDaily: 'x' is not a valid number");
    }

    #[tokio::test]
    async fn test_missing_preferences_decode_as_default() {
        let backend = MockBackend::new();
        backend.ok(Method::Get, "/ui-preferences", serde_json::Value::Null);
        let api = ApiClient::new(backend);
        let prefs = api.get_preferences().await.unwrap();
        assert_eq!(prefs.theme, "");
        assert_eq!(prefs.page_size, 0);
    }

    #[tokio::test]
    async fn test_decode_error_is_reported() {
        let backend = MockBackend::new();
        backend.ok(Method::Get, "/tasks", json!({ "tasks": "not a list" }));
        let api = ApiClient::new(backend);
        assert!(matches!(api.tasks().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_source_actions_use_source_query() {
        let backend = MockBackend::new();
        backend.ok(Method::Post, "/sources/upload", json!({}));
        backend.ok(Method::Post, "/sources/cancel", json!({}));
        backend.ok(Method::Post, "/repo/sync", json!({}));
        let api = ApiClient::new(backend);
        let source = SourceInfo::new("alice", "laptop", "/home/alice");

        api.start_upload(&source).await.unwrap();
        api.cancel_upload(&source).await.unwrap();
        api.sync_repo().await.unwrap();

        let paths: Vec<String> = api.backend().calls().into_iter().map(|c| c.path).collect();
        assert_eq!(
            paths,
            vec![
                "/sources/upload?userName=alice&host=laptop&path=%2Fhome%2Falice",
                "/sources/cancel?userName=alice&host=laptop&path=%2Fhome%2Falice",
                "/repo/sync",
            ]
        );
    }

    #[tokio::test]
    async fn test_mount_lifecycle() {
        let backend = MockBackend::new();
        backend.ok(Method::Post, "/mounts", json!({ "path": "/tmp/kopia-mount", "root": "k1" }));
        backend.ok(Method::Get, "/mounts/k1", json!({ "path": "/tmp/kopia-mount", "root": "k1" }));
        backend.ok(Method::Delete, "/mounts/k1", serde_json::Value::Null);
        let api = ApiClient::new(backend);

        assert_eq!(MountState::from(api.mount_status("k2").await.unwrap()), MountState::Unmounted);

        let mounted = api.mount("k1").await.unwrap();
        assert_eq!(mounted.path, "/tmp/kopia-mount");
        let state = MountState::from(api.mount_status("k1").await.unwrap());
        assert_eq!(state.path(), Some("/tmp/kopia-mount"));

        api.unmount("k1").await.unwrap();
        let posts = api.backend().calls_to(Method::Post, "/mounts");
        assert_eq!(posts[0].body, Some(json!({ "root": "k1" })));
    }

    #[test]
    fn test_directory_rows() {
        let manifest: DirManifest = serde_json::from_value(json!({
            "entries": [
                { "name": "notes.txt", "type": "f", "obj": "0123abc", "size": 2048, "mtime": "2024-05-01T10:00:00Z" },
                { "name": "photos", "type": "d", "obj": "k9f8e", "summ": { "size": 1500000, "files": 12, "dirs": 2 } },
                { "name": "empty", "type": "d", "obj": "kempty" }
            ]
        }))
        .unwrap();

        let rows = directory_rows(&manifest, false);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "photos", "notes.txt"]);

        assert!(rows[1].is_dir);
        assert_eq!(rows[1].size, 1_500_000);
        assert_eq!(rows[1].size_text, "1.5 MB");
        assert_eq!(rows[1].files, Some(12));
        assert_eq!(rows[1].download_url(), None);

        assert_eq!(rows[0].size, 0);
        assert_eq!(rows[0].size_text, "0 B");

        assert!(!rows[2].is_dir);
        assert_eq!(rows[2].download_url().unwrap(), "/api/v1/objects/0123abc?fname=notes.txt");
    }

    #[test]
    fn test_download_url_encodes_name() {
        assert_eq!(object_download_url("abc", "my file.txt"), "/api/v1/objects/abc?fname=my%20file.txt");
    }

    #[test]
    fn test_breadcrumbs() {
        let mut crumbs = Breadcrumbs::root("snapshot", "k1");
        crumbs.enter("docs", "k2");
        crumbs.enter("2024", "k3");
        assert_eq!(crumbs.relative_path(), "docs/2024");
        assert_eq!(crumbs.current(), Some("k3"));

        crumbs.enter("docs", "k2");
        assert_eq!(crumbs.entries.len(), 2);
        assert_eq!(crumbs.current(), Some("k2"));
    }

    #[test]
    fn test_restore_request_by_destination() {
        let opts = RestoreOptions::default();

        let zip = RestoreRequest::build("k1", "/tmp/out.ZIP", &opts).unwrap();
        assert_eq!(zip.zip_file.as_deref(), Some("/tmp/out.ZIP"));
        assert_eq!(zip.uncompressed_zip, Some(true));
        assert!(zip.tar_file.is_none() && zip.fs_output.is_none());

        let tar = RestoreRequest::build("k1", "/tmp/out.tar", &opts).unwrap();
        assert_eq!(tar.tar_file.as_deref(), Some("/tmp/out.tar"));
        assert!(tar.zip_file.is_none() && tar.fs_output.is_none());

        let fs = RestoreRequest::build("k1", "/tmp/restore", &RestoreOptions { restore_ownership: false, ..opts.clone() })
            .unwrap();
        let out = fs.fs_output.clone().unwrap();
        assert_eq!(out.target_path, "/tmp/restore");
        assert!(out.skip_owners);
        assert!(!out.skip_permissions);

        let body = serde_json::to_value(&fs).unwrap();
        assert_eq!(body["fsOutput"]["targetPath"], "/tmp/restore");
        assert_eq!(body["options"]["incremental"], true);
        assert_eq!(body["options"]["restoreDirEntryAtDepth"], 1_000_000);
        assert!(body.get("zipFile").is_none());
    }

    #[test]
    fn test_restore_requires_destination() {
        let err = RestoreRequest::build("k1", "  ", &RestoreOptions::default()).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "destination".into() });
    }

    #[tokio::test]
    async fn test_estimate_request() {
        assert!(EstimateRequest::new("").is_err());

        let backend = MockBackend::new();
        backend.ok(Method::Post, "/estimate", json!({ "id": "task-7" }));
        let api = ApiClient::new(backend);
        let created = api.estimate(&EstimateRequest::new("/home/alice").unwrap()).await.unwrap();
        assert_eq!(created.id, "task-7");

        let body = api.backend().calls()[0].body.clone().unwrap();
        assert_eq!(body, json!({ "root": "/home/alice", "maxExamplesPerBucket": 10 }));
    }

    #[test]
    fn test_cli_equivalents() {
        let alice = SourceInfo::new("alice", "laptop", "/home/alice/My Docs");
        assert_eq!(cli::policy_set("/usr/bin/kopia", &SourceInfo::global()), "/usr/bin/kopia policy set --global");
        assert_eq!(
            cli::policy_set("kopia", &alice),
            "kopia policy set 'alice@laptop:/home/alice/My Docs'"
        );
        assert_eq!(cli::snapshot_create("", "/srv"), "kopia snapshot create /srv");
        assert_eq!(cli::quote_arg("it's"), r"'it'\''s'");
        assert_eq!(cli::restore("kopia", "k1", "/tmp/out.zip"), "kopia snapshot restore k1 /tmp/out.zip");
    }
}
