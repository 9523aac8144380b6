#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value as JsonValue};

    use crate::api::{ApiClient, Method};
    use crate::format::parse_timestamp;
    use crate::polling::PollControl;
    use crate::snapshots::*;
    use crate::sources::*;
    use crate::tasks::StatusDisplay;
    use crate::tests::MockBackend;
    use crate::types::{SnapshotsResponse, SourceInfo, SourcesResponse, UploadCounters};

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-05-01T10:10:00Z").unwrap()
    }

    fn listing(status: &str) -> JsonValue {
        json!({
            "localUsername": "alice",
            "localHost": "laptop",
            "sources": [
                {
                    "source": { "userName": "alice", "host": "laptop", "path": "/home/alice" },
                    "status": status,
                    "lastSnapshot": {
                        "startTime": "2024-05-01T10:00:00Z",
                        "endTime": "2024-05-01T10:02:30Z",
                        "rootEntry": { "obj": "k123", "summ": { "size": 1048576 } }
                    },
                    "upload": { "hashedFiles": 3, "hashedBytes": 500000, "estimatedBytes": 1000000 }
                },
                {
                    "source": { "userName": "bob", "host": "server", "path": "/srv" },
                    "status": "REMOTE"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_running_source_then_success_on_next_poll() {
        let backend = MockBackend::new();
        backend.ok(Method::Get, "/sources", listing("UPLOADING"));
        backend.ok(Method::Get, "/sources", listing("IDLE"));
        let api = ApiClient::new(backend);
        let mut view = SourcesView::default();

        assert_eq!(view.refresh(&api).await, PollControl::Continue);
        let rows = view.rows(&OwnerFilter::Local, false, now());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].status.has_spinner());
        assert_eq!(rows[0].actions, vec![SourceAction::Cancel]);
        assert!(rows[0].status.text().contains("500 KB / 1 MB (50%)"));

        view.refresh(&api).await;
        let rows = view.rows(&OwnerFilter::Local, false, now());
        assert!(!rows[0].status.has_spinner());
        assert_eq!(rows[0].status, StatusDisplay::Succeeded { elapsed: "2m 30s".into() });
        assert_eq!(rows[0].actions, vec![SourceAction::SnapshotNow]);
        assert_eq!(rows[0].last_snapshot_size_text, "1 MB");
    }

    #[test]
    fn test_pending_and_canceling_do_not_time_last_snapshot() {
        for (status, label, actions) in [
            ("PENDING", "Pending", vec![SourceAction::Cancel]),
            ("CANCELING", "Canceling", vec![]),
        ] {
            let mut body = listing(status);
            body["sources"][0]["lastSnapshot"]["startTime"] = json!("2024-04-28T10:00:00Z");
            let resp: SourcesResponse = serde_json::from_value(body).unwrap();
            let row = SourceRow::build(&resp.sources[0], false, now());

            assert!(row.status.has_spinner());
            assert_eq!(row.status.text(), label);
            assert_eq!(row.actions, actions);
        }
    }

    #[tokio::test]
    async fn test_refresh_stops_when_not_connected() {
        let backend = MockBackend::new();
        backend.respond(Method::Get, "/sources", Err(crate::tests::not_connected()));
        let api = ApiClient::new(backend);
        let mut view = SourcesView::default();

        assert_eq!(view.refresh(&api).await, PollControl::Stop);
        assert!(view.error.as_ref().unwrap().is_not_connected());
        assert!(view.rows(&OwnerFilter::All, false, now()).is_empty());
    }

    #[test]
    fn test_owner_filter_and_remote_rows() {
        let resp: SourcesResponse = serde_json::from_value(listing("IDLE")).unwrap();
        let view = SourcesView { response: Some(resp.clone()), error: None };

        assert_eq!(owners(&resp), vec!["alice@laptop".to_string(), "bob@server".to_string()]);
        assert_eq!(view.rows(&OwnerFilter::All, false, now()).len(), 2);

        let bob = view.rows(&OwnerFilter::Owner("bob@server".into()), false, now());
        assert_eq!(bob.len(), 1);
        assert!(bob[0].actions.is_empty());
        assert_eq!(bob[0].status, StatusDisplay::Plain("Remote".into()));
        assert_eq!(view.local_identity(), ("alice".to_string(), "laptop".to_string()));
    }

    #[test]
    fn test_upload_progress_text() {
        let u = UploadCounters { hashed_bytes: 1024, cached_bytes: 1024, hashed_files: 1, cached_files: 1, ..Default::default() };
        assert_eq!(upload_progress(&u, true), "2 KiB, 2 files");
    }

    #[test]
    fn test_source_parse_uses_local_identity() {
        assert_eq!(
            SourceInfo::parse("/data", "alice", "laptop"),
            Some(SourceInfo::new("alice", "laptop", "/data"))
        );
        assert_eq!(
            SourceInfo::parse("bob@server:/srv", "alice", "laptop"),
            Some(SourceInfo::new("bob", "server", "/srv"))
        );
        assert_eq!(SourceInfo::parse("  ", "alice", "laptop"), None);
    }

    fn history() -> SnapshotsResponse {
        serde_json::from_value(json!({
            "snapshots": [
                { "id": "s1", "rootID": "k1", "startTime": "2024-04-01T00:00:00Z", "summary": { "size": 100, "files": 2, "dirs": 1 }, "retention": ["latest-2"], "pins": [] },
                { "id": "s2", "rootID": "k2", "startTime": "2024-05-01T00:00:00Z", "summary": { "size": 200 }, "retention": ["latest-1", "daily-1"], "pins": ["keep"] }
            ],
            "unfilteredCount": 5,
            "uniqueCount": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_history_rows_newest_first() {
        let rows = history_rows(&history(), false);
        assert_eq!(rows[0].id, "s2");
        assert_eq!(rows[0].retention, "latest-1, daily-1");
        assert_eq!(rows[1].size_text, "100 B");
        assert_eq!(hidden_caption(&history(), false), "Showing 2 unique snapshots out of 5");
        assert_eq!(hidden_caption(&history(), true), "");
    }

    #[tokio::test]
    async fn test_delete_selected_snapshots() {
        let backend = MockBackend::new();
        backend.ok(Method::Post, "/snapshots/delete", json!({}));
        let api = ApiClient::new(backend);
        let source = SourceInfo::new("alice", "laptop", "/home/alice");

        let mut selection = Selection::default();
        selection.toggle("s2");
        selection.toggle("s1");
        selection.toggle("gone");
        selection.retain_existing(&history());
        assert_eq!(selection.len(), 2);
        assert_eq!(delete_confirmation(selection.len(), false), "Do you want to delete the 2 selected snapshots?");

        api.delete_snapshots(&delete_request(&source, &selection, false)).await.unwrap();
        let calls = api.backend().calls_to(Method::Post, "/snapshots/delete");
        let body = calls[0].body.clone().unwrap();
        assert_eq!(body["snapshotManifestIds"], json!(["s1", "s2"]));
        assert_eq!(body["deleteSourceAndPolicy"], false);
        assert_eq!(body["source"]["path"], "/home/alice");
    }

    #[test]
    fn test_pin_and_description_edits() {
        assert_eq!(pin_edit("s1", "keep", "keep"), None);
        let req = pin_edit("s1", "old", "new").unwrap();
        assert_eq!(req.add_pins, vec!["new"]);
        assert_eq!(req.remove_pins, vec!["old"]);

        let body = serde_json::to_value(description_edit("s1", " nightly ")).unwrap();
        assert_eq!(body, json!({ "snapshots": ["s1"], "description": "nightly" }));
    }

    #[tokio::test]
    async fn test_snapshots_query_has_all_flag() {
        let backend = MockBackend::new();
        backend.ok(Method::Get, "/snapshots", serde_json::to_value(history()).unwrap());
        let api = ApiClient::new(backend);

        api.snapshots(&SourceInfo::new("alice", "laptop", "/home"), true).await.unwrap();
        let calls = api.backend().calls();
        assert_eq!(calls[0].path, "/snapshots?userName=alice&host=laptop&path=%2Fhome&all=1");
    }
}
