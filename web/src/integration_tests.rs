//! Router-level tests for the Launchpad web service
//!
//! The full router runs against the in-memory store (or a mockall store for
//! failure paths) through axum-test:
//! 1. Open the form
//! 2. Submit it (invalid, failing store, valid)
//! 3. Follow the redirect to the pitch page
//! 4. Watch the view counter move after each response
//! 5. Hit the submission rate limit

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::ConnectInfo;
    use axum::http::StatusCode;
    use axum::Extension;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::adapters::InMemoryPitchRepository;
    use crate::config::RateLimit;
    use crate::domain::entities::PitchId;
    use crate::domain::ports::repositories::MockPitchRepository;
    use crate::domain::ports::PitchRepository;
    use crate::error::DomainError;
    use crate::test_utils::{test_pitch, test_pitch_with_views};
    use crate::{build_router, AppState};

    fn server_with(repo: Arc<dyn PitchRepository>) -> TestServer {
        let app = build_router(AppState::new(repo), None).unwrap();
        TestServer::new(app).unwrap()
    }

    fn valid_form() -> Vec<(&'static str, &'static str)> {
        vec![
            ("title", "Solar Kites"),
            ("description", "Kites that charge your phone while you fly them"),
            ("category", "Energy"),
            ("link", "https://example.com/kite.png"),
            ("pitch", "## Problem\n\nPhones die at the beach."),
        ]
    }

    /// Poll until the stored counter reaches `expected`
    async fn wait_for_views(repo: &InMemoryPitchRepository, id: &PitchId, expected: i64) {
        for _ in 0..100 {
            if repo.find_views(id).await.unwrap() == Some(expected) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "views stayed at {:?} (expected {})",
            repo.find_views(id).await.unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = server_with(Arc::new(InMemoryPitchRepository::new()));

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn form_page_renders_empty_form() {
        let server = server_with(Arc::new(InMemoryPitchRepository::new()));

        let response = server.get("/startup/create").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Submit your pitch"));
        assert!(!html.contains("startup-form_error"));
    }

    #[tokio::test]
    async fn empty_submission_shows_field_errors_and_toast() {
        let repo = Arc::new(InMemoryPitchRepository::new());
        let server = server_with(repo.clone());

        let response = server
            .post("/startup/create")
            .form(&[("title", ""), ("description", "  "), ("category", "")])
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let html = response.text();
        assert!(html.contains("Title is required"));
        assert!(html.contains("Description is required"));
        assert!(html.contains("Category is required"));
        assert!(html.contains("Link is required"));
        assert!(html.contains("Pitch is required"));
        assert!(html.contains("please check your inputs and try again"));
        assert!(html.contains("toast_destructive"));

        let stored = repo
            .list(&crate::domain::entities::PitchQuery::new(None, None))
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn invalid_submission_keeps_entered_values() {
        let server = server_with(Arc::new(InMemoryPitchRepository::new()));
        let mut form = valid_form();
        form[3] = ("link", "not a url");

        let response = server.post("/startup/create").form(&form).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let html = response.text();
        assert!(html.contains("Link must be a valid URL"));
        assert!(html.contains("value=\"Solar Kites\""));
        assert!(html.contains("value=\"not a url\""));
    }

    #[tokio::test]
    async fn store_failure_shows_generic_error() {
        let mut repo = MockPitchRepository::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::Store("connection refused".to_string())));
        let server = server_with(Arc::new(repo));

        let response = server.post("/startup/create").form(&valid_form()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let html = response.text();
        assert!(html.contains("an unexpected error has occurred"));
        assert!(!html.contains("connection refused"));
    }

    #[tokio::test]
    async fn successful_submission_redirects_to_pitch_page() {
        let repo = Arc::new(InMemoryPitchRepository::new());
        let server = server_with(repo.clone());

        let response = server.post("/startup/create").form(&valid_form()).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        let location = location.to_str().unwrap().to_string();
        assert!(location.starts_with("/startup/"));
        assert!(location.ends_with("?created=1"));

        let page = server.get(&location).await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains("Solar Kites"));
        assert!(html.contains("Your startup pitch has been created successfully"));
        assert!(html.contains("<h2>Problem</h2>"));
        assert!(html.contains("Views: 0"));
    }

    #[tokio::test]
    async fn pitch_page_shows_count_then_increments() {
        let pitch = test_pitch_with_views(4);
        let repo = Arc::new(InMemoryPitchRepository::new().with_pitch(pitch.clone()));
        let server = server_with(repo.clone());

        let first = server.get("/startup/pitch-1").await;
        first.assert_status_ok();
        assert!(first.text().contains("Views: 4"));
        assert!(!first.text().contains("created successfully"));
        wait_for_views(&repo, &pitch.id, 5).await;

        let second = server.get("/startup/pitch-1").await;
        assert!(second.text().contains("Views: 5"));
        wait_for_views(&repo, &pitch.id, 6).await;
    }

    #[tokio::test]
    async fn unknown_or_malformed_pitch_is_not_found() {
        let server = server_with(Arc::new(InMemoryPitchRepository::new()));

        let missing = server.get("/startup/does-not-exist").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert!(missing.text().contains("Startup not found"));

        let malformed = server.get("/startup/bad%20id").await;
        malformed.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn failed_increment_does_not_break_the_page() {
        let pitch = test_pitch();
        let mut repo = MockPitchRepository::new();
        let found = pitch.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_find_views().returning(|_| Ok(Some(9)));
        repo.expect_increment_views()
            .returning(|_| Err(DomainError::Store("write token missing".to_string())));
        let server = server_with(Arc::new(repo));

        let response = server.get("/startup/pitch-1").await;

        response.assert_status_ok();
        assert!(response.text().contains("Views: 9"));
    }

    #[tokio::test]
    async fn home_lists_and_searches() {
        let now = chrono::Utc::now();
        let repo = InMemoryPitchRepository::new()
            .with_pitch(crate::test_utils::test_pitch_created_at("a", "Energy", now))
            .with_pitch(crate::test_utils::test_pitch_created_at("b", "Health", now));
        let server = server_with(Arc::new(repo));

        let all = server.get("/").await;
        all.assert_status_ok();
        assert!(all.text().contains("href=\"/startup/a\""));
        assert!(all.text().contains("href=\"/startup/b\""));

        let search = server.get("/").add_query_param("query", "health").await;
        let html = search.text();
        assert!(!html.contains("href=\"/startup/a\""));
        assert!(html.contains("href=\"/startup/b\""));
    }

    #[tokio::test]
    async fn api_submission_returns_action_state() {
        let server = server_with(Arc::new(InMemoryPitchRepository::new()));

        let created = server
            .post("/api/pitches")
            .json(&json!({
                "title": "Solar Kites",
                "description": "Kites that charge phones",
                "category": "Energy",
                "link": "https://example.com/kite.png",
                "pitch": "Fly and charge"
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let state: Value = created.json();
        assert_eq!(state["status"], "SUCCESS");
        let id = state["_id"].as_str().unwrap().to_string();

        let fetched = server.get(&format!("/api/pitches/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["slug"], "solar-kites");

        let invalid = server
            .post("/api/pitches")
            .json(&json!({ "title": "Only a title" }))
            .await;
        invalid.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let state: Value = invalid.json();
        assert_eq!(state["status"], "ERROR");
        assert_eq!(state["error"], "validation failed");
        assert_eq!(state["fieldErrors"]["pitch"][0], "Pitch is required");
        assert!(state["fieldErrors"].get("title").is_none());
    }

    #[tokio::test]
    async fn api_store_failure_is_unexpected_error() {
        let mut repo = MockPitchRepository::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::Store("timeout".to_string())));
        let server = server_with(Arc::new(repo));

        let response = server
            .post("/api/pitches")
            .json(&json!({
                "title": "Solar Kites",
                "description": "Kites that charge phones",
                "category": "Energy",
                "link": "https://example.com/kite.png",
                "pitch": "Fly and charge"
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let state: Value = response.json();
        assert_eq!(state["status"], "ERROR");
        assert_eq!(state["error"], "an unexpected error has occurred");
    }

    #[tokio::test]
    async fn api_views_counts_visit_after_response() {
        let pitch = test_pitch_with_views(10);
        let repo = Arc::new(InMemoryPitchRepository::new().with_pitch(pitch.clone()));
        let server = server_with(repo.clone());

        let response = server.get("/api/pitches/pitch-1/views").await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "id": "pitch-1", "views": 10 })
        );
        wait_for_views(&repo, &pitch.id, 11).await;

        let missing = server.get("/api/pitches/nope/views").await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_list_and_preview() {
        let repo = InMemoryPitchRepository::new().with_pitch(test_pitch());
        let server = server_with(Arc::new(repo));

        let list = server.get("/api/pitches").add_query_param("limit", 5).await;
        list.assert_status_ok();
        let pitches: Value = list.json();
        assert_eq!(pitches.as_array().unwrap().len(), 1);
        assert_eq!(pitches[0]["_id"], "pitch-1");

        let preview = server
            .post("/api/pitches/preview")
            .text("# Hello <b>there</b>")
            .await;
        preview.assert_status_ok();
        let html = preview.json::<Value>()["html"].as_str().unwrap().to_string();
        assert!(html.contains("<h1>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[tokio::test]
    async fn store_failure_on_pages_renders_html_error() {
        let mut repo = MockPitchRepository::new();
        repo.expect_list()
            .returning(|_| Err(DomainError::Store("timeout".to_string())));
        repo.expect_find_by_id()
            .returning(|_| Err(DomainError::Store("timeout".to_string())));
        let server = server_with(Arc::new(repo));

        for path in ["/", "/startup/pitch-1"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            let html = response.text();
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains("an unexpected error has occurred"));
            assert!(!html.contains("timeout"));
        }
    }

    #[tokio::test]
    async fn draft_ids_are_not_served() {
        let mut repo = MockPitchRepository::new();
        repo.expect_find_by_id().never();
        let server = server_with(Arc::new(repo));

        let response = server.get("/startup/drafts.pitch-1").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submissions_are_rate_limited_per_peer() {
        let limit = RateLimit {
            per_second: 60,
            burst: 1,
        };
        let peer: SocketAddr = ([203, 0, 113, 7], 40000).into();
        let app = build_router(
            AppState::new(Arc::new(InMemoryPitchRepository::new())),
            Some(limit),
        )
        .unwrap()
        .layer(Extension(ConnectInfo(peer)));
        let server = TestServer::new(app).unwrap();

        let first = server.post("/startup/create").form(&valid_form()).await;
        first.assert_status(StatusCode::SEE_OTHER);

        let second = server.post("/startup/create").form(&valid_form()).await;
        second.assert_status(StatusCode::TOO_MANY_REQUESTS);

        // Reads and the form page are not limited
        for _ in 0..3 {
            server.get("/").await.assert_status_ok();
            server.get("/startup/create").await.assert_status_ok();
        }
    }
}
