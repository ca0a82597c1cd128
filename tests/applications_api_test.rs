use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, patch},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use job_tracker_backend::{routes, AppState};

/// Builds the application router against the configured database, or skips
/// the test when no database is reachable.
async fn setup_app() -> Option<(Router, sqlx::PgPool)> {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("API_RPS", "1000");
    let _ = job_tracker_backend::config::init_config();

    let pool = match job_tracker_backend::database::pool::create_pool().await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("skipping: database unavailable: {err}");
            return None;
        }
    };
    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        eprintln!("skipping: migrations failed: {err}");
        return None;
    }

    let state = AppState::new(pool.clone());
    let app = Router::new()
        .route(
            "/api/applications",
            get(routes::application_routes::list_applications)
                .post(routes::application_routes::create_application),
        )
        .route(
            "/api/applications/changes/poll",
            get(routes::application_routes::poll_changes),
        )
        .route(
            "/api/applications/:id",
            get(routes::application_routes::get_application)
                .put(routes::application_routes::update_application)
                .delete(routes::application_routes::delete_application),
        )
        .route(
            "/api/applications/:id/status",
            patch(routes::application_routes::update_application_status),
        )
        .with_state(state);

    Some((app, pool))
}

fn request(method: &str, uri: &str, body: Option<JsonValue>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn create_payload(name: &str, role: &str, email: &str) -> JsonValue {
    json!({
        "candidateName": name,
        "role": role,
        "yearsOfExperience": 3.5,
        "resumeLink": "https://example.com/resume.pdf",
        "email": email,
    })
}

async fn cleanup(pool: &sqlx::PgPool, tag: &str) {
    let _ = sqlx::query(
        "DELETE FROM applications WHERE candidate_name LIKE $1 OR role LIKE $1 OR email LIKE $1",
    )
    .bind(format!("%{tag}%"))
    .execute(pool)
    .await;
}

#[tokio::test]
async fn create_then_fetch_round_trips_submitted_fields() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();
    let name = format!("Roundtrip {tag}");

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(create_payload(&name, "Backend Developer", "roundtrip@example.com")),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["success"], json!(true));
    let id = created["data"]["id"].as_str().expect("id").to_string();
    assert_eq!(created["data"]["status"], json!("Applied"));
    assert_eq!(created["data"]["notes"], json!(""));

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/applications/{id}"), None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["data"]["candidateName"], json!(name));
    assert_eq!(fetched["data"]["role"], json!("Backend Developer"));
    assert_eq!(fetched["data"]["yearsOfExperience"], json!(3.5));
    assert_eq!(fetched["data"]["email"], json!("roundtrip@example.com"));

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn create_requires_all_required_fields_but_accepts_zero_experience() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(json!({ "candidateName": format!("Incomplete {tag}") })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));

    let mut payload = create_payload(
        &format!("Fresher {tag}"),
        "Junior Developer",
        "fresher@example.com",
    );
    payload["yearsOfExperience"] = json!(0);
    let response = app
        .clone()
        .oneshot(request("POST", "/api/applications", Some(payload)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn status_patch_rejects_hired_while_full_update_allows_it() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(create_payload(
                &format!("Pipeline {tag}"),
                "Tech Lead",
                "pipeline@example.com",
            )),
        ))
        .await
        .expect("response");
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().expect("id").to_string();

    // The patch path only accepts the four pipeline statuses.
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/applications/{id}/status"),
            Some(json!({ "status": "Hired" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/applications/{id}/status"),
            Some(json!({ "status": "Interview" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let patched = body_json(response).await;
    assert_eq!(patched["data"]["status"], json!("Interview"));

    // Hired is reachable through the full update.
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/applications/{id}"),
            Some(json!({ "status": "Hired" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["status"], json!("Hired"));

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn deleting_unknown_id_is_not_found_and_leaves_records_alone() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(create_payload(
                &format!("Survivor {tag}"),
                "QA Engineer",
                "survivor@example.com",
            )),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/applications/{}", Uuid::new_v4()),
            None,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/applications?search={tag}"),
            None,
        ))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed["count"], json!(1));

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn role_filter_matches_substring_in_any_case() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    for (name, role) in [
        ("First", format!("Frontend Developer {tag}")),
        ("Second", format!("frontend lead {tag}")),
    ] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/applications",
                Some(create_payload(
                    &format!("{name} {tag}"),
                    &role,
                    "roles@example.com",
                )),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/applications?role={}", tag.to_uppercase()),
            None,
        ))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed["count"], json!(2));

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn search_reaches_email_only_matches() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(create_payload(
                "Plain Name",
                "Plain Role",
                &format!("only.the.email.{tag}@example.com"),
            )),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/applications?search={tag}"),
            None,
        ))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed["count"], json!(1));
    assert!(listed["data"][0]["email"]
        .as_str()
        .expect("email")
        .contains(&tag));

    cleanup(&pool, &tag).await;
}

#[tokio::test]
async fn listing_orders_most_recently_applied_first() {
    let Some((app, pool)) = setup_app().await else {
        return;
    };
    let tag = Uuid::new_v4().simple().to_string();

    for name in ["Earlier", "Later"] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/applications",
                Some(create_payload(
                    &format!("{name} {tag}"),
                    "Data Engineer",
                    "order@example.com",
                )),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/applications?search={tag}"),
            None,
        ))
        .await
        .expect("response");
    let listed = body_json(response).await;
    assert_eq!(listed["count"], json!(2));
    assert_eq!(
        listed["data"][0]["candidateName"],
        json!(format!("Later {tag}"))
    );

    cleanup(&pool, &tag).await;
}
