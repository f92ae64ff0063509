/// Router tests for the VMS API
///
/// Every test drives the full middleware stack (auth, tracing, CORS) over an
/// in-memory store.

mod common;

use axum::http::StatusCode;
use common::{token_for, TestContext, JWT_SECRET};
use serde_json::json;
use vms_shared::auth::jwt::{create_token, Claims, TokenType};

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send_as(None, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_unauthenticated_requests_rejected() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send_as(None, "GET", "/v1/jobs", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = ctx
        .send_as(Some("Bearer not-a-token"), "GET", "/v1/jobs", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = ctx.send_as(Some("Basic abc"), "GET", "/v1/jobs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let refresh = create_token(&Claims::new(ctx.user_id, TokenType::Refresh), JWT_SECRET).unwrap();
    let (status, body) = ctx
        .send_as(Some(&format!("Bearer {}", refresh)), "GET", "/v1/jobs", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token: Expected access token");
}

#[tokio::test]
async fn test_jobs_listed_by_title() {
    let ctx = TestContext::new();
    ctx.seed_shift("Systems Administrator", "2012-10-23", 1).await;
    ctx.seed_shift("Software Developer", "2012-10-23", 1).await;

    let (status, body) = ctx.send("GET", "/v1/jobs", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Software Developer", "Systems Administrator"]);
}

#[tokio::test]
async fn test_job_shifts_ordered_by_date() {
    let ctx = TestContext::new();
    let (job_id, december) = ctx.seed_shift("Usher", "2012-12-09", 1).await;
    let january = ctx.add_shift(job_id, "2012-01-10", 1).await;
    let june = ctx.add_shift(job_id, "2012-06-25", 1).await;

    let (status, body) = ctx
        .send("GET", &format!("/v1/jobs/{}/shifts", job_id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|shift| shift["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![january, june, december]);

    let (status, _) = ctx.send("GET", "/v1/jobs/999/shifts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_lifecycle() {
    let ctx = TestContext::new();
    let (_, shift_id) = ctx.seed_shift("Software Developer", "2012-10-23", 1).await;
    let v1 = ctx.add_volunteer(1, "Yoshi").await;
    let v2 = ctx.add_volunteer(2, "John").await;

    let v1_path = format!("/v1/volunteers/{}/shifts/{}", v1, shift_id);
    let v2_path = format!("/v1/volunteers/{}/shifts/{}", v2, shift_id);

    let (status, record) = ctx.send("POST", &v1_path, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["volunteer_id"], v1);
    assert_eq!(record["shift_id"], shift_id);

    // Repeat sign-up reports the same record
    let (status, again) = ctx.send("POST", &v1_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], record["id"]);

    let (status, body) = ctx.send("POST", &v2_path, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "capacity_exceeded");

    let (status, shift) = ctx.send("GET", &format!("/v1/shifts/{}", shift_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shift["max_volunteers"], 1);
    assert_eq!(shift["availability"]["registered"], 1);
    assert_eq!(shift["availability"]["remaining"], 0);

    let (status, _) = ctx.send("DELETE", &v1_path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = ctx.send("DELETE", &v1_path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = ctx.send("POST", &v2_path, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, record) = ctx.send("GET", &v2_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["volunteer_id"], v2);
    let (status, _) = ctx.send("GET", &v1_path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_unknown_shift() {
    let ctx = TestContext::new();
    let volunteer = ctx.add_volunteer(1, "Yoshi").await;

    let (status, body) = ctx
        .send("POST", &format!("/v1/volunteers/{}/shifts/404", volunteer), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "shift 404 not found");
}

#[tokio::test]
async fn test_signed_up_shifts() {
    let ctx = TestContext::new();
    let (job_id, first) = ctx.seed_shift("Usher", "2012-10-22", 3).await;
    let second = ctx.add_shift(job_id, "2012-10-23", 3).await;
    let volunteer = ctx.add_volunteer(1, "Yoshi").await;

    for shift_id in [second, first] {
        let (status, _) = ctx
            .send(
                "POST",
                &format!("/v1/volunteers/{}/shifts/{}", volunteer, shift_id),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = ctx
        .send("GET", &format!("/v1/volunteers/{}/shifts", volunteer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|shift| shift["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);

    let (status, _) = ctx.send("GET", "/v1/volunteers/999/shifts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_job_cascades_to_registrations() {
    let ctx = TestContext::new();
    let (job_id, shift_id) = ctx.seed_shift("Usher", "2012-10-22", 2).await;
    let volunteer = ctx.add_volunteer(1, "Yoshi").await;
    ctx.send(
        "POST",
        &format!("/v1/volunteers/{}/shifts/{}", volunteer, shift_id),
        None,
    )
    .await;

    let (status, _) = ctx.send("DELETE", &format!("/v1/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.send("GET", &format!("/v1/shifts/{}", shift_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = ctx
        .send("GET", &format!("/v1/volunteers/{}/shifts", volunteer), None)
        .await;
    assert_eq!(body, json!([]));

    let (status, _) = ctx.send("DELETE", &format!("/v1/jobs/{}", job_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_volunteer_linked_to_caller() {
    let ctx = TestContext::new();
    let volunteer = ctx.add_volunteer(ctx.user_id, "Yoshi").await;

    let (status, body) = ctx
        .send("GET", &format!("/v1/volunteers/{}", volunteer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], ctx.user_id);

    // One profile per user
    let (status, body) = ctx
        .send_as(
            Some(&format!("Bearer {}", token_for(ctx.user_id))),
            "POST",
            "/v1/volunteers",
            Some(json!({
                "first_name": "Second",
                "last_name": "Profile",
                "email": "second@example.com"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/volunteers",
            Some(json!({
                "first_name": "",
                "last_name": "Turtle",
                "email": "not-an-email"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "first_name"]);

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/events",
            Some(json!({
                "name": "Backwards",
                "start_date": "2012-10-23",
                "end_date": "2012-10-22"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/shifts",
            Some(json!({
                "date": "2012-10-22",
                "start_time": "09:00:00",
                "end_time": "15:00:00",
                "max_volunteers": 1,
                "job_id": 999
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "job_id");
}

#[tokio::test]
async fn test_organization_cascade() {
    let ctx = TestContext::new();

    let (status, organization) = ctx
        .send(
            "POST",
            "/v1/organizations",
            Some(json!({ "name": "Nintendo", "address": "Kyoto" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let organization_id = organization["id"].as_i64().unwrap();

    let (status, event) = ctx
        .send(
            "POST",
            "/v1/events",
            Some(json!({
                "name": "Game Jam",
                "start_date": "2012-10-22",
                "end_date": "2012-10-22",
                "organization_id": organization_id
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = ctx.send("GET", "/v1/organizations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .send("DELETE", &format!("/v1/organizations/{}", organization_id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx
        .send("GET", &format!("/v1/events/{}", event["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_event_and_job() {
    let ctx = TestContext::new();
    let (job_id, shift_id) = ctx.seed_shift("Usher", "2012-10-22", 2).await;
    let volunteer = ctx.add_volunteer(1, "Yoshi").await;
    let registration = format!("/v1/volunteers/{}/shifts/{}", volunteer, shift_id);
    ctx.send("POST", &registration, None).await;

    let (_, job) = ctx.send("GET", &format!("/v1/jobs/{}", job_id), None).await;
    let event_path = format!("/v1/events/{}", job["event_id"]);

    let (status, event) = ctx
        .send(
            "PUT",
            &event_path,
            Some(json!({
                "name": "Open Source Summit",
                "start_date": "2012-10-21",
                "end_date": "2012-10-24"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["name"], "Open Source Summit");
    assert_eq!(event["id"], job["event_id"]);

    let (status, job) = ctx
        .send(
            "PUT",
            &format!("/v1/jobs/{}", job_id),
            Some(json!({
                "name": "Head Usher",
                "start_date": "2012-10-22",
                "end_date": "2012-10-23",
                "event_id": job["event_id"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["name"], "Head Usher");

    // Edits leave shifts and registrations alone
    let (status, record) = ctx.send("GET", &registration, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["shift_id"], shift_id);

    let (status, _) = ctx
        .send(
            "PUT",
            &event_path,
            Some(json!({
                "name": "Backwards",
                "start_date": "2012-10-24",
                "end_date": "2012-10-21"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = ctx
        .send(
            "PUT",
            "/v1/events/999",
            Some(json!({
                "name": "Nowhere",
                "start_date": "2012-10-21",
                "end_date": "2012-10-24"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "event 999 not found");
}

#[tokio::test]
async fn test_delete_shift() {
    let ctx = TestContext::new();
    let (job_id, shift_id) = ctx.seed_shift("Usher", "2012-10-22", 2).await;
    let volunteer = ctx.add_volunteer(1, "Yoshi").await;
    ctx.send(
        "POST",
        &format!("/v1/volunteers/{}/shifts/{}", volunteer, shift_id),
        None,
    )
    .await;

    let path = format!("/v1/shifts/{}", shift_id);
    let (status, _) = ctx.send("DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, shifts) = ctx
        .send("GET", &format!("/v1/jobs/{}/shifts", job_id), None)
        .await;
    assert_eq!(shifts, json!([]));
    let (_, signed_up) = ctx
        .send("GET", &format!("/v1/volunteers/{}/shifts", volunteer), None)
        .await;
    assert_eq!(signed_up, json!([]));

    let (status, _) = ctx.send("DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
