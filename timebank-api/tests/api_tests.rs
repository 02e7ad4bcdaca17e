/// Integration tests for the timebank API
///
/// These tests drive the full router against a real database and verify the
/// lifecycle rules end to end:
/// - Hour bag capacity invariant on update
/// - Hour bag delete guarded by dependent activities
/// - Hour bag creation defaults (zero consumption, active status)
/// - User email uniqueness and password hashing at rest
/// - Existence-guarded read/update/delete across entities
/// - User → company → project aggregation
///
/// They require a running PostgreSQL database (DATABASE_URL) and share one
/// schema, so run them serially:
///
/// ```bash
/// cargo test -p timebank-api -- --ignored --test-threads=1
/// ```

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use timebank_shared::models::{hour_bag::HourBag, user::User};

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_hour_bag_update_rejected_below_consumed_hours() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();
    let user = common::seed_user(&ctx, "owner@example.com", role_id)
        .await
        .unwrap();
    let company = common::seed_company(&ctx, "Acme", user.id).await.unwrap();
    let bag = common::seed_hour_bag(&ctx, company.id, 10).await.unwrap();
    common::set_consumed_hours(&ctx, bag.id, 8).await.unwrap();

    // Shrinking below consumption is rejected
    let (status, body) = ctx
        .request(
            "PUT",
            "/v1/hour-bags",
            Some(json!({
                "id": bag.id,
                "hours": 5,
                "hour_cost": "25.00",
                "registration_date": "2024-09-07T10:00:00Z"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "capacity_violation");
    assert_eq!(
        body["details"][0],
        "consumed hours exceed requested capacity"
    );

    // Stored record is unchanged
    let stored = HourBag::find_by_id(&ctx.db, bag.id).await.unwrap().unwrap();
    assert_eq!(stored.hours, 10);
    assert_eq!(stored.consumed_hours, 8);

    // Shrinking down to consumption is admissible
    let (status, body) = ctx
        .request(
            "PUT",
            "/v1/hour-bags",
            Some(json!({
                "id": bag.id,
                "hours": 9,
                "hour_cost": "25.00",
                "registration_date": "2024-09-07T10:00:00Z"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hours"], 9);
    assert_eq!(body["consumed_hours"], 8);

    let stored = HourBag::find_by_id(&ctx.db, bag.id).await.unwrap().unwrap();
    assert_eq!(stored.hours, 9);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_hour_bag_delete_guarded_by_dependent_activity() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();
    let user = common::seed_user(&ctx, "owner@example.com", role_id)
        .await
        .unwrap();
    let company = common::seed_company(&ctx, "Acme", user.id).await.unwrap();
    let project = common::seed_project(&ctx, "Website", company.id)
        .await
        .unwrap();
    let bag = common::seed_hour_bag(&ctx, company.id, 40).await.unwrap();
    let tag_id = common::seed_user_activity(&ctx, user.id, "Development")
        .await
        .unwrap();
    let activity = common::seed_activity(&ctx, project.id, bag.id, tag_id)
        .await
        .unwrap();

    // Blocked while the activity draws from the bag
    let (status, body) = ctx
        .request("DELETE", &format!("/v1/hour-bags/{}", bag.id), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "referential_conflict");
    assert_eq!(body["details"][0], "hour bag has dependent activities");
    assert!(HourBag::find_by_id(&ctx.db, bag.id)
        .await
        .unwrap()
        .is_some());

    // After the activity is removed the delete goes through
    let (status, _) = ctx
        .request("DELETE", &format!("/v1/activities/{}", activity.id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx
        .request("DELETE", &format!("/v1/hour-bags/{}", bag.id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(HourBag::find_by_id(&ctx.db, bag.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_hour_bag_create_assigns_consumption_and_status() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();
    let user = common::seed_user(&ctx, "owner@example.com", role_id)
        .await
        .unwrap();
    let company = common::seed_company(&ctx, "Acme", user.id).await.unwrap();

    // Client attempts to set consumed_hours and status; both are ignored
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/hour-bags",
            Some(json!({
                "company_id": company.id,
                "hours": 40,
                "hour_cost": "19.90",
                "registration_date": "2024-09-07T10:00:00Z",
                "consumed_hours": 39,
                "status": false
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["consumed_hours"], 0);
    assert_eq!(body["status"], true);

    let (_, active) = ctx.request("GET", "/v1/hour-bags/active", None).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_user_create_rejects_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();

    let payload = json!({
        "name": "Jane",
        "email": "jane@example.com",
        "password": "hunter2hunter2",
        "role_id": role_id
    });

    let (status, _) = ctx.request("POST", "/v1/users", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let count_before = User::count(&ctx.db).await.unwrap();

    let (status, body) = ctx.request("POST", "/v1/users", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_key");
    assert_eq!(
        body["details"][0],
        "user with email jane@example.com already exists"
    );

    // No record was added
    assert_eq!(User::count(&ctx.db).await.unwrap(), count_before);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_user_password_stored_hashed_and_never_returned() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/users",
            Some(json!({
                "name": "Jane",
                "email": "jane@example.com",
                "password": "hunter2hunter2",
                "role_id": role_id
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let stored = User::find_by_email(&ctx.db, "jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert_ne!(stored.password_hash, "hunter2hunter2");
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_missing_ids_yield_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let cases = vec![
        ("GET", "/v1/users/9999".to_string(), None),
        ("DELETE", "/v1/users/9999".to_string(), None),
        (
            "PUT",
            "/v1/users".to_string(),
            Some(json!({"id": 9999, "name": "x", "role_id": 1})),
        ),
        ("GET", "/v1/roles/9999".to_string(), None),
        ("GET", "/v1/companies/9999".to_string(), None),
        ("DELETE", "/v1/companies/9999".to_string(), None),
        ("GET", "/v1/projects/9999".to_string(), None),
        ("DELETE", "/v1/projects/9999".to_string(), None),
        ("GET", "/v1/activities/9999".to_string(), None),
        ("DELETE", "/v1/activities/9999".to_string(), None),
        ("GET", "/v1/user-activities/9999".to_string(), None),
        ("DELETE", "/v1/user-activities/9999".to_string(), None),
        ("GET", "/v1/hour-bags/9999".to_string(), None),
        ("DELETE", "/v1/hour-bags/9999".to_string(), None),
        (
            "PUT",
            "/v1/hour-bags".to_string(),
            Some(json!({
                "id": 9999,
                "hours": 10,
                "hour_cost": "25.00",
                "registration_date": "2024-09-07T10:00:00Z"
            })),
        ),
    ];

    for (method, uri, body) in cases {
        let (status, response) = ctx.request(method, &uri, body).await;
        assert_eq!(
            status,
            StatusCode::NOT_FOUND,
            "{} {} should be 404, got {}: {}",
            method,
            uri,
            status,
            response
        );
        assert_eq!(response["error"], "not_found");
    }
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_project_aggregation_by_user() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();
    let user = common::seed_user(&ctx, "owner@example.com", role_id)
        .await
        .unwrap();
    let other = common::seed_user(&ctx, "other@example.com", role_id)
        .await
        .unwrap();

    // Company A has two projects, company B none; another user's company is
    // invisible to the aggregation.
    let company_a = common::seed_company(&ctx, "A", user.id).await.unwrap();
    common::seed_company(&ctx, "B", user.id).await.unwrap();
    let foreign = common::seed_company(&ctx, "C", other.id).await.unwrap();

    common::seed_project(&ctx, "Website", company_a.id)
        .await
        .unwrap();
    common::seed_project(&ctx, "Mobile App", company_a.id)
        .await
        .unwrap();
    common::seed_project(&ctx, "Invisible", foreign.id)
        .await
        .unwrap();

    let (status, body) = ctx
        .request("GET", &format!("/v1/projects/user/{}", user.id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for record in records {
        assert_eq!(record["company_id"], company_a.id);
        assert_eq!(record["company_name"], "A");
        assert!(record["project_id"].is_i64());
        assert!(record["project_name"].is_string());
    }

    // A user with no companies aggregates to an empty list
    let (status, body) = ctx
        .request("GET", &format!("/v1/projects/user/{}", other.id + 100), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_company_crud_roundtrip() {
    let ctx = TestContext::new().await.unwrap();

    let role_id = common::seed_role(&ctx, "admin").await.unwrap();
    let user = common::seed_user(&ctx, "owner@example.com", role_id)
        .await
        .unwrap();

    let (status, created) = ctx
        .request(
            "POST",
            "/v1/companies",
            Some(json!({"name": "Acme", "user_id": user.id})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let company_id = created["id"].as_i64().unwrap();

    let (status, updated) = ctx
        .request(
            "PUT",
            "/v1/companies",
            Some(json!({"id": company_id, "name": "Acme Corp", "user_id": user.id})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme Corp");

    let (status, by_user) = ctx
        .request("GET", &format!("/v1/companies/user/{}", user.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_user.as_array().unwrap().len(), 1);

    let (status, _) = ctx
        .request("DELETE", &format!("/v1/companies/{}", company_id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx
        .request("GET", &format!("/v1/companies/{}", company_id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // Requires running PostgreSQL instance
async fn test_request_validation_reports_field_details() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/users",
            Some(json!({
                "name": "",
                "email": "not-an-email",
                "password": "",
                "role_id": 0
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_array().unwrap().len() >= 3);
}
