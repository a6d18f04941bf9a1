use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use rust_bulletin::models::teachers::requests::CreateTeacherRequest;
use rust_bulletin::routes;
use rust_bulletin::storage::{Storage, memory_storage::MemoryStorage};
use rust_bulletin::utils::{format_iso8601, json_error_handler, query_error_handler};

const TEACHER: &str = "mrodriguez";

async fn storage() -> Arc<dyn Storage> {
    let storage = MemoryStorage::new();
    storage
        .create_teacher(CreateTeacherRequest {
            username: TEACHER.into(),
            display_name: Some("Ms. Rodriguez".into()),
        })
        .await
        .unwrap();
    Arc::new(storage)
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .configure(routes::configure_announcements_routes),
        )
        .await
    };
}

fn in_hours(hours: i64) -> String {
    format_iso8601(Utc::now() + Duration::hours(hours))
}

fn as_teacher(path: &str) -> String {
    format!("{path}?teacher_username={TEACHER}")
}

#[actix_web::test]
async fn test_created_announcement_is_listed_everywhere() {
    let storage = storage().await;
    let app = app!(storage);

    let expiration = in_hours(1);
    let req = test::TestRequest::post()
        .uri(&as_teacher("/announcements"))
        .set_json(json!({ "message": "Picture day is Friday", "expiration_date": expiration }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Picture day is Friday");
    assert_eq!(created["expiration_date"], expiration.as_str());
    assert_eq!(created["created_by"], TEACHER);
    assert!(created["id"].is_string());
    assert!(created["created_at"].is_string());

    let req = test::TestRequest::get().uri("/announcements/active").to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    assert_eq!(active[0]["id"], created["id"]);

    let req = test::TestRequest::get()
        .uri(&as_teacher("/announcements/"))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0], created);
}

#[actix_web::test]
async fn test_teacher_credentials_are_required() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::get().uri("/announcements").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Authentication required for this action");

    let req = test::TestRequest::get()
        .uri("/announcements?teacher_username=")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Authentication required for this action");

    let req = test::TestRequest::post()
        .uri("/announcements?teacher_username=ghost")
        .set_json(json!({ "message": "hi", "expiration_date": in_hours(1) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid teacher credentials");

    let req = test::TestRequest::delete()
        .uri("/announcements/00000000000000000000000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 认证失败时不会写入任何数据
    let req = test::TestRequest::get().uri("/announcements/active").to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active, json!([]));
}

#[actix_web::test]
async fn test_unrouted_method_is_rejected_before_authentication() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/announcements")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_empty_start_date_is_treated_as_absent() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&as_teacher("/announcements"))
        .set_json(json!({ "message": "Early dismissal", "start_date": "", "expiration_date": in_hours(1) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert!(created["start_date"].is_null());

    let req = test::TestRequest::get().uri("/announcements/active").to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active[0]["id"], created["id"]);
}

#[actix_web::test]
async fn test_create_validation() {
    let storage = storage().await;
    let app = app!(storage);

    let cases = [
        (
            json!({ "message": "x", "start_date": in_hours(2), "expiration_date": in_hours(1) }),
            "Start date must be before expiration date",
        ),
        (
            json!({ "message": "x", "expiration_date": in_hours(-1) }),
            "Expiration date must be in the future",
        ),
        (
            json!({ "message": "x", "expiration_date": "next week" }),
            "Invalid date format. Use ISO format (YYYY-MM-DDTHH:MM:SS)",
        ),
    ];

    for (body, message) in cases {
        let req = test::TestRequest::post()
            .uri(&as_teacher("/announcements"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], message);
    }

    let req = test::TestRequest::post()
        .uri(&as_teacher("/announcements"))
        .set_json(json!({ "expiration_date": in_hours(1) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&as_teacher("/announcements"))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, json!([]));
}

#[actix_web::test]
async fn test_active_list_excludes_pending_and_expired() {
    let storage = storage().await;
    let app = app!(storage);

    for body in [
        json!({ "message": "first", "expiration_date": in_hours(5) }),
        json!({ "message": "pending", "start_date": in_hours(2), "expiration_date": in_hours(5) }),
        json!({ "message": "started", "start_date": in_hours(-2), "expiration_date": in_hours(5) }),
    ] {
        let req = test::TestRequest::post()
            .uri(&as_teacher("/announcements"))
            .set_json(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/announcements/active").to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    let messages: Vec<_> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["started", "first"]);

    // 全部列表按创建时间倒序
    let req = test::TestRequest::get()
        .uri(&as_teacher("/announcements"))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    let messages: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["started", "pending", "first"]);
}

#[actix_web::test]
async fn test_update_flow() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&as_teacher("/announcements"))
        .set_json(json!({
            "message": "Bus 12 is delayed",
            "start_date": in_hours(-1),
            "expiration_date": in_hours(3),
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .set_json(json!({ "message": "Bus 12 is on time" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["message"], "Bus 12 is on time");
    assert_eq!(updated["start_date"], created["start_date"]);
    assert_eq!(updated["expiration_date"], created["expiration_date"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    let req = test::TestRequest::put()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No fields to update");

    let req = test::TestRequest::put()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .set_json(json!({ "expiration_date": in_hours(-1) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Expiration date must be in the future");

    // 更新时不检查开始与过期时间的先后
    let req = test::TestRequest::put()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .set_json(json!({ "start_date": in_hours(10) }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&as_teacher("/announcements/not-an-id"))
        .set_json(json!({ "message": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid announcement ID");

    let req = test::TestRequest::put()
        .uri(&as_teacher("/announcements/00000000000000000000000000000000"))
        .set_json(json!({ "message": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Announcement not found");
}

#[actix_web::test]
async fn test_delete_flow() {
    let storage = storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri(&as_teacher("/announcements"))
        .set_json(json!({ "message": "Fire drill at 10am", "expiration_date": in_hours(1) }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&as_teacher("/announcements/not-an-id"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid announcement ID");

    let req = test::TestRequest::delete()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Announcement deleted successfully");

    let req = test::TestRequest::delete()
        .uri(&as_teacher(&format!("/announcements/{id}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Announcement not found");

    let req = test::TestRequest::get().uri("/announcements/active").to_request();
    let active: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active, json!([]));
}
