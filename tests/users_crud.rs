mod common;

use actix_web::{test, App};
use common::{bearer_for, seed_user, test_env};
use serde_json::json;
use taskboard::{routes, AuthGuard};

macro_rules! build_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthGuard)
                .app_data($env.data.clone())
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_then_fetch_user() {
    let env = test_env();
    seed_user(&env.store, "admin@example.com", "qwerty");
    let app = build_app!(env);
    let auth = ("Authorization", bearer_for(&env, "admin@example.com"));

    let create = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(auth.clone())
        .set_json(json!({
            "email": "ada@b.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "password": "s3cret"
        }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status().as_u16(), 201);

    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["email"], "ada@b.com");
    assert_eq!(created["firstName"], "Ada");
    // Neither the password nor its hash may appear on the wire.
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_i64().unwrap();
    let fetch = test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, fetch).await;
    assert_eq!(resp.status().as_u16(), 200);
    let fetched: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"].as_i64(), Some(id));
}

#[actix_web::test]
async fn list_reports_total_count() {
    let env = test_env();
    seed_user(&env.store, "admin@example.com", "qwerty");
    seed_user(&env.store, "a@b.com", "correctpw");
    let app = build_app!(env);

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", bearer_for(&env, "admin@example.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("X-Total-Count").unwrap().to_str().unwrap(),
        "2"
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn fetching_a_missing_user_is_404() {
    let env = test_env();
    seed_user(&env.store, "admin@example.com", "qwerty");
    let app = build_app!(env);

    let req = test::TestRequest::get()
        .uri("/api/users/12345")
        .insert_header(("Authorization", bearer_for(&env, "admin@example.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let env = test_env();
    seed_user(&env.store, "admin@example.com", "qwerty");
    let app = build_app!(env);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("Authorization", bearer_for(&env, "admin@example.com")))
        .set_json(json!({"email": "admin@example.com", "password": "abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);
}

#[actix_web::test]
async fn invalid_payloads_are_rejected() {
    let env = test_env();
    seed_user(&env.store, "admin@example.com", "qwerty");
    let app = build_app!(env);
    let auth = ("Authorization", bearer_for(&env, "admin@example.com"));

    let bad_email = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(auth.clone())
        .set_json(json!({"email": "not-an-email", "password": "abc"}))
        .to_request();
    let resp = test::call_service(&app, bad_email).await;
    assert_eq!(resp.status().as_u16(), 400);

    let short_password = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(auth)
        .set_json(json!({"email": "ok@b.com", "password": "ab"}))
        .to_request();
    let resp = test::call_service(&app, short_password).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn update_changes_only_supplied_fields() {
    let env = test_env();
    let user = seed_user(&env.store, "a@b.com", "correctpw");
    let app = build_app!(env);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user.id))
        .insert_header(("Authorization", bearer_for(&env, "a@b.com")))
        .set_json(json!({"firstName": "Ada"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["email"], "a@b.com");
}

#[actix_web::test]
async fn password_change_takes_effect_at_next_login() {
    let env = test_env();
    let user = seed_user(&env.store, "a@b.com", "correctpw");
    let app = build_app!(env);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user.id))
        .insert_header(("Authorization", bearer_for(&env, "a@b.com")))
        .set_json(json!({"password": "freshpw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let old_pw = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": "a@b.com", "password": "correctpw"}))
        .to_request();
    assert_eq!(test::call_service(&app, old_pw).await.status().as_u16(), 401);

    let new_pw = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"username": "a@b.com", "password": "freshpw"}))
        .to_request();
    assert_eq!(test::call_service(&app, new_pw).await.status().as_u16(), 200);
}
