mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::TestContext;
use rust_school_next::models::admins::AdminRole;

#[actix_web::test]
async fn test_create_login_and_me() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/createAdmin")
        .set_json(json!({
            "Username": "registrar",
            "Email": "registrar@school.test",
            "Password": "long-enough",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 用户名或邮箱都可以登录
    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "Username": "registrar@school.test", "Password": "long-enough" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert!(body["data"]["expires_in"].as_i64().unwrap() > 0);
    assert!(body["data"]["admin"].get("PasswordHash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/admin/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["Username"], "registrar");
}

#[actix_web::test]
async fn test_bad_credentials_and_missing_token() {
    let ctx = TestContext::new().await;
    ctx.seed_admin("principal", "secret-pass", AdminRole::Admin)
        .await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "Username": "principal", "Password": "wrong-pass" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get().uri("/api/admin/me").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/admin/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_short_password_and_duplicates_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/createAdmin")
        .set_json(json!({ "Username": "bursar", "Email": "bursar@school.test", "Password": "short" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let payload = json!({
        "Username": "bursar",
        "Email": "bursar@school.test",
        "Password": "long-enough",
    });
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/admin/createAdmin")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_web::test]
async fn test_delete_admin_rules() {
    let ctx = TestContext::new().await;
    let admin = ctx.seed_admin("principal", "secret-pass", AdminRole::Admin).await;
    let staff = ctx.seed_admin("clerk", "secret-pass", AdminRole::Staff).await;
    let app = test::init_service(ctx.app()).await;

    let admin_auth = (
        "Authorization",
        format!("Bearer {}", admin.generate_access_token().unwrap()),
    );
    let staff_auth = (
        "Authorization",
        format!("Bearer {}", staff.generate_access_token().unwrap()),
    );

    // staff 没有删除权限
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/delete/{}", admin.admin_id))
        .insert_header(staff_auth)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // 不能删除自己
    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/delete/{}", admin.admin_id))
        .insert_header(admin_auth.clone())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/delete/{}", staff.admin_id))
        .insert_header(admin_auth.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/delete/{}", staff.admin_id))
        .insert_header(admin_auth)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
