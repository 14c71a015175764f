mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::{Value, json};

use common::{PDF_BYTES, PNG_BYTES, RecordingStore, TestContext, multipart_body};

#[actix_web::test]
async fn test_unsupported_image_type_never_reaches_store() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let (content_type, body) = multipart_body(
        &[("ImageType", "school")],
        Some(("image", "banner.png", "text/html", b"<html></html>")),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 扩展名合法但内容不是 PNG
    let (content_type, body) = multipart_body(
        &[("ImageType", "school")],
        Some(("image", "banner.png", "image/png", b"not really a png file")),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // PDF 改声明成 PNG 也不能作为图片上传
    let (content_type, body) = multipart_body(
        &[("ImageType", "school")],
        Some(("image", "notes.pdf", "image/png", PDF_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (content_type, body) = multipart_body(
        &[("ImageType", "school")],
        Some(("image", "notes.pdf", "application/pdf", PDF_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth)
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ctx.object_store.upload_count(), 0);
}

#[actix_web::test]
async fn test_image_upload_requires_login() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let (content_type, body) = multipart_body(
        &[("ImageType", "school")],
        Some(("image", "banner.png", "image/png", PNG_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.object_store.upload_count(), 0);
}

#[actix_web::test]
async fn test_image_upload_and_delete_round_trip_through_store() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let (content_type, body) = multipart_body(
        &[("ImageType", "school"), ("Description", "Front gate")],
        Some(("image", "gate.png", "image/png", PNG_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let image_id = body["data"]["ImageID"].as_i64().unwrap();
    let public_id = body["data"]["PublicID"].as_str().unwrap().to_string();
    assert!(public_id.starts_with("school/schools/"));
    assert_eq!(ctx.object_store.upload_count(), 1);

    let req = test::TestRequest::get().uri("/api/images/type/all").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/images/{image_id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.object_store.deleted(), vec![public_id]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/images/{image_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_routine_falls_back_to_local_disk() {
    let ctx = TestContext::with_store(RecordingStore::failing()).await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(json!({ "ClassName": "Grade 8", "Section": "A" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = body["data"]["class"]["ClassID"].as_i64().unwrap();

    let class_field = class_id.to_string();
    let (content_type, body) = multipart_body(
        &[
            ("RoutineTitle", "Spring timetable"),
            ("ClassID", class_field.as_str()),
            ("RoutineDate", "2024-02-01"),
        ],
        Some(("routineFile", "timetable.pdf", "application/pdf", PDF_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/routines")
        .insert_header(auth)
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let routine = &body["data"]["routine"];
    assert_eq!(routine["FileType"], "pdf");
    assert!(routine["FilePublicID"].is_null());
    assert_eq!(body["data"]["classInfo"]["ClassID"], class_id);
    assert_eq!(ctx.object_store.upload_count(), 1);

    let file_url = routine["FileURL"].as_str().unwrap();
    let path = file_url
        .strip_prefix("http://school.test")
        .expect("local url uses the public base url");
    assert!(path.starts_with("/uploads/routine_"));
    let file_name = path.trim_start_matches("/uploads/");
    assert!(common::public_dir().join(file_name).exists());

    let req = test::TestRequest::get().uri(path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let served = test::read_body(resp).await;
    assert_eq!(served.as_ref(), PDF_BYTES);
}

#[actix_web::test]
async fn test_routine_requires_existing_class() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let (content_type, body) = multipart_body(
        &[
            ("RoutineTitle", "Orphan"),
            ("ClassID", "999"),
            ("RoutineDate", "2024-02-01"),
        ],
        None,
    );
    let req = test::TestRequest::post()
        .uri("/api/routines")
        .insert_header(auth)
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_upload_path_traversal_rejected() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/uploads/../secret.txt")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/uploads/missing.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_image_replace_deletes_old_object_last() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let (content_type, body) = multipart_body(
        &[("ImageType", "teacher")],
        Some(("image", "portrait.png", "image/png", PNG_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/images")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let image_id = body["data"]["ImageID"].as_i64().unwrap();
    let old_id = body["data"]["PublicID"].as_str().unwrap().to_string();

    let (content_type, body) = multipart_body(
        &[],
        Some(("image", "portrait-2024.png", "image/png", PNG_BYTES)),
    );
    let req = test::TestRequest::put()
        .uri(&format!("/api/images/{image_id}/image"))
        .insert_header(auth)
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let new_id = body["data"]["PublicID"].as_str().unwrap().to_string();
    assert_ne!(new_id, old_id);
    assert_eq!(body["data"]["ImageType"], "teacher");

    assert_eq!(
        ctx.object_store.call_log(),
        vec![
            format!("upload:{old_id}"),
            format!("upload:{new_id}"),
            format!("delete:{old_id}"),
        ]
    );
}

#[actix_web::test]
async fn test_routine_update_replaces_file_then_soft_deletes() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let auth = ctx.admin_bearer().await;

    let req = test::TestRequest::post()
        .uri("/api/classes/add")
        .set_json(json!({ "ClassName": "Grade 6", "Section": "B" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = body["data"]["class"]["ClassID"].as_i64().unwrap();

    let class_field = class_id.to_string();
    let (content_type, body) = multipart_body(
        &[
            ("RoutineTitle", "Autumn timetable"),
            ("ClassID", class_field.as_str()),
            ("RoutineDate", "2024-09-01"),
        ],
        Some(("routineFile", "autumn.pdf", "application/pdf", PDF_BYTES)),
    );
    let req = test::TestRequest::post()
        .uri("/api/routines")
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let routine_id = body["data"]["routine"]["RoutineID"].as_i64().unwrap();
    let old_id = body["data"]["routine"]["FilePublicID"]
        .as_str()
        .unwrap()
        .to_string();

    let (content_type, body) = multipart_body(
        &[("RoutineTitle", "Autumn timetable (revised)")],
        Some(("routineFile", "autumn-v2.pdf", "application/pdf", PDF_BYTES)),
    );
    let req = test::TestRequest::put()
        .uri(&format!("/api/routines/{routine_id}"))
        .insert_header(auth.clone())
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["RoutineTitle"], "Autumn timetable (revised)");
    let new_id = body["data"]["FilePublicID"].as_str().unwrap().to_string();

    // 新文件上传并写库之后才删除旧文件
    assert_eq!(
        ctx.object_store.call_log(),
        vec![
            format!("upload:{old_id}"),
            format!("upload:{new_id}"),
            format!("delete:{old_id}"),
        ]
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/routines/{routine_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["deletedRoutine"]["RoutineID"], routine_id);
    assert_eq!(
        body["data"]["deletedRoutine"]["RoutineTitle"],
        "Autumn timetable (revised)"
    );
    assert_eq!(ctx.object_store.deleted().last(), Some(&new_id));

    // 软删除后不再可见，再次删除为 404
    let req = test::TestRequest::get()
        .uri(&format!("/api/routines/{routine_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
    let req = test::TestRequest::delete()
        .uri(&format!("/api/routines/{routine_id}"))
        .insert_header(auth)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
