use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::models::attendance::requests::{
    AttendanceExistsQuery, AttendanceFilter, AttendanceSyncRequest, BulkAttendanceRequest,
    CreateAttendanceRequest, MarkAttendanceRequest, UpdateAttendanceRequest,
};
use crate::services::AttendanceService;
use crate::utils::{SafeClassIdI64, SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// 只取路径中的 {date}
#[derive(Debug, Deserialize)]
pub struct DatePath {
    date: String,
}

pub async fn list_attendance(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, AttendanceFilter::default())
        .await
}

pub async fn create_attendance(
    req: HttpRequest,
    attendance_data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .create_attendance(&req, attendance_data.into_inner())
        .await
}

pub async fn mark_attendance(
    req: HttpRequest,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(&req, mark_data.into_inner())
        .await
}

pub async fn bulk_mark(
    req: HttpRequest,
    bulk_data: web::Json<BulkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .bulk_mark(&req, bulk_data.into_inner())
        .await
}

pub async fn count_attendance(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.count_attendance(&req).await
}

pub async fn statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.statistics(&req).await
}

pub async fn check_exists(
    req: HttpRequest,
    query: web::Query<AttendanceExistsQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .check_exists(&req, query.into_inner())
        .await
}

pub async fn student_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.student_summary(&req, student_id.0).await
}

pub async fn class_date_summary(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    path: web::Path<DatePath>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .class_date_summary(&req, class_id.0, path.into_inner().date)
        .await
}

pub async fn search_by_student(
    req: HttpRequest,
    path: web::Path<(String, String, String, String)>,
) -> ActixResult<HttpResponse> {
    let (first_name, roll_number, class_name, section) = path.into_inner();
    ATTENDANCE_SERVICE
        .search_by_student(&req, first_name, roll_number, class_name, section)
        .await
}

pub async fn search_by_class_section(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (class_name, section) = path.into_inner();
    let filter = AttendanceFilter {
        class_name: Some(class_name),
        section: Some(section),
        ..Default::default()
    };
    ATTENDANCE_SERVICE.list_attendance(&req, filter).await
}

pub async fn search_by_date_range(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (start, end) = path.into_inner();
    ATTENDANCE_SERVICE
        .list_by_date_range(&req, start, end)
        .await
}

pub async fn list_by_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let filter = AttendanceFilter {
        student_id: Some(student_id.0),
        ..Default::default()
    };
    ATTENDANCE_SERVICE.list_attendance(&req, filter).await
}

pub async fn list_by_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    let filter = AttendanceFilter {
        class_id: Some(class_id.0),
        ..Default::default()
    };
    ATTENDANCE_SERVICE.list_attendance(&req, filter).await
}

pub async fn list_by_date(req: HttpRequest, date: web::Path<String>) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_by_date(&req, date.into_inner())
        .await
}

pub async fn validate_sync(
    req: HttpRequest,
    sync_data: web::Json<AttendanceSyncRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .validate_sync(&req, sync_data.into_inner())
        .await
}

pub async fn force_sync(
    req: HttpRequest,
    sync_data: web::Json<AttendanceSyncRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .force_sync(&req, sync_data.into_inner())
        .await
}

pub async fn get_attendance(
    req: HttpRequest,
    attendance_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .get_attendance(&req, attendance_id.0)
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    attendance_id: SafeIDI64,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, attendance_id.0, update_data.into_inner())
        .await
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .delete_attendance(&req, attendance_id.0)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(list_attendance))
                    .route(web::post().to(create_attendance)),
            )
            .route("/mark", web::post().to(mark_attendance))
            .route("/bulk", web::post().to(bulk_mark))
            .route("/count", web::get().to(count_attendance))
            .route("/statistics", web::get().to(statistics))
            .route("/exists", web::get().to(check_exists))
            .route("/validate-sync", web::post().to(validate_sync))
            .route("/force-sync", web::post().to(force_sync))
            .route("/summary/student/{student_id}", web::get().to(student_summary))
            .route(
                "/summary/class/{class_id}/date/{date}",
                web::get().to(class_date_summary),
            )
            .route(
                "/search/name/{first_name}/roll/{roll}/class/{class_name}/section/{section}",
                web::get().to(search_by_student),
            )
            .route(
                "/search/class/{class_name}/section/{section}",
                web::get().to(search_by_class_section),
            )
            .route(
                "/search/daterange/{start}/{end}",
                web::get().to(search_by_date_range),
            )
            .route("/student/{id}", web::get().to(list_by_student))
            .route("/class/{id}", web::get().to(list_by_class))
            .route("/date/{date}", web::get().to(list_by_date))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_attendance))
                    .route(web::put().to(update_attendance))
                    .route(web::delete().to(delete_attendance)),
            ),
    );
}
