use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::admins::entities::AdminRole;
use crate::models::admins::requests::{
    CreateAdminRequest, LoginRequest, UpdateAdminRequest, UpdateCredentialsRequest,
};
use crate::services::AdminService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn create_admin(
    req: HttpRequest,
    admin_data: web::Json<CreateAdminRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .create_admin(&req, admin_data.into_inner())
        .await
}

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.login(&req, login_data.into_inner()).await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.logout(&req).await
}

pub async fn list_admins(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_admins(&req).await
}

pub async fn get_current_admin(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_current_admin(&req).await
}

pub async fn update_admin(
    req: HttpRequest,
    admin_id: SafeIDI64,
    update_data: web::Json<UpdateAdminRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_admin(&req, admin_id.0, update_data.into_inner())
        .await
}

pub async fn delete_admin(req: HttpRequest, admin_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_admin(&req, admin_id.0).await
}

pub async fn update_credentials(
    req: HttpRequest,
    update_data: web::Json<UpdateCredentialsRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_credentials(&req, update_data.into_inner())
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .route("/createAdmin", web::post().to(create_admin))
            .route(
                "/login",
                web::post().to(login).wrap(middlewares::RateLimit::login()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_admins))
                    .route("/", web::get().to(list_admins))
                    .route("/me", web::get().to(get_current_admin))
                    .route("/logout", web::post().to(logout))
                    .route("/update/{id}", web::put().to(update_admin))
                    .route("/updateEmailPassword", web::put().to(update_credentials))
                    .route(
                        "/delete/{id}",
                        web::delete()
                            .to(delete_admin)
                            // 仅 admin 角色可删除管理员
                            .wrap(middlewares::RequireRole::new(&AdminRole::Admin)),
                    ),
            ),
    );
}
