use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireTeacher;
use crate::models::announcements::requests::{
    CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::services::AnnouncementService;

// 懒加载的全局 AnnouncementService 实例
static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

// 列出当前有效公告
pub async fn list_active_announcements(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.list_active_announcements(&req).await
}

// 列出全部公告
pub async fn list_all_announcements(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.list_all_announcements(&req).await
}

// 创建公告
pub async fn create_announcement(
    req: HttpRequest,
    body: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .create_announcement(&req, body.into_inner())
        .await
}

// 更新公告
pub async fn update_announcement(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .update_announcement(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除公告
pub async fn delete_announcement(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .delete_announcement(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_announcements_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/announcements")
            // 当前有效公告 - 公开访问
            .service(web::resource("/active").route(web::get().to(list_active_announcements)))
            .service(
                web::resource(["", "/"])
                    // 列出全部公告 - 仅教师
                    .route(
                        web::get()
                            .to(list_all_announcements)
                            .wrap(RequireTeacher),
                    )
                    // 创建公告 - 仅教师
                    .route(web::post().to(create_announcement).wrap(RequireTeacher)),
            )
            .service(
                web::resource("/{announcement_id}")
                    // 更新公告 - 仅教师
                    .route(web::put().to(update_announcement).wrap(RequireTeacher))
                    // 删除公告 - 仅教师
                    .route(web::delete().to(delete_announcement).wrap(RequireTeacher)),
            ),
    );
}
