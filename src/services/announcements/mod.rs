pub mod create;
pub mod delete;
pub mod list;
pub mod list_all;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::errors::{BulletinError, Result};
use crate::middlewares::RequireTeacher;
use crate::middlewares::require_teacher::MISSING_CREDENTIALS;
use crate::models::announcements::requests::{
    CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| {
                BulletinError::storage_backend_not_found("Storage not found in app data")
            })
    }

    pub async fn list_active_announcements(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_active_announcements(self, request).await
    }

    pub async fn list_all_announcements(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list_all::list_all_announcements(self, request).await
    }

    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        req: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, request, req).await
    }

    pub async fn update_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: String,
        req: UpdateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_announcement(self, request, announcement_id, req).await
    }

    pub async fn delete_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_announcement(self, request, announcement_id).await
    }
}

// 获取中间件写入的教师用户名
pub(crate) fn current_teacher(request: &HttpRequest) -> Result<String> {
    RequireTeacher::extract_teacher_username(request)
        .ok_or_else(|| BulletinError::authentication(MISSING_CREDENTIALS))
}

/// 将错误映射为 HTTP 响应
pub(crate) fn error_response(err: &BulletinError) -> HttpResponse {
    match err {
        BulletinError::Authentication(message) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message.as_str())),
        BulletinError::DateParse(message) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::AnnouncementInvalidDate, message.as_str()),
        ),
        BulletinError::Validation(message) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message.as_str())),
        BulletinError::NotFound(message) => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::AnnouncementNotFound, message.as_str()),
        ),
        BulletinError::Internal(message) => {
            error!("Announcement operation failed: {}", message);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AnnouncementUpdateFailed,
                message.as_str(),
            ))
        }
        other => {
            error!("Storage error: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                other.message(),
            ))
        }
    }
}
