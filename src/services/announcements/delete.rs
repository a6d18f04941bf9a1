use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::{ANNOUNCEMENT_NOT_FOUND, DELETED, parse_announcement_id};
use super::{AnnouncementService, current_teacher, error_response};
use crate::errors::{BulletinError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: String,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    match delete(storage.as_ref(), &announcement_id).await {
        Ok(()) => {
            info!("Announcement {} deleted by {}", announcement_id, teacher);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(DELETED)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 硬删除公告
pub async fn delete(storage: &dyn Storage, announcement_id: &str) -> Result<()> {
    let id = parse_announcement_id(storage, announcement_id)?;
    match storage.delete_announcement(&id).await? {
        0 => Err(BulletinError::not_found(ANNOUNCEMENT_NOT_FOUND)),
        _ => Ok(()),
    }
}
