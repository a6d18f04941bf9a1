use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::info;

use super::validate::{validate_expiration, validate_start};
use super::{AnnouncementService, current_teacher, error_response};
use crate::errors::Result;
use crate::models::announcements::entities::Announcement;
use crate::models::announcements::requests::{CreateAnnouncementRequest, NewAnnouncement};
use crate::storage::Storage;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    req: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    match create(storage.as_ref(), &teacher, req, Utc::now()).await {
        Ok(announcement) => {
            info!(
                "Announcement {} created by {}",
                announcement.id, announcement.created_by
            );
            Ok(HttpResponse::Created().json(announcement))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 校验并写入新公告
///
/// 先校验过期时间，再校验开始时间；任一失败都不会写入。
/// 空字符串的开始时间视为未提供，公告立即生效。
pub async fn create(
    storage: &dyn Storage,
    teacher: &str,
    req: CreateAnnouncementRequest,
    now: DateTime<Utc>,
) -> Result<Announcement> {
    let expiration_date = validate_expiration(req.expiration_date, now)?;
    let start_date = req
        .start_date
        .filter(|raw| !raw.is_empty())
        .map(|raw| validate_start(raw, &expiration_date))
        .transpose()?;

    storage
        .create_announcement(NewAnnouncement {
            message: req.message,
            start_date,
            expiration_date,
            created_by: teacher.to_string(),
            created_at: now,
        })
        .await
}
