use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::info;

use super::validate::{
    ANNOUNCEMENT_NOT_FOUND, NO_FIELDS_TO_UPDATE, UPDATE_FAILED, parse_announcement_id, parse_date,
    validate_expiration,
};
use super::{AnnouncementService, current_teacher, error_response};
use crate::errors::{BulletinError, Result};
use crate::models::announcements::entities::Announcement;
use crate::models::announcements::requests::{AnnouncementPatch, UpdateAnnouncementRequest};
use crate::storage::Storage;

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: String,
    req: UpdateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    match update(storage.as_ref(), &announcement_id, req, Utc::now()).await {
        Ok(announcement) => {
            info!("Announcement {} updated by {}", announcement.id, teacher);
            Ok(HttpResponse::Ok().json(announcement))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 局部更新公告并返回更新后的完整公告
///
/// 只有提供的字段会被写入。新的过期时间必须晚于 `now`，
/// 但开始时间与过期时间的先后关系在更新时不再检查。
/// 空字符串的开始时间会清除原有开始时间。
pub async fn update(
    storage: &dyn Storage,
    announcement_id: &str,
    req: UpdateAnnouncementRequest,
    now: DateTime<Utc>,
) -> Result<Announcement> {
    let id = parse_announcement_id(storage, announcement_id)?;

    if storage.get_announcement_by_id(&id).await?.is_none() {
        return Err(BulletinError::not_found(ANNOUNCEMENT_NOT_FOUND));
    }

    let patch = AnnouncementPatch {
        message: req.message,
        start_date: req
            .start_date
            .map(|raw| {
                if raw.is_empty() {
                    Ok(None)
                } else {
                    parse_date(raw).map(Some)
                }
            })
            .transpose()?,
        expiration_date: req
            .expiration_date
            .map(|raw| validate_expiration(raw, now))
            .transpose()?,
    };

    if patch.is_empty() {
        return Err(BulletinError::validation(NO_FIELDS_TO_UPDATE));
    }

    let outcome = storage.update_announcement(&id, patch).await?;
    if outcome.matched == 0 && outcome.modified == 0 {
        return Err(BulletinError::internal(UPDATE_FAILED));
    }

    storage
        .get_announcement_by_id(&id)
        .await?
        .ok_or_else(|| BulletinError::not_found(ANNOUNCEMENT_NOT_FOUND))
}
