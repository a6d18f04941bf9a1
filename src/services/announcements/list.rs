//! 当前有效公告列表（公开）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{AnnouncementService, error_response};
use crate::errors::Result;
use crate::models::announcements::entities::Announcement;
use crate::models::announcements::requests::AnnouncementListQuery;
use crate::storage::Storage;

pub async fn list_active_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    match active_announcements(storage.as_ref(), Utc::now()).await {
        Ok(announcements) => {
            debug!("Listing {} active announcements", announcements.len());
            Ok(HttpResponse::Ok().json(announcements))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 返回 `now` 时刻处于展示窗口内的公告，按创建时间倒序
///
/// 过期条件交给存储层过滤，开始时间在内存中判断。
pub async fn active_announcements(
    storage: &dyn Storage,
    now: DateTime<Utc>,
) -> Result<Vec<Announcement>> {
    let candidates = storage
        .list_announcements(AnnouncementListQuery {
            expiring_not_before: Some(now),
        })
        .await?;

    Ok(candidates
        .into_iter()
        .filter(|announcement| announcement.is_active_at(now))
        .collect())
}
