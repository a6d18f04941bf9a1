//! 全部公告列表（教师）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{AnnouncementService, current_teacher, error_response};
use crate::models::announcements::requests::AnnouncementListQuery;

pub async fn list_all_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    match storage
        .list_announcements(AnnouncementListQuery::default())
        .await
    {
        Ok(announcements) => {
            debug!(
                "Teacher {} listed {} announcements",
                teacher,
                announcements.len()
            );
            Ok(HttpResponse::Ok().json(announcements))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
