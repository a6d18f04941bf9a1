//! 公告字段校验

use chrono::{DateTime, Utc};

use crate::errors::{BulletinError, Result};
use crate::models::announcements::entities::AnnouncementId;
use crate::storage::Storage;
use crate::utils::IsoTimestamp;

pub const INVALID_DATE_FORMAT: &str = "Invalid date format. Use ISO format (YYYY-MM-DDTHH:MM:SS)";
pub const EXPIRATION_NOT_IN_FUTURE: &str = "Expiration date must be in the future";
pub const START_NOT_BEFORE_EXPIRATION: &str = "Start date must be before expiration date";
pub const INVALID_ANNOUNCEMENT_ID: &str = "Invalid announcement ID";
pub const ANNOUNCEMENT_NOT_FOUND: &str = "Announcement not found";
pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";
pub const UPDATE_FAILED: &str = "Failed to update announcement";
pub const DELETED: &str = "Announcement deleted successfully";

pub fn parse_date(raw: String) -> Result<IsoTimestamp> {
    IsoTimestamp::parse(raw).map_err(|_| BulletinError::date_parse(INVALID_DATE_FORMAT))
}

/// 过期时间必须能解析且严格晚于 `now`
pub fn validate_expiration(raw: String, now: DateTime<Utc>) -> Result<IsoTimestamp> {
    let expiration = parse_date(raw)?;
    if expiration.instant() <= now {
        return Err(BulletinError::validation(EXPIRATION_NOT_IN_FUTURE));
    }
    Ok(expiration)
}

/// 开始时间必须能解析且严格早于过期时间
pub fn validate_start(raw: String, expiration: &IsoTimestamp) -> Result<IsoTimestamp> {
    let start = parse_date(raw)?;
    if start.instant() >= expiration.instant() {
        return Err(BulletinError::validation(START_NOT_BEFORE_EXPIRATION));
    }
    Ok(start)
}

pub fn parse_announcement_id(storage: &dyn Storage, raw: &str) -> Result<AnnouncementId> {
    storage
        .parse_announcement_id(raw)
        .ok_or_else(|| BulletinError::validation(INVALID_ANNOUNCEMENT_ID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_expiration_must_parse() {
        let err = validate_expiration("next tuesday".into(), now()).unwrap_err();
        assert_eq!(err, BulletinError::date_parse(INVALID_DATE_FORMAT));
    }

    #[test]
    fn test_expiration_must_be_strictly_future() {
        let err = validate_expiration("2030-06-01T12:00:00Z".into(), now()).unwrap_err();
        assert_eq!(err, BulletinError::validation(EXPIRATION_NOT_IN_FUTURE));

        let ok = validate_expiration("2030-06-01T12:00:01".into(), now()).unwrap();
        assert_eq!(ok.instant(), now() + Duration::seconds(1));
        assert_eq!(ok.raw(), "2030-06-01T12:00:01");
    }

    #[test]
    fn test_start_must_precede_expiration() {
        let expiration = validate_expiration("2030-06-01T13:00:00Z".into(), now()).unwrap();

        let err = validate_start("2030-06-01T14:00:00Z".into(), &expiration).unwrap_err();
        assert_eq!(err, BulletinError::validation(START_NOT_BEFORE_EXPIRATION));

        let err = validate_start("2030-06-01T13:00:00Z".into(), &expiration).unwrap_err();
        assert_eq!(err, BulletinError::validation(START_NOT_BEFORE_EXPIRATION));

        let err = validate_start("13:00".into(), &expiration).unwrap_err();
        assert_eq!(err, BulletinError::date_parse(INVALID_DATE_FORMAT));

        // 开始时间可以早于当前时间
        assert!(validate_start("2029-01-01T00:00:00Z".into(), &expiration).is_ok());
    }
}
