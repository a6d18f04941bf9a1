use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::parse_iso8601;

/// 公告 ID
///
/// 对外始终是字符串，底层存储的原生 ID 类型不会泄露到服务层。
/// 只有存储后端可以构造它（见 `Storage::parse_announcement_id`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementId(String);

impl AnnouncementId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnnouncementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// 公告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    // 公告ID
    pub id: AnnouncementId,
    // 公告内容
    pub message: String,
    // 开始展示时间（ISO-8601，原样保存）
    pub start_date: Option<String>,
    // 过期时间（ISO-8601，原样保存）
    pub expiration_date: String,
    // 创建者（教师用户名）
    pub created_by: String,
    // 创建时间
    pub created_at: String,
}

// 公告状态，读取时根据当前时间计算，不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementStatus {
    Pending, // 尚未开始
    Active,  // 展示中
    Expired, // 已过期
}

impl std::fmt::Display for AnnouncementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementStatus::Pending => write!(f, "pending"),
            AnnouncementStatus::Active => write!(f, "active"),
            AnnouncementStatus::Expired => write!(f, "expired"),
        }
    }
}

impl Announcement {
    /// 计算公告在 `now` 时刻的状态
    ///
    /// 展示窗口为 `[start_date, expiration_date]`，两端都包含；
    /// 没有 start_date 时窗口从最早时刻开始。
    /// 无法解析的过期时间视为已过期，无法解析的开始时间视为尚未开始。
    pub fn status_at(&self, now: DateTime<Utc>) -> AnnouncementStatus {
        let expired = parse_iso8601(&self.expiration_date)
            .map(|expiration| expiration < now)
            .unwrap_or(true);
        if expired {
            return AnnouncementStatus::Expired;
        }

        match self.start_date.as_deref() {
            None => AnnouncementStatus::Active,
            Some(raw) => match parse_iso8601(raw) {
                Ok(start) if start <= now => AnnouncementStatus::Active,
                _ => AnnouncementStatus::Pending,
            },
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == AnnouncementStatus::Active
    }
}
