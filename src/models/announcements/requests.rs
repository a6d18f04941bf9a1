use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::utils::IsoTimestamp;

// 创建公告请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub message: String,
    pub start_date: Option<String>,
    pub expiration_date: String,
}

// 更新公告请求，只应用非空字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
}

// 教师凭据查询参数 `?teacher_username=...`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherCredentialQuery {
    pub teacher_username: Option<String>,
}

// 待写入的公告（用于存储层，字段均已校验）
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<IsoTimestamp>,
    pub expiration_date: IsoTimestamp,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// 公告局部更新（用于存储层），None 表示保留原值
#[derive(Debug, Clone, Default)]
pub struct AnnouncementPatch {
    pub message: Option<String>,
    // Some(None) 表示清除开始时间
    pub start_date: Option<Option<IsoTimestamp>>,
    pub expiration_date: Option<IsoTimestamp>,
}

impl AnnouncementPatch {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.start_date.is_none() && self.expiration_date.is_none()
    }
}

// 公告列表查询参数（用于存储层），结果总是按创建时间倒序
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    // 只返回过期时间不早于该时刻的公告
    pub expiring_not_before: Option<DateTime<Utc>>,
}
