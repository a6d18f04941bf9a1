//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub start_date: Option<String>,
    // 归一化后的开始时间（UTC 毫秒）
    pub starts_at: Option<i64>,
    pub expiration_date: String,
    // 归一化后的过期时间（UTC 毫秒）
    pub expires_at: i64,
    pub created_by: String,
    // 创建时间（UTC 毫秒）
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_announcement(self) -> crate::models::announcements::entities::Announcement {
        use crate::models::announcements::entities::{Announcement, AnnouncementId};
        use crate::utils::format_iso8601;
        use chrono::{DateTime, Utc};

        Announcement {
            id: AnnouncementId::new(self.id.to_string()),
            message: self.message,
            start_date: self.start_date,
            expiration_date: self.expiration_date,
            created_by: self.created_by,
            created_at: format_iso8601(
                DateTime::<Utc>::from_timestamp_millis(self.created_at).unwrap_or_default(),
            ),
        }
    }
}
