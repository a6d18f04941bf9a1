use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{BulletinError, Result};
use crate::models::{
    announcements::{
        entities::{Announcement, AnnouncementId},
        requests::{AnnouncementListQuery, AnnouncementPatch, NewAnnouncement},
        responses::UpdateOutcome,
    },
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};

pub mod memory_storage;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 教师目录方法
    // 新增教师
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    // 通过用户名获取教师
    async fn get_teacher_by_username(&self, username: &str) -> Result<Option<Teacher>>;
    // 判断用户名是否属于已登记的教师
    async fn teacher_exists(&self, username: &str) -> Result<bool> {
        Ok(self.get_teacher_by_username(username).await?.is_some())
    }

    /// 公告管理方法
    // 校验并转换外部传入的公告 ID，格式不合法时返回 None
    fn parse_announcement_id(&self, raw: &str) -> Option<AnnouncementId>;
    // 创建公告，由存储分配 ID
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    // 列出公告，按创建时间倒序
    async fn list_announcements(&self, query: AnnouncementListQuery) -> Result<Vec<Announcement>>;
    // 通过ID获取公告
    async fn get_announcement_by_id(&self, id: &AnnouncementId) -> Result<Option<Announcement>>;
    // 局部更新公告，只写入 patch 中提供的字段
    async fn update_announcement(
        &self,
        id: &AnnouncementId,
        patch: AnnouncementPatch,
    ) -> Result<UpdateOutcome>;
    // 删除公告，返回删除条数
    async fn delete_announcement(&self, id: &AnnouncementId) -> Result<u64>;
}

/// 根据配置创建存储后端
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    match config.database.backend.as_str() {
        "sea_orm" => {
            let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
            Ok(Arc::new(storage))
        }
        "memory" => Ok(Arc::new(memory_storage::MemoryStorage::new())),
        other => Err(BulletinError::storage_backend_not_found(format!(
            "Unknown storage backend '{other}'. Supported: sea_orm, memory"
        ))),
    }
}
