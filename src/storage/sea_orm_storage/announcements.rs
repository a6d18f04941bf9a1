//! 公告存储操作

use super::SeaOrmStorage;
use crate::entity::announcements::Column;
use crate::entity::prelude::{AnnouncementActiveModel, Announcements};
use crate::errors::{BulletinError, Result};
use crate::models::announcements::{
    entities::{Announcement, AnnouncementId},
    requests::{AnnouncementListQuery, AnnouncementPatch, NewAnnouncement},
    responses::UpdateOutcome,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 公告 ID 为正整数的十进制表示
    pub(super) fn parse_announcement_id_impl(raw: &str) -> Option<AnnouncementId> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(AnnouncementId::new(id.to_string())),
            _ => None,
        }
    }

    fn announcement_key(id: &AnnouncementId) -> Result<i64> {
        id.as_str().parse::<i64>().map_err(|_| {
            BulletinError::database_operation(format!("公告 ID 不是数据库主键: {id}"))
        })
    }

    /// 创建公告
    pub async fn create_announcement_impl(&self, req: NewAnnouncement) -> Result<Announcement> {
        let model = AnnouncementActiveModel {
            message: Set(req.message),
            starts_at: Set(req.start_date.as_ref().map(|s| s.instant().timestamp_millis())),
            start_date: Set(req.start_date.map(|s| s.into_raw())),
            expires_at: Set(req.expiration_date.instant().timestamp_millis()),
            expiration_date: Set(req.expiration_date.into_raw()),
            created_by: Set(req.created_by),
            created_at: Set(req.created_at.timestamp_millis()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("创建公告失败: {e}")))?;

        Ok(result.into_announcement())
    }

    /// 列出公告（创建时间倒序）
    pub async fn list_announcements_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<Vec<Announcement>> {
        let mut select = Announcements::find();

        // 过期时间筛选
        if let Some(threshold) = query.expiring_not_before {
            select = select.filter(Column::ExpiresAt.gte(threshold.timestamp_millis()));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_announcement()).collect())
    }

    /// 通过 ID 获取公告
    pub async fn get_announcement_by_id_impl(
        &self,
        id: &AnnouncementId,
    ) -> Result<Option<Announcement>> {
        let key = Self::announcement_key(id)?;
        let result = Announcements::find_by_id(key)
            .one(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("查询公告失败: {e}")))?;

        Ok(result.map(|m| m.into_announcement()))
    }

    /// 局部更新公告
    pub async fn update_announcement_impl(
        &self,
        id: &AnnouncementId,
        patch: AnnouncementPatch,
    ) -> Result<UpdateOutcome> {
        let key = Self::announcement_key(id)?;

        let mut model = <AnnouncementActiveModel as ActiveModelTrait>::default();

        if let Some(message) = patch.message {
            model.message = Set(message);
        }

        if let Some(start_date) = patch.start_date {
            model.starts_at = Set(start_date.as_ref().map(|s| s.instant().timestamp_millis()));
            model.start_date = Set(start_date.map(|s| s.into_raw()));
        }

        if let Some(expiration_date) = patch.expiration_date {
            model.expires_at = Set(expiration_date.instant().timestamp_millis());
            model.expiration_date = Set(expiration_date.into_raw());
        }

        let result = Announcements::update_many()
            .set(model)
            .filter(Column::Id.eq(key))
            .exec(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("更新公告失败: {e}")))?;

        if result.rows_affected > 0 {
            return Ok(UpdateOutcome {
                matched: result.rows_affected,
                modified: result.rows_affected,
            });
        }

        // MySQL 对值未变化的行返回 0，这里区分“未命中”与“命中但未修改”
        let matched = u64::from(self.get_announcement_by_id_impl(id).await?.is_some());
        Ok(UpdateOutcome {
            matched,
            modified: 0,
        })
    }

    /// 删除公告
    pub async fn delete_announcement_impl(&self, id: &AnnouncementId) -> Result<u64> {
        let key = Self::announcement_key(id)?;
        let result = Announcements::delete_by_id(key)
            .exec(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::teachers::requests::CreateTeacherRequest;
    use crate::storage::Storage;
    use crate::utils::IsoTimestamp;
    use chrono::{Duration, TimeZone, Utc};

    async fn sqlite_storage() -> SeaOrmStorage {
        // 单连接，保证内存数据库在整个测试期间共享
        let config = DatabaseConfig {
            backend: "sea_orm".into(),
            url: ":memory:".into(),
            pool_size: 1,
            timeout: 5,
        };
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory sqlite should connect")
    }

    fn new_announcement(message: &str, minutes: i64, expires: &str) -> NewAnnouncement {
        NewAnnouncement {
            message: message.into(),
            start_date: None,
            expiration_date: IsoTimestamp::parse(expires).unwrap(),
            created_by: "mrodriguez".into(),
            created_at: Utc.with_ymd_and_hms(2030, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_parse_announcement_id() {
        assert_eq!(
            SeaOrmStorage::parse_announcement_id_impl("42").map(|id| id.to_string()),
            Some("42".to_string())
        );
        assert_eq!(
            SeaOrmStorage::parse_announcement_id_impl("007").map(|id| id.to_string()),
            Some("7".to_string())
        );
        assert!(SeaOrmStorage::parse_announcement_id_impl("0").is_none());
        assert!(SeaOrmStorage::parse_announcement_id_impl("-3").is_none());
        assert!(SeaOrmStorage::parse_announcement_id_impl("+3").is_none());
        assert!(SeaOrmStorage::parse_announcement_id_impl("abc").is_none());
        assert!(SeaOrmStorage::parse_announcement_id_impl("").is_none());
        assert!(SeaOrmStorage::parse_announcement_id_impl("99999999999999999999").is_none());
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let storage = sqlite_storage().await;

        storage
            .create_teacher(CreateTeacherRequest {
                username: "mrodriguez".into(),
                display_name: Some("Ms. Rodriguez".into()),
            })
            .await
            .unwrap();
        assert!(storage.teacher_exists("mrodriguez").await.unwrap());
        assert!(!storage.teacher_exists("ghost").await.unwrap());

        let old = storage
            .create_announcement(new_announcement("old", 0, "2030-03-02T00:00:00Z"))
            .await
            .unwrap();
        let new = storage
            .create_announcement(new_announcement("new", 5, "2030-03-10T00:00:00+02:00"))
            .await
            .unwrap();
        assert_eq!(new.expiration_date, "2030-03-10T00:00:00+02:00");

        let all = storage
            .list_announcements(AnnouncementListQuery::default())
            .await
            .unwrap();
        assert_eq!(all, vec![new.clone(), old.clone()]);

        let live = storage
            .list_announcements(AnnouncementListQuery {
                expiring_not_before: Some(Utc.with_ymd_and_hms(2030, 3, 5, 0, 0, 0).unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(live, vec![new.clone()]);

        let outcome = storage
            .update_announcement(
                &old.id,
                AnnouncementPatch {
                    message: Some("old, edited".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome.matched, 1);

        let edited = storage.get_announcement_by_id(&old.id).await.unwrap().unwrap();
        assert_eq!(edited.message, "old, edited");
        assert_eq!(edited.expiration_date, old.expiration_date);
        assert_eq!(edited.created_at, old.created_at);

        assert_eq!(storage.delete_announcement(&old.id).await.unwrap(), 1);
        assert_eq!(storage.delete_announcement(&old.id).await.unwrap(), 0);

        let missing = storage
            .update_announcement(
                &old.id,
                AnnouncementPatch {
                    message: Some("gone".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }
}
