//! 教师目录存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{TeacherActiveModel, Teachers};
use crate::errors::{BulletinError, Result};
use crate::models::teachers::{entities::Teacher, requests::CreateTeacherRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 新增教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = TeacherActiveModel {
            username: Set(req.username),
            display_name: Set(req.display_name),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过用户名获取教师
    pub async fn get_teacher_by_username_impl(&self, username: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| BulletinError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }
}
