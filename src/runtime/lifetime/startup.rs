use crate::config::{AppConfig, SeedTeacher};
use crate::errors::Result;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 登记配置中的教师
/// 已存在的教师保持不变，返回新登记的数量
pub async fn seed_teachers(storage: &dyn Storage, teachers: &[SeedTeacher]) -> usize {
    let mut created = 0;

    for teacher in teachers {
        if teacher.username.is_empty() {
            warn!("Skipping seed teacher with empty username");
            continue;
        }

        match storage.teacher_exists(&teacher.username).await {
            Ok(true) => {
                debug!("Teacher {} already registered, skipping", teacher.username);
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Failed to look up teacher {}: {}", teacher.username, e);
                continue;
            }
        }

        let request = CreateTeacherRequest {
            username: teacher.username.clone(),
            display_name: teacher.display_name.clone(),
        };

        match storage.create_teacher(request).await {
            Ok(teacher) => {
                info!("Teacher {} registered", teacher.username);
                created += 1;
            }
            Err(e) => {
                warn!("Failed to register teacher {}: {}", teacher.username, e);
            }
        }
    }

    created
}

/// 准备服务器启动的上下文
/// 包括存储后端和教师目录
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!(
        "Storage backend '{}' initialized and migrations completed",
        config.database.backend
    );

    let created = seed_teachers(storage.as_ref(), &config.seed.teachers).await;
    if created > 0 {
        warn!("Registered {} teacher(s) from configuration", created);
    }

    Ok(StartupContext { storage })
}
