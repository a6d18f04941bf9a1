//! 内存存储实现
//!
//! 基于 DashMap 的进程内存储，公告 ID 为 32 位十六进制 UUID。
//! 用于测试和演示环境，进程退出后数据即丢失。

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{BulletinError, Result};
use crate::models::{
    announcements::{
        entities::{Announcement, AnnouncementId},
        requests::{AnnouncementListQuery, AnnouncementPatch, NewAnnouncement},
        responses::UpdateOutcome,
    },
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};
use crate::storage::Storage;
use crate::utils::{IsoTimestamp, format_iso8601};

struct StoredAnnouncement {
    // 插入序号，创建时间相同时用于保证新的在前
    sequence: u64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    announcement: Announcement,
}

#[derive(Default)]
pub struct MemoryStorage {
    teachers: DashMap<String, Teacher>,
    announcements: DashMap<String, StoredAnnouncement>,
    sequence: AtomicU64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        match self.teachers.entry(req.username.clone()) {
            Entry::Occupied(_) => Err(BulletinError::database_operation(format!(
                "Teacher '{}' already exists",
                req.username
            ))),
            Entry::Vacant(slot) => {
                let teacher = Teacher {
                    username: req.username,
                    display_name: req.display_name,
                    created_at: Utc::now(),
                };
                slot.insert(teacher.clone());
                Ok(teacher)
            }
        }
    }

    async fn get_teacher_by_username(&self, username: &str) -> Result<Option<Teacher>> {
        Ok(self.teachers.get(username).map(|t| t.value().clone()))
    }

    fn parse_announcement_id(&self, raw: &str) -> Option<AnnouncementId> {
        Uuid::try_parse(raw)
            .ok()
            .map(|id| AnnouncementId::new(id.simple().to_string()))
    }

    async fn create_announcement(&self, req: NewAnnouncement) -> Result<Announcement> {
        let id = Uuid::new_v4().simple().to_string();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);

        let announcement = Announcement {
            id: AnnouncementId::new(id.clone()),
            message: req.message,
            start_date: req.start_date.map(|s| s.into_raw()),
            expiration_date: req.expiration_date.raw().to_string(),
            created_by: req.created_by,
            created_at: format_iso8601(req.created_at),
        };

        self.announcements.insert(
            id,
            StoredAnnouncement {
                sequence,
                created_at: req.created_at,
                expires_at: req.expiration_date.instant(),
                announcement: announcement.clone(),
            },
        );

        Ok(announcement)
    }

    async fn list_announcements(&self, query: AnnouncementListQuery) -> Result<Vec<Announcement>> {
        let mut rows: Vec<(DateTime<Utc>, u64, Announcement)> = self
            .announcements
            .iter()
            .filter(|entry| {
                query
                    .expiring_not_before
                    .is_none_or(|threshold| entry.expires_at >= threshold)
            })
            .map(|entry| (entry.created_at, entry.sequence, entry.announcement.clone()))
            .collect();

        rows.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        debug!("Memory storage listed {} announcements", rows.len());
        Ok(rows.into_iter().map(|(_, _, a)| a).collect())
    }

    async fn get_announcement_by_id(&self, id: &AnnouncementId) -> Result<Option<Announcement>> {
        Ok(self
            .announcements
            .get(id.as_str())
            .map(|entry| entry.announcement.clone()))
    }

    async fn update_announcement(
        &self,
        id: &AnnouncementId,
        patch: AnnouncementPatch,
    ) -> Result<UpdateOutcome> {
        let Some(mut entry) = self.announcements.get_mut(id.as_str()) else {
            return Ok(UpdateOutcome::default());
        };

        let before = entry.announcement.clone();

        if let Some(message) = patch.message {
            entry.announcement.message = message;
        }

        if let Some(start_date) = patch.start_date {
            entry.announcement.start_date = start_date.map(IsoTimestamp::into_raw);
        }

        if let Some(expiration_date) = patch.expiration_date {
            entry.expires_at = expiration_date.instant();
            entry.announcement.expiration_date = expiration_date.into_raw();
        }

        let modified = u64::from(entry.announcement != before);
        Ok(UpdateOutcome {
            matched: 1,
            modified,
        })
    }

    async fn delete_announcement(&self, id: &AnnouncementId) -> Result<u64> {
        Ok(u64::from(self.announcements.remove(id.as_str()).is_some()))
    }
}
