use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 教师目录条目，用户名即标识
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
