use serde::Deserialize;

// 新增教师请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub username: String,
    pub display_name: Option<String>,
}
