//! 预导入模块，方便使用

pub use super::announcements::{
    ActiveModel as AnnouncementActiveModel, Entity as Announcements, Model as AnnouncementModel,
};
pub use super::teachers::{ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel};
