pub mod announcements;

pub use announcements::AnnouncementService;
