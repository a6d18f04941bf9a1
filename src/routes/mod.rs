pub mod announcements;

pub use announcements::configure_announcements_routes;
