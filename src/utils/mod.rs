pub mod datetime;
pub mod parameter_error_handler;

pub use datetime::{IsoTimestamp, format_iso8601, parse_iso8601};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
