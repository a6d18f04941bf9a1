pub mod common {
    pub mod error_code;
    pub mod response;

    pub use error_code::ErrorCode;
    pub use response::ApiResponse;
}

pub mod announcements {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod teachers {
    pub mod entities;
    pub mod requests;
}

pub use common::{ApiResponse, ErrorCode};
