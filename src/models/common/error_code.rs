/// 业务错误码，写入 `ApiResponse.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    InternalServerError = 1002,

    // 公告相关错误 3xxx
    AnnouncementNotFound = 3000,
    AnnouncementInvalidDate = 3001,
    AnnouncementUpdateFailed = 3002,
}
