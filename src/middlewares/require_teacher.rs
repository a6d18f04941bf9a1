/*!
 * 教师身份校验中间件
 *
 * 从查询参数 `teacher_username` 读取教师用户名，并在教师目录中确认其存在。
 * 校验通过后将 [`AuthenticatedTeacher`] 写入请求扩展，供后续处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireTeacher;
 *
 * web::resource("/announcements")
 *     .route(web::post().to(create_announcement).wrap(RequireTeacher));
 * ```
 *
 * 在处理程序中提取教师用户名：
 *
 * ```rust,ignore
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let username = RequireTeacher::extract_teacher_username(&req);
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 缺少 `teacher_username` 或其为空：返回 401 "Authentication required for this action"
 * 2. 教师目录中查无此人：返回 401 "Invalid teacher credentials"
 * 3. 教师目录查询失败：返回 500
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, warn};

use crate::errors::{BulletinError, Result};
use crate::models::ErrorCode;
use crate::models::announcements::requests::TeacherCredentialQuery;
use crate::storage::Storage;

use super::create_error_response;

pub const MISSING_CREDENTIALS: &str = "Authentication required for this action";
pub const INVALID_CREDENTIALS: &str = "Invalid teacher credentials";

/// 已通过校验的教师用户名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedTeacher(pub String);

/// 校验教师凭据，成功时返回教师用户名
pub async fn authenticate_teacher(
    storage: &dyn Storage,
    teacher_username: Option<&str>,
) -> Result<String> {
    let username = match teacher_username {
        Some(username) if !username.is_empty() => username,
        _ => return Err(BulletinError::authentication(MISSING_CREDENTIALS)),
    };

    if storage.teacher_exists(username).await? {
        Ok(username.to_string())
    } else {
        Err(BulletinError::authentication(INVALID_CREDENTIALS))
    }
}

#[derive(Clone)]
pub struct RequireTeacher;

impl<S, B> Transform<S, ServiceRequest> for RequireTeacher
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireTeacherMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireTeacherMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireTeacherMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireTeacherMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            let storage = match req.app_data::<web::Data<Arc<dyn Storage>>>() {
                Some(data) => data.get_ref().clone(),
                None => {
                    error!("Storage not found in app data");
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Storage not configured",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 查询参数无法解析时按缺少凭据处理
            let query = web::Query::<TeacherCredentialQuery>::from_query(req.query_string())
                .map(|q| q.into_inner())
                .unwrap_or_default();

            match authenticate_teacher(storage.as_ref(), query.teacher_username.as_deref()).await {
                Ok(username) => {
                    debug!("Teacher authentication successful for {}", username);
                    req.extensions_mut().insert(AuthenticatedTeacher(username));
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(BulletinError::Authentication(message)) => {
                    warn!(
                        "Teacher authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &message,
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(err) => {
                    error!("Teacher directory lookup failed: {}", err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            &format!("Failed to verify teacher credentials: {}", err.message()),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取教师信息
impl RequireTeacher {
    /// 从请求扩展中提取教师用户名
    /// 此函数应该在应用了RequireTeacher中间件的路由处理程序中使用
    pub fn extract_teacher_username(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions()
            .get::<AuthenticatedTeacher>()
            .map(|teacher| teacher.0.clone())
    }
}
