/*!
 * LTI 工具令牌中间件
 *
 * 校验 `Authorization: Bearer <JWT>`，并检查令牌 `scope` 中是否包含所需的 LTI AGS 权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireLtiToken;
 *
 * web::resource("/line_items")
 *     .route(web::get().to(list_line_items).wrap(RequireLtiToken::read()))
 *     .route(web::post().to(create_line_item).wrap(RequireLtiToken::write()));
 * ```
 *
 * 处理程序中可通过 `RequireLtiToken::extract_client_id(&req)` 获取工具 client_id。
 *
 * ## 认证流程
 *
 * 1. 从 app_data 中取出 `web::Data<LtiTokenKeys>`
 * 2. 校验签名与过期时间
 * 3. 校验权限，成功后将 `LtiToolClaims` 写入请求扩展
 * 4. 任一步失败返回 401，响应体为 `{"errors":{"message":...}}`
 *
 * 中间件挂在具体方法的路由上，CORS 预检由外层 `Cors` 处理。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use crate::errors::{LtiServiceError, Result as LtiResult};
use crate::utils::jwt::{LINE_ITEM_READONLY_SCOPE, LINE_ITEM_SCOPE, LtiToolClaims, LtiTokenKeys};
use crate::utils::service_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireLtiToken {
    accepted_scopes: Vec<&'static str>,
}

impl RequireLtiToken {
    /// 令牌包含任一权限即可通过
    pub fn any_of(scopes: &[&'static str]) -> Self {
        Self {
            accepted_scopes: scopes.to_vec(),
        }
    }

    /// 读取成绩项
    pub fn read() -> Self {
        Self::any_of(&[LINE_ITEM_SCOPE, LINE_ITEM_READONLY_SCOPE])
    }

    /// 创建、修改、删除成绩项
    pub fn write() -> Self {
        Self::any_of(&[LINE_ITEM_SCOPE])
    }

    /// 从请求扩展中提取工具 client_id
    pub fn extract_client_id(req: &HttpRequest) -> Option<String> {
        req.extensions()
            .get::<LtiToolClaims>()
            .map(|claims| claims.sub.clone())
    }
}

// 提取并校验令牌
fn verify_request(
    req: &ServiceRequest,
    accepted_scopes: &[&'static str],
) -> LtiResult<LtiToolClaims> {
    let keys = req
        .app_data::<web::Data<LtiTokenKeys>>()
        .ok_or_else(|| LtiServiceError::configuration("LtiTokenKeys not found in app data"))?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            LtiServiceError::authentication("Missing or invalid Authorization header")
        })?;

    let claims = keys.verify_token(token).map_err(|err| {
        info!("LTI token validation failed: {}", err);
        LtiServiceError::authentication("Invalid access token")
    })?;

    if !claims.has_any_scope(accepted_scopes) {
        info!(
            "Access denied for tool {} (scope: {}). Accepted scopes: {:?}",
            claims.sub, claims.scope, accepted_scopes
        );
        return Err(LtiServiceError::authorization(
            "Insufficient scope for this request",
        ));
    }

    Ok(claims)
}

impl<S, B> Transform<S, ServiceRequest> for RequireLtiToken
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLtiTokenMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLtiTokenMiddleware {
            service: Rc::new(service),
            accepted_scopes: self.accepted_scopes.clone(),
        }))
    }
}

pub struct RequireLtiTokenMiddleware<S> {
    service: Rc<S>,
    accepted_scopes: Vec<&'static str>,
}

impl<S, B> Service<ServiceRequest> for RequireLtiTokenMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let accepted_scopes = self.accepted_scopes.clone();

        Box::pin(async move {
            match verify_request(&req, &accepted_scopes) {
                Ok(claims) => {
                    debug!("LTI token accepted for tool {}", claims.sub);
                    req.extensions_mut().insert(claims);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "LTI authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(service_error_response(&err).map_into_right_body()))
                }
            }
        })
    }
}
