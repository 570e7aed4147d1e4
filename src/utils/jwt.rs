//! LTI 工具访问令牌
//!
//! 工具以 `Authorization: Bearer <JWT>` 访问成绩项接口，令牌使用 HS256 签名，
//! `scope` 声明为空格分隔的 LTI AGS 权限列表。

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::LtiConfig;

/// 读写成绩项的权限
pub const LINE_ITEM_SCOPE: &str = "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem";
/// 只读成绩项的权限
pub const LINE_ITEM_READONLY_SCOPE: &str =
    "https://purl.imsglobal.org/spec/lti-ags/scope/lineitem.readonly";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtiToolClaims {
    pub sub: String,   // 工具 client_id
    pub scope: String, // 空格分隔的权限
    pub exp: usize,    // Expiration time (时间戳)
    pub iat: usize,    // Issued at (签发时间)
}

impl LtiToolClaims {
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }

    /// 是否具有任一权限
    pub fn has_any_scope(&self, required: &[&str]) -> bool {
        self.scopes().any(|s| required.contains(&s))
    }
}

/// 令牌签发与校验
#[derive(Clone)]
pub struct LtiTokenKeys {
    secret: String,
    leeway_seconds: u64,
}

impl LtiTokenKeys {
    pub fn new(secret: impl Into<String>, leeway_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            leeway_seconds,
        }
    }

    pub fn from_config(config: &LtiConfig) -> Self {
        Self::new(config.token_secret.clone(), config.token_leeway_seconds)
    }

    // 签发令牌
    pub fn issue_token(
        &self,
        client_id: &str,
        scopes: &[&str],
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = LtiToolClaims {
            sub: client_id.to_string(),
            scope: scopes.join(" "),
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
    }

    // 验证令牌
    pub fn verify_token(&self, token: &str) -> Result<LtiToolClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_seconds;

        decode::<LtiToolClaims>(token, &decoding_key, &validation).map(|data| data.claims)
    }
}
