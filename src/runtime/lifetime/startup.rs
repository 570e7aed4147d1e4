use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use crate::utils::jwt::LtiTokenKeys;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub token_keys: LtiTokenKeys,
}

/// 输出数据库中的数据概况
async fn log_storage_summary(storage: &Arc<dyn Storage>) {
    let assignments = storage.count_assignments(None).await;
    let line_items = storage.count_line_items().await;

    match (assignments, line_items) {
        (Ok(assignments), Ok(line_items)) => {
            info!(
                "Storage contains {} assignment(s) and {} line item(s)",
                assignments, line_items
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to summarize storage contents: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和令牌密钥
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    log_storage_summary(&storage).await;

    let token_keys = LtiTokenKeys::from_config(&config.lti);
    info!(
        "LTI token verification enabled (leeway: {}s)",
        config.lti.token_leeway_seconds
    );

    Ok(StartupContext {
        storage,
        token_keys,
    })
}
