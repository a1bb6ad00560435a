//! 运行时状态 - 数据库、存储适配器与决策服务的组装

use super::Config;
use crate::db::{DbService, SqliteStore};
use crate::postal::{PostalCodeLookup, ViaCepClient};
use crate::services::DeliveryDecisionService;
use crate::store::{ChainedPostalStore, PostalCodeStore, RetryingStore};
use shared::error::AppResult;
use std::sync::Arc;

/// Wired-up delivery resolution
///
/// # 示例
///
/// ```ignore
/// let config = Config::from_env();
/// let state = DeliveryState::initialize(&config).await?;
/// let decision = state.service.decide(1, 10, Some("01310-100")).await;
/// ```
#[derive(Clone)]
pub struct DeliveryState {
    /// 配置
    pub config: Config,
    /// SQLite 连接池
    pub db: DbService,
    /// 决策服务 (Arc 共享所有权)
    pub service: Arc<DeliveryDecisionService>,
}

impl std::fmt::Debug for DeliveryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryState")
            .field("config", &self.config)
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl DeliveryState {
    /// 初始化
    ///
    /// 按顺序初始化：
    /// 1. 数据库 (config.database_path，自动迁移)
    /// 2. 存储适配器 (超时 + 有限重试)
    /// 3. 邮编查询：本地表优先，配置了 POSTAL_LOOKUP_URL 时回落到 HTTP
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config, db))
    }

    /// 使用已打开的数据库组装 (测试使用内存库)
    pub fn with_db(config: &Config, db: DbService) -> Self {
        let policy = config.retry_policy();
        let store = Arc::new(RetryingStore::new(db.store(), policy));

        let postal: Arc<dyn PostalCodeStore> = match &config.postal_lookup_url {
            Some(url) => {
                tracing::info!(url = %url, "HTTP postal code fallback enabled");
                let remote = RetryingStore::new(ViaCepClient::new(url.as_str()), policy);
                Arc::new(
                    ChainedPostalStore::new()
                        .then(store.clone())
                        .then(Arc::new(remote)),
                )
            }
            None => store.clone(),
        };

        let lookup = Arc::new(PostalCodeLookup::with_capacity(
            postal,
            config.postal_cache_capacity,
        ));
        let service = DeliveryDecisionService::with_lookup(store.clone(), store, lookup);

        Self {
            config: config.clone(),
            db,
            service: Arc::new(service),
        }
    }

    pub fn sqlite_store(&self) -> SqliteStore {
        self.db.store()
    }
}
