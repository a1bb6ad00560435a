use crate::utils::retry::RetryPolicy;
use std::time::Duration;

/// 配送服务配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | delivery.db | SQLite 数据库文件 |
/// | POSTAL_LOOKUP_URL | (未设置) | ViaCEP 兼容的地址查询服务 |
/// | STORE_TIMEOUT_MS | 8000 | 单次外部调用超时(毫秒) |
/// | STORE_MAX_ATTEMPTS | 2 | 单次外部调用最大尝试次数 |
/// | STORE_RETRY_BACKOFF_MS | 1500 | 线性退避单位(毫秒) |
/// | POSTAL_CACHE_CAPACITY | 10000 | 邮编缓存上限 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/delivery.db STORE_TIMEOUT_MS=5000 delivery-core 12 345 01310-100
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 数据库路径 (配送区域、商品限制、邮编表)
    pub database_path: String,
    /// 邮编查询服务地址，未设置时只查本地表
    pub postal_lookup_url: Option<String>,
    /// 单次外部调用超时 (毫秒)
    pub store_timeout_ms: u64,
    /// 单次外部调用最大尝试次数
    pub store_max_attempts: u32,
    /// 重试线性退避单位 (毫秒)
    pub store_retry_backoff_ms: u64,
    /// 邮编缓存上限
    pub postal_cache_capacity: usize,
    /// 日志级别
    pub log_level: String,
    /// JSON 格式日志
    pub log_json: bool,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "delivery.db".into()),
            postal_lookup_url: std::env::var("POSTAL_LOOKUP_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            store_timeout_ms: std::env::var("STORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            store_max_attempts: std::env::var("STORE_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            store_retry_backoff_ms: std::env::var("STORE_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1500),
            postal_cache_capacity: std::env::var("POSTAL_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义数据库路径
    ///
    /// 常用于测试场景
    pub fn with_database(database_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.postal_lookup_url = None;
        config
    }

    /// 外部调用的重试策略
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.store_timeout_ms),
            self.store_max_attempts.max(1),
            Duration::from_millis(self.store_retry_backoff_ms),
        )
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_from_config() {
        let mut config = Config::with_database(":memory:");
        config.store_timeout_ms = 5000;
        config.store_max_attempts = 0;
        config.store_retry_backoff_ms = 1000;

        let policy = config.retry_policy();
        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.backoff, Duration::from_secs(1));
    }

    #[test]
    fn test_with_database_disables_remote_lookup() {
        let config = Config::with_database("/tmp/x.db");
        assert_eq!(config.database_path, "/tmp/x.db");
        assert!(config.postal_lookup_url.is_none());
    }
}
