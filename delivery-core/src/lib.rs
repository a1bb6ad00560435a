//! Delivery Core - 商品页配送判定
//!
//! # 架构概述
//!
//! 给定商家、商品和顾客邮编 (CEP)，判定配送方式：
//!
//! - **商品限制** (`services::restriction`): 不配送 / 运费另议 / 加价
//! - **商家区域** (`services::vendor_zone`): 按运费升序匹配第一个区域
//! - **区域匹配** (`matching`): 精确邮编、邮编区间、IBGE 编码、城市
//! - **邮编查询** (`postal`): 本地表 + ViaCEP，进程内缓存
//!
//! 所有路径都返回一个有效的 [`DeliveryDecision`]，存储故障降级为通用提示。
//!
//! # 模块结构
//!
//! ```text
//! delivery-core/src/
//! ├── core/          # 配置、运行时状态
//! ├── db/            # SQLite 连接池、迁移、仓储
//! ├── matching/      # 区域规则与匹配
//! ├── postal/        # 邮编查询与缓存
//! ├── services/      # 限制、区域、决策服务
//! ├── store/         # 存储接口与适配器
//! └── utils/         # 日志、重试、校验
//! ```

pub mod core;
pub mod db;
pub mod matching;
pub mod postal;
pub mod services;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, DeliveryState};
pub use db::{DbService, SqliteStore};
pub use postal::{PostalCodeLookup, ViaCepClient};
pub use services::{
    DeliveryDecisionService, RestrictionOutcome, RestrictionResolver, VendorZoneResolver,
    ZoneSummary,
};
pub use shared::models::DeliveryDecision;
pub use store::{
    ChainedPostalStore, InMemoryStore, PostalCodeStore, ProductRestrictionStore, RetryingStore,
    VendorZoneStore,
};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode, RetryPolicy};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Degradation logging macro - 存储故障被吞掉并降级时记录，target 单独路由
#[macro_export]
macro_rules! degraded_log {
    ($event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "telemetry",
            event = $event,
            $($arg)*,
            "Degraded to fallback"
        );
    };
}
