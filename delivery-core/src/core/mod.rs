//! 核心模块 - 配置与运行时状态
//!
//! - [`Config`] - 环境变量配置
//! - [`DeliveryState`] - 数据库 + 决策服务

pub mod config;
pub mod state;

pub use config::Config;
pub use state::DeliveryState;
