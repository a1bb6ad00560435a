//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`retry::with_retry`] - 外部调用的超时与有限重试
//! - 日志、输入校验

pub mod logger;
pub mod retry;
pub mod validation;

pub use retry::{RetryPolicy, with_retry};
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
