//! Small helpers shared across crates

use rust_decimal::prelude::*;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert a stored f64 amount to Decimal for comparisons and display
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary value, defaulting to zero");
        Decimal::ZERO
    })
}

/// "R$ 15.90"
pub fn format_fee(fee: Decimal) -> String {
    format!(
        "R$ {:.2}",
        fee.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    )
}
