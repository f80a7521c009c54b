//! 路线指标及其换算
//!
//! 距离：米 → 公里（保留 2 位小数）
//! 时长：`"5400s"` → `"1h 30min"`

use serde::Serialize;
use std::num::ParseIntError;

/// 没有收费信息时使用的货币代码
pub const NO_CURRENCY: &str = "N/A";

/// 路线指标，只在路线阶段成功时存在
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration: String,
    pub toll_cost: f64,
    pub toll_currency: String,
}

/// 米转公里，四舍五入到 2 位小数
pub fn meters_to_km(meters: u64) -> f64 {
    // 先换算成 "厘公里" 再取整，避免 12.345 这类值的二进制误差
    (meters as f64 / 10.0).round() / 100.0
}

/// 将 `"<整数秒>s"` 格式化为 `"Hh Mmin"`，缺失或为空时为 `"0h 0min"`
pub fn format_duration(raw: Option<&str>) -> Result<String, ParseIntError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok("0h 0min".to_string()),
        Some(raw) => raw,
    };
    let seconds: u64 = raw.strip_suffix('s').unwrap_or(raw).parse()?;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    Ok(format!("{}h {}min", hours, minutes))
}
