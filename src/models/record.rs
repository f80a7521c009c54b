//! 单个条目的处理结果
//!
//! 每个输入恰好产生一条 `RouteRecord`，创建后不可修改

use crate::models::{Coordinate, ResolvedAddress, RouteMetrics};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// 处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Status {
    Success,
    /// 输入不是恰好两段
    InvalidFormat,
    /// 地区服务有响应但没有地名
    RegionNotFound,
    /// 地区服务请求失败
    RegionLookupError,
    /// 目的地无法地理编码
    GeocodeError,
    /// 路线服务请求失败
    RouteLookupError,
    /// 路线服务没有返回路线
    NoRouteFound,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Success,
        Status::InvalidFormat,
        Status::RegionNotFound,
        Status::RegionLookupError,
        Status::GeocodeError,
        Status::RouteLookupError,
        Status::NoRouteFound,
    ];

    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "成功",
            Status::InvalidFormat => "输入格式无效",
            Status::RegionNotFound => "地区代码未找到",
            Status::RegionLookupError => "地区服务错误",
            Status::GeocodeError => "地理编码失败",
            Status::RouteLookupError => "路线服务错误",
            Status::NoRouteFound => "没有可用路线",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 处理结果记录
///
/// 可选字段按到达的阶段依次填充
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    input: String,
    status: Status,
    #[serde(serialize_with = "serialize_address")]
    resolved_address: Option<ResolvedAddress>,
    destination: Option<Coordinate>,
    #[serde(flatten)]
    metrics: Option<RouteMetrics>,
}

impl RouteRecord {
    /// 失败记录，携带失败前已取得的部分字段
    pub fn failed(
        input: String,
        status: Status,
        resolved_address: Option<ResolvedAddress>,
        destination: Option<Coordinate>,
    ) -> Self {
        Self {
            input,
            status,
            resolved_address,
            destination,
            metrics: None,
        }
    }

    pub fn success(
        input: String,
        resolved_address: ResolvedAddress,
        destination: Coordinate,
        metrics: RouteMetrics,
    ) -> Self {
        Self {
            input,
            status: Status::Success,
            resolved_address: Some(resolved_address),
            destination: Some(destination),
            metrics: Some(metrics),
        }
    }

    /// 原始输入文本
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn resolved_address(&self) -> Option<&ResolvedAddress> {
        self.resolved_address.as_ref()
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn metrics(&self) -> Option<&RouteMetrics> {
        self.metrics.as_ref()
    }
}

fn serialize_address<S: Serializer>(
    address: &Option<ResolvedAddress>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => serializer.collect_str(address),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_record_json() {
        let record = RouteRecord::success(
            "MUN 2105302".to_string(),
            ResolvedAddress::new("Imperatriz", "MA"),
            Coordinate::new(-5.52, -47.47),
            RouteMetrics {
                distance_km: 68.4,
                duration: "1h 2min".to_string(),
                toll_cost: 0.0,
                toll_currency: "N/A".to_string(),
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "input": "MUN 2105302",
                "status": "Success",
                "resolved_address": "Imperatriz, MA",
                "destination": { "lat": -5.52, "lng": -47.47 },
                "distance_km": 68.4,
                "duration": "1h 2min",
                "toll_cost": 0.0,
                "toll_currency": "N/A"
            })
        );
    }

    #[test]
    fn test_failed_record_keeps_partial_fields() {
        let record = RouteRecord::failed(
            "MUN 2105302".to_string(),
            Status::NoRouteFound,
            Some(ResolvedAddress::new("Imperatriz", "MA")),
            None,
        );

        assert!(!record.status().is_success());
        assert!(record.metrics().is_none());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "NoRouteFound");
        assert_eq!(value["resolved_address"], "Imperatriz, MA");
        assert!(value["destination"].is_null());
        assert!(value.get("distance_km").is_none());
    }
}
