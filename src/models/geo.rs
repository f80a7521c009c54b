use serde::Serialize;
use std::fmt::Display;

/// 经纬度坐标
///
/// 不做范围校验，0.0 也是合法坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat={}, Lng={}", self.lat, self.lng)
    }
}

/// 由地区代码解析出的地名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub name: String,
    /// 上级行政区代码（州的缩写，如 "MA"）
    pub state: String,
}

impl ResolvedAddress {
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
        }
    }

    /// 地理编码查询串：`"Name, UF, Country"`
    pub fn geocode_query(&self, country: &str) -> String {
        if country.is_empty() {
            self.to_string()
        } else {
            format!("{}, {}", self, country)
        }
    }
}

impl Display for ResolvedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.state)
    }
}
