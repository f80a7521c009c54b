//! 地理编码服务 - 业务能力层
//!
//! `GET {url}?address=..&key=..`，取第一个候选的 `geometry.location`

use crate::error::StageError;
use crate::models::Coordinate;
use crate::services::fetch_text;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

const ENDPOINT: &str = "geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    /// 只解码第一个候选，其余候选的结构不影响结果
    #[serde(default)]
    results: Vec<JsonValue>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// 地理编码服务
pub struct Geocoder {
    url: String,
    api_key: String,
    timeout: Duration,
}

impl Geocoder {
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// 将自由文本地址解析为坐标
    ///
    /// 候选列表为空时返回 `NotFound`，请求失败时返回 `Connection`
    pub async fn locate(&self, client: &Client, address: &str) -> Result<Coordinate, StageError> {
        debug!("地理编码: {}", address);

        let request = client
            .get(&self.url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .timeout(self.timeout);

        let body = fetch_text(request, ENDPOINT).await.map_err(|e| {
            warn!("地理编码服务连接错误 ({}): {}", address, e);
            e
        })?;

        parse_geocode(&body, address)
    }
}

fn parse_geocode(body: &str, address: &str) -> Result<Coordinate, StageError> {
    let response: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| StageError::NotFound(format!("无法解析地理编码响应 ({}): {}", address, e)))?;

    match response.results.into_iter().next() {
        Some(first) => {
            let candidate: GeocodeCandidate = serde_json::from_value(first).map_err(|e| {
                StageError::NotFound(format!("地理编码候选无效 ({}): {}", address, e))
            })?;
            Ok(Coordinate::new(
                candidate.geometry.location.lat,
                candidate.geometry.location.lng,
            ))
        }
        None => {
            debug!(
                "地理编码无结果 ({}): status={:?}, message={:?}",
                address, response.status, response.error_message
            );
            Err(StageError::NotFound(format!(
                "地址 {} ({})",
                address,
                response.status.as_deref().unwrap_or("ZERO_RESULTS")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_candidate() {
        let body = r#"{
            "results": [
                { "geometry": { "location": { "lat": -4.9477, "lng": -47.5004 } } },
                { "geometry": { "location": { "lat": 1.0, "lng": 2.0 } } }
            ],
            "status": "OK"
        }"#;

        let coord = parse_geocode(body, "Açailândia, MA, Brazil").unwrap();
        assert_eq!(coord, Coordinate::new(-4.9477, -47.5004));
    }

    #[test]
    fn test_malformed_later_candidate_ignored() {
        let body = r#"{
            "results": [
                { "geometry": { "location": { "lat": -5.5, "lng": -47.4 } } },
                { "geometry": { "bounds": {} } }
            ],
            "status": "OK"
        }"#;

        let coord = parse_geocode(body, "Imperatriz, MA, Brazil").unwrap();
        assert_eq!(coord, Coordinate::new(-5.5, -47.4));
    }

    #[test]
    fn test_malformed_first_candidate() {
        let body = r#"{"results": [{ "geometry": { "bounds": {} } }]}"#;
        assert!(matches!(
            parse_geocode(body, "Nowhere"),
            Err(StageError::NotFound(_))
        ));
    }

    #[test]
    fn test_zero_coordinate_is_valid() {
        let body = r#"{"results": [{"geometry": {"location": {"lat": 0.0, "lng": -47.5}}}]}"#;
        let coord = parse_geocode(body, "Equator").unwrap();
        assert_eq!(coord.lat, 0.0);
    }

    #[test]
    fn test_empty_results() {
        let body = r#"{"results": [], "status": "REQUEST_DENIED", "error_message": "bad key"}"#;
        let err = parse_geocode(body, "Nowhere").unwrap_err();
        assert!(matches!(err, StageError::NotFound(msg) if msg.contains("REQUEST_DENIED")));
    }

    #[test]
    fn test_unparseable_body() {
        assert!(matches!(
            parse_geocode("not json", "Nowhere"),
            Err(StageError::NotFound(_))
        ));
    }
}
