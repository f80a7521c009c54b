//! 路线估算服务 - 业务能力层
//!
//! `POST {url}`，通过字段掩码只请求距离、时长和收费信息。
//! 出行方式固定为 DRIVE，路由偏好 TRAFFIC_UNAWARE，并额外请求 TOLLS 计算。

use crate::error::StageError;
use crate::models::route::NO_CURRENCY;
use crate::models::{format_duration, meters_to_km, Coordinate, RouteMetrics};
use crate::services::fetch_text;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tracing::{debug, warn};

const ENDPOINT: &str = "routes";

/// 响应字段掩码
pub const FIELD_MASK: &str = "routes.distanceMeters,routes.duration,routes.travelAdvisory.tollInfo";

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    /// 只使用第一条路线
    #[serde(default)]
    routes: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Route {
    distance_meters: Option<u64>,
    duration: Option<String>,
    travel_advisory: Option<TravelAdvisory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TravelAdvisory {
    toll_info: Option<TollInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TollInfo {
    estimated_price: Option<Vec<Money>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Money {
    currency_code: Option<String>,
    /// 字符串形式的 int64，也兼容数字
    units: Option<JsonValue>,
    nanos: Option<i64>,
}

impl Money {
    fn amount(&self) -> Option<f64> {
        let units = match &self.units {
            None => 0.0,
            Some(JsonValue::String(units)) => units.trim().parse::<f64>().ok()?,
            Some(JsonValue::Number(units)) => units.as_f64()?,
            Some(_) => return None,
        };
        Some(units + self.nanos.unwrap_or(0) as f64 / 1e9)
    }
}

/// 路线估算服务
pub struct RouteEstimator {
    url: String,
    api_key: String,
    timeout: Duration,
}

impl RouteEstimator {
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// 计算起点到终点的路线指标
    ///
    /// # 返回
    /// - `Err(Connection)`：请求失败
    /// - `Err(NoRoute)`：没有路线候选，或收费/时长结构不完整
    pub async fn estimate(
        &self,
        client: &Client,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteMetrics, StageError> {
        debug!("计算路线: {} → {}", origin, destination);

        let request = client
            .post(&self.url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request_body(origin, destination))
            .timeout(self.timeout);

        let body = fetch_text(request, ENDPOINT).await.map_err(|e| {
            warn!("路线服务连接错误 ({}): {}", destination, e);
            e
        })?;

        parse_routes(&body)
    }
}

fn request_body(origin: Coordinate, destination: Coordinate) -> JsonValue {
    json!({
        "origin": { "location": { "latLng": { "latitude": origin.lat, "longitude": origin.lng } } },
        "destination": { "location": { "latLng": { "latitude": destination.lat, "longitude": destination.lng } } },
        "travelMode": "DRIVE",
        "routingPreference": "TRAFFIC_UNAWARE",
        "extraComputations": ["TOLLS"]
    })
}

fn parse_routes(body: &str) -> Result<RouteMetrics, StageError> {
    let response: RoutesResponse = serde_json::from_str(body)
        .map_err(|e| StageError::NoRoute(format!("无法解析路线响应: {}", e)))?;

    let first = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| StageError::NoRoute("响应中没有路线".to_string()))?;
    let route: Route = serde_json::from_value(first)
        .map_err(|e| StageError::NoRoute(format!("路线结构无效: {}", e)))?;

    let duration = format_duration(route.duration.as_deref())
        .map_err(|e| StageError::NoRoute(format!("时长格式无效 {:?}: {}", route.duration, e)))?;

    let price = route
        .travel_advisory
        .and_then(|advisory| advisory.toll_info)
        .and_then(|toll| toll.estimated_price);

    let (toll_cost, toll_currency) = match price {
        None => (0.0, NO_CURRENCY.to_string()),
        Some(prices) => {
            let first = prices
                .first()
                .ok_or_else(|| StageError::NoRoute("收费价格列表为空".to_string()))?;
            let amount = first
                .amount()
                .ok_or_else(|| StageError::NoRoute(format!("收费金额无效: {:?}", first.units)))?;
            let currency = first
                .currency_code
                .clone()
                .unwrap_or_else(|| NO_CURRENCY.to_string());
            (amount, currency)
        }
    };

    Ok(RouteMetrics {
        distance_km: meters_to_km(route.distance_meters.unwrap_or(0)),
        duration,
        toll_cost,
        toll_currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = request_body(Coordinate::new(-4.9, -47.5), Coordinate::new(-5.5, -47.4));
        assert_eq!(body["travelMode"], "DRIVE");
        assert_eq!(body["routingPreference"], "TRAFFIC_UNAWARE");
        assert_eq!(body["extraComputations"], json!(["TOLLS"]));
        assert_eq!(body["origin"]["location"]["latLng"]["latitude"], -4.9);
        assert_eq!(body["destination"]["location"]["latLng"]["longitude"], -47.4);
    }

    #[test]
    fn test_parse_full_route() {
        let body = r#"{
            "routes": [{
                "distanceMeters": 12345,
                "duration": "5400s",
                "travelAdvisory": {
                    "tollInfo": {
                        "estimatedPrice": [{ "currencyCode": "BRL", "units": "12", "nanos": 500000000 }]
                    }
                }
            }]
        }"#;

        let metrics = parse_routes(body).unwrap();
        assert_eq!(metrics.distance_km, 12.35);
        assert_eq!(metrics.duration, "1h 30min");
        assert_eq!(metrics.toll_cost, 12.5);
        assert_eq!(metrics.toll_currency, "BRL");
    }

    #[test]
    fn test_parse_route_without_tolls() {
        let body = r#"{"routes": [{"distanceMeters": 68400, "duration": "3720s"}]}"#;

        let metrics = parse_routes(body).unwrap();
        assert_eq!(metrics.distance_km, 68.4);
        assert_eq!(metrics.duration, "1h 2min");
        assert_eq!(metrics.toll_cost, 0.0);
        assert_eq!(metrics.toll_currency, "N/A");
    }

    #[test]
    fn test_parse_route_missing_duration_and_distance() {
        let metrics = parse_routes(r#"{"routes": [{}]}"#).unwrap();
        assert_eq!(metrics.distance_km, 0.0);
        assert_eq!(metrics.duration, "0h 0min");
    }

    #[test]
    fn test_malformed_alternative_route_ignored() {
        let body = r#"{
            "routes": [
                { "distanceMeters": 68400, "duration": "3720s" },
                { "distanceMeters": "far", "travelAdvisory": [] }
            ]
        }"#;

        let metrics = parse_routes(body).unwrap();
        assert_eq!(metrics.distance_km, 68.4);
        assert_eq!(metrics.duration, "1h 2min");
    }

    #[test]
    fn test_no_routes() {
        assert!(matches!(parse_routes("{}"), Err(StageError::NoRoute(_))));
        assert!(matches!(
            parse_routes(r#"{"routes": []}"#),
            Err(StageError::NoRoute(_))
        ));
    }

    #[test]
    fn test_malformed_substructures() {
        let empty_price = r#"{"routes": [{"travelAdvisory": {"tollInfo": {"estimatedPrice": []}}}]}"#;
        assert!(matches!(parse_routes(empty_price), Err(StageError::NoRoute(_))));

        let bad_units = r#"{"routes": [{"travelAdvisory": {"tollInfo": {"estimatedPrice": [{"units": "abc"}]}}}]}"#;
        assert!(matches!(parse_routes(bad_units), Err(StageError::NoRoute(_))));

        let bad_duration = r#"{"routes": [{"duration": "soon"}]}"#;
        assert!(matches!(parse_routes(bad_duration), Err(StageError::NoRoute(_))));
    }
}
