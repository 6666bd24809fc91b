//! Scripted transport and canned fixtures for tests.
//!
//! The production dashboard shipped with a parallel mock-data table it fell
//! back to during backend outages; here that table survives as fixture
//! constructors so gateway and aggregation tests share one realistic
//! dataset instead of inventing rows inline.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::models::{CityPricePoint, RankingEntry, ScatterPoint, TrendPoint};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// FIFO-scripted transport: each `push_*` enqueues one response, each
/// `send` dequeues one. Requests are recorded for assertions.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a well-formed envelope response.
    pub fn push_envelope(&self, code: i64, message: &str, data: Value) {
        let body = json!({"code": code, "message": message, "data": data}).to_string();
        self.push_body(&body);
    }

    /// Enqueue a raw body (for malformed-payload cases).
    pub fn push_body(&self, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        }));
    }

    /// Enqueue a transport-level failure.
    pub fn push_error(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

/// Canned datasets in the shape the real endpoints return.
pub mod fixtures {
    use super::*;

    pub fn city_prices() -> Vec<CityPricePoint> {
        [
            ("北京市", "北京", 58234.0, 12453, Some(0.8)),
            ("上海市", "上海", 54120.0, 11820, Some(-0.3)),
            ("广东省", "深圳", 51890.0, 9932, Some(1.2)),
            ("广东省", "广州", 31210.0, 8845, Some(0.1)),
            ("广东省", "东莞", 19870.0, 5210, None),
            ("浙江省", "杭州", 29350.0, 7634, Some(0.5)),
            ("浙江省", "宁波", 21460.0, 4120, None),
            ("四川省", "成都", 16890.0, 9021, Some(0.2)),
        ]
        .into_iter()
        .map(
            |(province, city, price, listings, change)| CityPricePoint {
                province_name: province.to_string(),
                city_name: city.to_string(),
                city_avg_price: price,
                listing_count: listings,
                price_change: change,
            },
        )
        .collect()
    }

    pub fn price_ranking() -> Vec<RankingEntry> {
        city_prices()
            .into_iter()
            .map(|c| RankingEntry {
                city_name: c.city_name,
                province_name: Some(c.province_name),
                value: c.city_avg_price,
                change: c.price_change,
            })
            .collect()
    }

    pub fn trend_points() -> Vec<TrendPoint> {
        let mut points: Vec<TrendPoint> = (1..=12)
            .map(|month| TrendPoint {
                year: 2024,
                month,
                avg_price: 21000.0 + f64::from(month) * 120.0,
                predict: Some("exist".to_string()),
            })
            .collect();
        points.extend((1..=6).map(|month| TrendPoint {
            year: 2026,
            month,
            avg_price: 23500.0 + f64::from(month) * 90.0,
            predict: Some("arima".to_string()),
        }));
        points
    }

    pub fn scatter_points() -> Vec<ScatterPoint> {
        [
            (89.5, 620.0, Some("朝阳")),
            (61.2, 410.0, Some("海淀")),
            (120.8, 980.0, Some("西城")),
            (75.0, 350.0, Some("通州")),
            (88.0, 540.0, None),
        ]
        .into_iter()
        .map(|(area, total, district)| ScatterPoint {
            area,
            total_price: total,
            district: district.map(str::to_string),
            layout: None,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_provinces_span_single_and_multi_city_cases() {
        let cities = fixtures::city_prices();
        let guangdong = cities
            .iter()
            .filter(|c| c.province_name == "广东省")
            .count();
        assert_eq!(guangdong, 3, "fixtures should keep a multi-city province");
        assert!(cities.iter().any(|c| c.province_name == "北京市"));
    }
}
