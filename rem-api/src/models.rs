//! Wire models for every REST area.
//!
//! All structs mirror the JSON payloads inside the response envelope.
//! Numeric fields the server sometimes leaves out are `Option`; display
//! formatting lives in `rem-data`, not here.

use serde::{Deserialize, Serialize};

// ───────────────────── Auth ─────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub vip_level: Option<i32>,
}

impl User {
    /// Name shown in the navbar: nickname first, username as fallback.
    pub fn display_name(&self) -> &str {
        match &self.nickname {
            Some(n) if !n.is_empty() => n,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsernameCheck {
    pub available: bool,
}

// ───────────────────── National ─────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CityBrief {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NationalOverview {
    pub national_avg_price: f64,
    #[serde(default)]
    pub highest_city: Option<CityBrief>,
    #[serde(default)]
    pub lowest_city: Option<CityBrief>,
    #[serde(default)]
    pub total_listings: u64,
    #[serde(default)]
    pub total_cities: u32,
}

/// One city row from `/national/city-prices`. Immutable snapshot per
/// fetch; the provincial rollup is derived client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPricePoint {
    pub province_name: String,
    pub city_name: String,
    pub city_avg_price: f64,
    #[serde(default)]
    pub listing_count: u64,
    #[serde(default)]
    pub price_change: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityPricesResponse {
    #[serde(default)]
    pub cities: Vec<CityPricePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvincesResponse {
    #[serde(default)]
    pub provinces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub city_name: String,
    #[serde(default)]
    pub province_name: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub change: Option<f64>,
}

/// Ranking payload, discriminated by the `type` field. The three kinds
/// share an entry schema but not display semantics; render code matches
/// exhaustively instead of probing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RankingResponse {
    Price { ranking: Vec<RankingEntry> },
    Change { ranking: Vec<RankingEntry> },
    RentRatio { ranking: Vec<RankingEntry> },
}

impl RankingResponse {
    pub fn entries(&self) -> &[RankingEntry] {
        match self {
            RankingResponse::Price { ranking }
            | RankingResponse::Change { ranking }
            | RankingResponse::RentRatio { ranking } => ranking,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CityPricePoint>,
}

/// Tag value marking the observed (non-predicted) trend line.
pub const TREND_REAL_TAG: &str = "exist";

/// One month on the price-trend axis. `predict` is `"exist"` (or absent)
/// for observed data; any other value names the prediction method that
/// produced the point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub avg_price: f64,
    #[serde(default)]
    pub predict: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendResponse {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
}

// ───────────────────── Metro (Beijing drill-down) ─────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MetroOverview {
    pub avg_price: f64,
    pub avg_total_price: f64,
    pub total_listings: u64,
    #[serde(default)]
    pub hot_districts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistrictRankingEntry {
    pub district: String,
    pub avg_price: f64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub change: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistrictRankingResponse {
    #[serde(default)]
    pub ranking: Vec<DistrictRankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistrictPrice {
    pub name: String,
    pub avg_price: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistrictPricesResponse {
    #[serde(default)]
    pub districts: Vec<DistrictPrice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FloorRow {
    pub category: String,
    pub avg_price: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FloorAnalysis {
    #[serde(default)]
    pub floor_analysis: Vec<FloorRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutRow {
    pub layout: String,
    pub avg_price: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutAnalysis {
    #[serde(default)]
    pub layout_analysis: Vec<LayoutRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrientationRow {
    pub orientation: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub avg_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrientationAnalysis {
    #[serde(default)]
    pub orientation_analysis: Vec<OrientationRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElevatorRow {
    pub has_elevator: bool,
    pub avg_price: f64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevatorAnalysis {
    #[serde(default)]
    pub elevator_analysis: Vec<ElevatorRow>,
}

/// One listing on the area/total-price scatter. District and layout may
/// be absent in scraped rows; grouping substitutes a literal label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub area: f64,
    pub total_price: f64,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScatterResponse {
    #[serde(default)]
    pub points: Vec<ScatterPoint>,
}

/// Five-number summary as it arrives: the analytics job serializes the
/// quantiles as strings now and then, so values stay loose until the
/// aggregation layer coerces them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBoxplotRow {
    pub district: String,
    pub min: serde_json::Value,
    pub q1: serde_json::Value,
    pub median: serde_json::Value,
    pub q3: serde_json::Value,
    pub max: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxplotResponse {
    #[serde(default)]
    pub boxplot: Vec<RawBoxplotRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct House {
    pub house_id: i64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub has_elevator: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub price_per_sqm: Option<f64>,
}

/// Replaced wholesale on every filter or page change; there is no
/// append/merge semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedHouseList {
    #[serde(default)]
    pub houses: Vec<House>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

// ───────────────────── AI ─────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_pref: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub total_matched: u64,
    #[serde(default)]
    pub recommendations: Vec<House>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValuationRequest {
    pub district: String,
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValuationResult {
    pub estimated_price: f64,
    #[serde(default)]
    pub estimated_total: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub analysis: Option<String>,
}

// ───────────────────── Account ─────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub price_alerts: bool,
    #[serde(default)]
    pub report_ready: bool,
    #[serde(default)]
    pub system_notices: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ───────────────────── Favorites ─────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteHouse {
    pub favorite_id: i64,
    pub house_id: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub favorited_at: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub price_per_sqm: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteCity {
    pub favorite_id: i64,
    pub city_name: String,
    #[serde(default)]
    pub province_name: Option<String>,
    #[serde(default)]
    pub city_avg_price: Option<f64>,
    #[serde(default)]
    pub favorited_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteReport {
    pub favorite_id: i64,
    pub report_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub favorited_at: Option<String>,
}

/// Favorite listings share one shape; the server names the array after
/// the record kind, so the field accepts any of those keys.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteList<T> {
    #[serde(
        default = "Vec::new",
        alias = "houses",
        alias = "cities",
        alias = "reports"
    )]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

// ───────────────────── Reports ─────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ReportType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateReportRequest {
    pub report_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreated {
    pub task_id: String,
}

/// Status values for async report tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportTask {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

// ───────────────────── System ─────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub announcement: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataUpdateTime {
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub build: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_response_is_discriminated_by_type() {
        let body = r#"{"type":"change","ranking":[{"city_name":"深圳","value":-1.2}]}"#;
        let parsed: RankingResponse = serde_json::from_str(body).unwrap();
        match &parsed {
            RankingResponse::Change { ranking } => {
                assert_eq!(ranking[0].city_name, "深圳");
                assert_eq!(ranking[0].value, -1.2);
                assert_eq!(ranking[0].change, None);
            }
            other => panic!("expected change ranking, got {other:?}"),
        }
    }

    #[test]
    fn trend_point_predict_tag_is_optional() {
        let body = r#"[{"year":2024,"month":3,"avg_price":21033},
                       {"year":2026,"month":1,"avg_price":22410,"predict":"arima"}]"#;
        let points: Vec<TrendPoint> = serde_json::from_str(body).unwrap();
        assert_eq!(points[0].predict, None);
        assert_eq!(points[1].predict.as_deref(), Some("arima"));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "zhang_wei".to_string(),
            nickname: Some(String::new()),
            vip_level: None,
        };
        assert_eq!(user.display_name(), "zhang_wei");
    }
}
