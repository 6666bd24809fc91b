//! Ranking rows for display.
//!
//! The three ranking kinds share an entry schema but not semantics: unit
//! prices, month-over-month change percentages, and rent ratios format
//! and colorize differently. The match below is exhaustive on the tagged
//! response so a new kind cannot silently fall through to the wrong
//! formatting. Server order is preserved; the server already ranks.

use rem_api::models::{RankingEntry, RankingResponse};

use crate::format::{format_number, format_signed_percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    fn from_value(value: f64) -> Self {
        if value > 0.0 {
            Direction::Up
        } else if value < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    /// CSS class used by the ranking list styling.
    pub fn class(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Flat => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub rank: usize,
    pub city_name: String,
    pub province_name: Option<String>,
    pub value_display: String,
    pub change_display: Option<String>,
    pub direction: Direction,
}

fn price_row(rank: usize, entry: &RankingEntry) -> RankingRow {
    RankingRow {
        rank,
        city_name: entry.city_name.clone(),
        province_name: entry.province_name.clone(),
        value_display: format!("{} 元/㎡", format_number(entry.value)),
        change_display: entry.change.map(format_signed_percent),
        direction: entry.change.map(Direction::from_value).unwrap_or(Direction::Flat),
    }
}

fn change_row(rank: usize, entry: &RankingEntry) -> RankingRow {
    RankingRow {
        rank,
        city_name: entry.city_name.clone(),
        province_name: entry.province_name.clone(),
        // The ranked value IS the change; direction follows it.
        value_display: format_signed_percent(entry.value),
        change_display: None,
        direction: Direction::from_value(entry.value),
    }
}

fn rent_ratio_row(rank: usize, entry: &RankingEntry) -> RankingRow {
    RankingRow {
        rank,
        city_name: entry.city_name.clone(),
        province_name: entry.province_name.clone(),
        value_display: format!("{}", entry.value),
        change_display: None,
        direction: Direction::Flat,
    }
}

/// Display rows in server order, formatted per ranking kind.
pub fn rows(response: &RankingResponse) -> Vec<RankingRow> {
    let build: fn(usize, &RankingEntry) -> RankingRow = match response {
        RankingResponse::Price { .. } => price_row,
        RankingResponse::Change { .. } => change_row,
        RankingResponse::RentRatio { .. } => rent_ratio_row,
    };
    response
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| build(i + 1, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(city: &str, value: f64, change: Option<f64>) -> RankingEntry {
        RankingEntry {
            city_name: city.to_string(),
            province_name: None,
            value,
            change,
        }
    }

    #[test]
    fn price_ranking_preserves_server_order_and_tags_direction() {
        let response = RankingResponse::Price {
            ranking: vec![
                entry("A", 1_000.0, Some(2.0)),
                entry("B", 2_000.0, Some(-1.0)),
                entry("C", 1_500.0, Some(0.0)),
            ],
        };
        let rows = rows(&response);

        assert_eq!(rows[0].city_name, "A");
        assert_eq!(rows[0].value_display, "1,000 元/㎡");
        assert_eq!(rows[0].direction, Direction::Up);

        assert_eq!(rows[1].city_name, "B");
        assert_eq!(rows[1].value_display, "2,000 元/㎡");
        assert_eq!(rows[1].direction, Direction::Down);

        assert_eq!(rows[2].city_name, "C");
        assert_eq!(rows[2].value_display, "1,500 元/㎡");
        assert_eq!(rows[2].direction, Direction::Flat);
    }

    #[test]
    fn change_ranking_derives_direction_from_the_value_itself() {
        let response = RankingResponse::Change {
            ranking: vec![entry("涨", 3.2, None), entry("跌", -0.8, None)],
        };
        let rows = rows(&response);
        assert_eq!(rows[0].value_display, "+3.2%");
        assert_eq!(rows[0].direction, Direction::Up);
        assert_eq!(rows[1].value_display, "-0.8%");
        assert_eq!(rows[1].direction, Direction::Down);
    }

    #[test]
    fn rent_ratio_is_neutral_plain_value() {
        let response = RankingResponse::RentRatio {
            ranking: vec![entry("X", 612.0, Some(1.0))],
        };
        let rows = rows(&response);
        assert_eq!(rows[0].value_display, "612");
        assert_eq!(rows[0].direction, Direction::Flat);
        assert_eq!(rows[0].change_display, None);
    }

    #[test]
    fn ranks_start_at_one() {
        let response = RankingResponse::Price {
            ranking: vec![entry("A", 1.0, None), entry("B", 2.0, None)],
        };
        let rows = rows(&response);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
    }
}
