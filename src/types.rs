//! Core domain types for market snapshots, earnings and portfolio holdings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    /// Label for a 0-100 sentiment score.
    pub fn from_score(score: f64) -> Self {
        if score > 60.0 {
            Sentiment::Bullish
        } else if score < 40.0 {
            Sentiment::Bearish
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NewsTone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReport {
    pub symbol: String,
    pub company: String,
    pub expected: f64,
    pub actual: f64,
    pub surprise: f64, // actual - expected
    pub surprise_percent: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketSentiment {
    pub overall: Sentiment,
    pub score: f64, // 0-100
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    pub impact: Impact,
    pub sentiment: NewsTone,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(rename = "totalAUM")]
    pub total_aum: String,
    pub active_positions: u32,
    pub asian_stocks: Vec<StockQuote>,
    pub earnings: Vec<EarningsReport>,
    pub market_sentiment: MarketSentiment,
    /// Display-only; briefs never read it.
    pub news_feed: Vec<NewsItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub name: String,
    pub allocation: f64,
    pub performance: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub name: String,
    pub shares: u32,
    pub avg_cost: f64,
    pub current_price: f64,
    pub unrealized_gain: f64,
    pub unrealized_gain_percent: f64,
    pub weight: f64, // % of portfolio value
}

/// Period returns in percent. Each period is sampled on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Performance {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub ytd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub asia_tech_allocation: f64,
    pub previous_allocation: f64,
    pub risk_score: f64, // 0-10
    pub sectors: Vec<Sector>,
    pub positions: Vec<Position>,
    pub performance: Performance,
}

/// One complete, immutable refresh result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub market: MarketData,
    pub portfolio: PortfolioData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_thresholds_are_exclusive() {
        assert_eq!(Sentiment::from_score(61.0), Sentiment::Bullish);
        assert_eq!(Sentiment::from_score(60.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(40.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_score(39.0), Sentiment::Bearish);
    }

    #[test]
    fn market_data_serializes_with_dashboard_field_names() {
        let md = MarketData {
            total_aum: "2.4B".into(),
            active_positions: 127,
            asian_stocks: vec![],
            earnings: vec![],
            market_sentiment: MarketSentiment {
                overall: Sentiment::Neutral,
                score: 50.0,
                factors: vec![],
            },
            news_feed: vec![],
        };
        let v = serde_json::to_value(&md).unwrap();
        assert_eq!(v["totalAUM"], "2.4B");
        assert_eq!(v["activePositions"], 127);
        assert_eq!(v["marketSentiment"]["overall"], "neutral");
        assert!(v.get("asianStocks").is_some());
    }
}
