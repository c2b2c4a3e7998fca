//! Dashboard analytics derived from a snapshot: earnings tallies,
//! portfolio alerts and per-stock movement updates.

use serde::Serialize;

use crate::types::{MarketData, PortfolioData};
use crate::utils::{mean, ratio_or_zero};

/// Results within this band (in percent) count as in line with estimates.
const IN_LINE_BAND: f64 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EarningsSummary {
    pub beats: usize,
    pub misses: usize,
    pub in_line: usize,
    pub beat_rate: u32, // rounded percent of all reports
    pub average_surprise: f64,
    pub tone: Tone,
}

pub fn earnings_summary(m: &MarketData) -> EarningsSummary {
    let total = m.earnings.len();
    let beats = m
        .earnings
        .iter()
        .filter(|e| e.surprise_percent > IN_LINE_BAND)
        .count();
    let misses = m
        .earnings
        .iter()
        .filter(|e| e.surprise_percent < -IN_LINE_BAND)
        .count();

    let tone = match beats.cmp(&misses) {
        std::cmp::Ordering::Greater => Tone::Positive,
        std::cmp::Ordering::Less => Tone::Negative,
        std::cmp::Ordering::Equal => Tone::Neutral,
    };

    EarningsSummary {
        beats,
        misses,
        in_line: total - beats - misses,
        beat_rate: (ratio_or_zero(beats as f64, total as f64) * 100.0).round() as u32,
        average_surprise: mean(m.earnings.iter().map(|e| e.surprise_percent)),
        tone,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum PortfolioAlert {
    HighRisk { score: f64 },
    Concentration { allocation: f64 },
}

impl PortfolioAlert {
    pub fn message(&self) -> String {
        match self {
            PortfolioAlert::HighRisk { score } => format!(
                "Portfolio risk score {} is elevated. Consider hedging to reduce volatility.",
                score
            ),
            PortfolioAlert::Concentration { allocation } => format!(
                "Asia tech allocation of {}% exceeds the 30% concentration guideline.",
                allocation
            ),
        }
    }
}

pub fn portfolio_alerts(p: &PortfolioData) -> Vec<PortfolioAlert> {
    let mut alerts = Vec::new();
    if p.risk_score > 7.0 {
        alerts.push(PortfolioAlert::HighRisk {
            score: p.risk_score,
        });
    }
    if p.asia_tech_allocation > 30.0 {
        alerts.push(PortfolioAlert::Concentration {
            allocation: p.asia_tech_allocation,
        });
    }
    alerts
}

/// Coarse band shown next to the risk score.
pub fn risk_band(score: f64) -> &'static str {
    if score >= 7.0 {
        "High Risk"
    } else if score >= 5.0 {
        "Moderate Risk"
    } else {
        "Low Risk"
    }
}

pub fn total_position_value(p: &PortfolioData) -> f64 {
    p.positions
        .iter()
        .map(|pos| pos.shares as f64 * pos.current_price)
        .sum()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MarketUpdate {
    pub symbol: String,
    pub message: String,
    pub price: f64,
    pub change_percent: f64,
    pub priority: Priority,
}

pub fn market_updates(m: &MarketData) -> Vec<MarketUpdate> {
    m.asian_stocks
        .iter()
        .map(|s| {
            let moved = s.change_percent.abs();
            let verb = if s.change >= 0.0 { "rises" } else { "falls" };
            let priority = if moved > 3.0 {
                Priority::High
            } else if moved > 1.0 {
                Priority::Medium
            } else {
                Priority::Low
            };
            MarketUpdate {
                symbol: s.symbol.clone(),
                message: format!("{} {} {:.2}%", s.symbol, verb, moved),
                price: s.price,
                change_percent: s.change_percent,
                priority,
            }
        })
        .collect()
}
