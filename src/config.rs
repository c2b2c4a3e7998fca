//! Load and validate runtime configuration.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

use crate::types::{Impact, NewsTone};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("refresh.interval_sec must be greater than zero")]
    ZeroInterval,

    #[error("{field} must be within 0-100, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Deserialize, Clone)]
pub struct StockCfg {
    pub symbol: String,
    pub name: String,
    pub base_price: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EarningsCfg {
    pub symbol: String,
    pub company: String,
    pub expected: f64, // consensus EPS
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectorCfg {
    pub name: String,
    pub base_allocation: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsCfg {
    pub headline: String,
    pub summary: String,
    pub impact: Impact,
    pub sentiment: NewsTone,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshCfg {
    pub interval_sec: u64,
    pub seed: Option<u64>, // fixed seed for reproducible sessions
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MarketCfg {
    pub total_aum: String,
    pub active_positions: u32,
    pub volatility: f64, // max daily move as a fraction
    pub stocks: Vec<StockCfg>,
    pub earnings: Vec<EarningsCfg>,
    pub news: Vec<NewsCfg>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PortfolioCfg {
    pub base_asia_tech_allocation: f64,
    pub previous_allocation: f64,
    pub position_count: usize, // taken from the head of the stock catalog
    pub sectors: Vec<SectorCfg>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VoiceCfg {
    pub enabled: bool,
    pub lang: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub refresh: RefreshCfg,
    pub market: MarketCfg,
    pub portfolio: PortfolioCfg,
    pub voice: VoiceCfg,
}

impl Default for RefreshCfg {
    fn default() -> Self {
        Self {
            interval_sec: 30,
            seed: None,
        }
    }
}

fn stock(symbol: &str, name: &str, base_price: f64) -> StockCfg {
    StockCfg {
        symbol: symbol.into(),
        name: name.into(),
        base_price,
    }
}

fn earning(symbol: &str, company: &str, expected: f64) -> EarningsCfg {
    EarningsCfg {
        symbol: symbol.into(),
        company: company.into(),
        expected,
    }
}

fn news(headline: &str, summary: &str, impact: Impact, sentiment: NewsTone) -> NewsCfg {
    NewsCfg {
        headline: headline.into(),
        summary: summary.into(),
        impact,
        sentiment,
    }
}

impl Default for MarketCfg {
    fn default() -> Self {
        Self {
            total_aum: "2.4B".into(),
            active_positions: 127,
            volatility: 0.03,
            stocks: vec![
                stock("TSM", "Taiwan Semiconductor", 102.50),
                stock("005930.KS", "Samsung Electronics", 71200.0),
                stock("BABA", "Alibaba Group", 73.80),
                stock("TCEHY", "Tencent Holdings", 38.20),
                stock("9988.HK", "Alibaba Group HK", 72.15),
                stock("700.HK", "Tencent HK", 295.20),
                stock("ASML", "ASML Holding", 745.30),
                stock("SONY", "Sony Group Corp", 89.45),
            ],
            earnings: vec![
                earning("TSM", "Taiwan Semiconductor", 1.85),
                earning("005930.KS", "Samsung Electronics", 0.95),
                earning("BABA", "Alibaba Group", 1.42),
                earning("TCEHY", "Tencent Holdings", 0.68),
                earning("SONY", "Sony Group Corp", 1.15),
            ],
            news: vec![
                news(
                    "Asian markets rally on positive earnings",
                    "Technology stocks lead gains across major Asian exchanges",
                    Impact::High,
                    NewsTone::Positive,
                ),
                news(
                    "Central bank policy uncertainty weighs on sentiment",
                    "Rising yields prompt caution among institutional investors",
                    Impact::Medium,
                    NewsTone::Negative,
                ),
                news(
                    "Semiconductor demand remains robust",
                    "AI and cloud computing drive continued chip demand",
                    Impact::High,
                    NewsTone::Positive,
                ),
                news(
                    "Currency fluctuations impact regional trade",
                    "USD strength affects Asian export competitiveness",
                    Impact::Medium,
                    NewsTone::Neutral,
                ),
            ],
        }
    }
}

impl Default for PortfolioCfg {
    fn default() -> Self {
        let sector = |name: &str, base_allocation: f64| SectorCfg {
            name: name.into(),
            base_allocation,
        };
        Self {
            base_asia_tech_allocation: 22.0,
            previous_allocation: 18.0,
            position_count: 5,
            sectors: vec![
                sector("Technology", 35.0),
                sector("Healthcare", 18.0),
                sector("Financial Services", 15.0),
                sector("Consumer Discretionary", 12.0),
                sector("Industrials", 10.0),
                sector("Energy", 6.0),
                sector("Utilities", 4.0),
            ],
        }
    }
}

impl Default for VoiceCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            lang: "en-US".into(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_sec == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let pct = [
            (
                "portfolio.base_asia_tech_allocation",
                self.portfolio.base_asia_tech_allocation,
            ),
            (
                "portfolio.previous_allocation",
                self.portfolio.previous_allocation,
            ),
        ];
        for (field, value) in pct {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_default_catalog() {
        let cfg = AppConfig::from_yaml("refresh:\n  interval_sec: 5\n  seed: 42\n").unwrap();
        assert_eq!(cfg.refresh.interval_sec, 5);
        assert_eq!(cfg.refresh.seed, Some(42));
        assert_eq!(cfg.market.stocks.len(), 8);
        assert_eq!(cfg.market.earnings.len(), 5);
        assert_eq!(cfg.portfolio.sectors.len(), 7);
        assert_eq!(cfg.portfolio.previous_allocation, 18.0);
    }

    #[test]
    fn empty_catalogs_are_accepted() {
        let cfg = AppConfig::from_yaml("market:\n  stocks: []\n  earnings: []\n").unwrap();
        assert!(cfg.market.stocks.is_empty());
        assert!(cfg.market.earnings.is_empty());
        assert_eq!(cfg.market.news.len(), 4);
    }

    #[test]
    fn zero_interval_rejected() {
        let err = AppConfig::from_yaml("refresh:\n  interval_sec: 0\n").unwrap_err();
        assert!(err.to_string().contains("interval_sec"));
    }

    #[test]
    fn allocation_out_of_range_rejected() {
        let err = AppConfig::from_yaml("portfolio:\n  previous_allocation: 140\n").unwrap_err();
        assert!(err.to_string().contains("previous_allocation"));
    }

    #[test]
    fn news_enums_parse_lowercase() {
        let yaml = r#"
market:
  news:
    - headline: "Chip exports slow"
      summary: "Shipments fall"
      impact: low
      sentiment: negative
"#;
        let cfg = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.market.news.len(), 1);
        assert_eq!(cfg.market.news[0].impact, Impact::Low);
        assert_eq!(cfg.market.news[0].sentiment, NewsTone::Negative);
    }
}
