//! Synthetic market and portfolio snapshots.
//!
//! Every call produces a complete replacement value. Derived fields
//! (`change`, `surprise`, gains, sentiment label) are computed from their
//! base fields after rounding, so the records stay self-consistent.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::config::{AppConfig, MarketCfg, PortfolioCfg, StockCfg};
use crate::types::{
    EarningsReport, MarketData, MarketSentiment, NewsItem, Performance, PortfolioData, Position,
    RiskLevel, Sector, Sentiment, Snapshot, StockQuote,
};
use crate::utils::{mean, ratio_or_zero, round1, round2};

/// Uniform sample in `[-half, half)`.
fn symmetric<R: Rng>(rng: &mut R, half: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * 2.0 * half
}

#[derive(Debug, Clone, Default)]
pub struct MarketGenerator {
    market: MarketCfg,
    portfolio: PortfolioCfg,
}

impl MarketGenerator {
    pub fn new(market: MarketCfg, portfolio: PortfolioCfg) -> Self {
        Self { market, portfolio }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.market.clone(), cfg.portfolio.clone())
    }

    pub fn generate<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> Snapshot {
        Snapshot {
            market: self.generate_market(rng, now),
            portfolio: self.generate_portfolio(rng),
        }
    }

    pub fn generate_market<R: Rng>(&self, rng: &mut R, now: DateTime<Utc>) -> MarketData {
        let asian_stocks: Vec<StockQuote> = self
            .market
            .stocks
            .iter()
            .map(|s| self.quote(rng, s))
            .collect();

        let earnings = self
            .market
            .earnings
            .iter()
            .map(|e| {
                let raw_pct = symmetric(rng, 10.0);
                let actual = round2(e.expected * (1.0 + raw_pct / 100.0));
                let surprise = round2(actual - e.expected);
                EarningsReport {
                    symbol: e.symbol.clone(),
                    company: e.company.clone(),
                    expected: e.expected,
                    actual,
                    surprise,
                    surprise_percent: round2(ratio_or_zero(surprise, e.expected) * 100.0),
                    date: now.date_naive(),
                }
            })
            .collect();

        let news_feed = self
            .market
            .news
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let age_ms = (rng.random::<f64>() * 3_600_000.0) as i64;
                NewsItem {
                    id: format!("news-{}-{}", now.timestamp_millis(), i),
                    headline: n.headline.clone(),
                    summary: n.summary.clone(),
                    timestamp: now - Duration::milliseconds(age_ms),
                    impact: n.impact,
                    sentiment: n.sentiment,
                }
            })
            .collect();

        let market_sentiment = sentiment_for(&asian_stocks);

        MarketData {
            total_aum: self.market.total_aum.clone(),
            active_positions: self.market.active_positions,
            asian_stocks,
            earnings,
            market_sentiment,
            news_feed,
        }
    }

    pub fn generate_portfolio<R: Rng>(&self, rng: &mut R) -> PortfolioData {
        let cfg = &self.portfolio;
        let asia_tech_allocation =
            round1((cfg.base_asia_tech_allocation + symmetric(rng, 2.0)).clamp(0.0, 100.0));

        let sectors = cfg
            .sectors
            .iter()
            .map(|s| {
                let allocation = (s.base_allocation + symmetric(rng, 2.0)).clamp(0.0, 100.0);
                let performance = symmetric(rng, 5.0);
                let risk_level = if rng.random::<f64>() > 0.6 {
                    RiskLevel::High
                } else if rng.random::<f64>() > 0.3 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                };
                Sector {
                    name: s.name.clone(),
                    allocation,
                    performance,
                    risk_level,
                }
            })
            .collect();

        let positions = self
            .market
            .stocks
            .iter()
            .take(cfg.position_count)
            .map(|s| position(rng, s))
            .collect();

        let performance = Performance {
            daily: symmetric(rng, 2.0),
            weekly: symmetric(rng, 4.0),
            monthly: symmetric(rng, 7.5),
            ytd: symmetric(rng, 12.5),
        };

        PortfolioData {
            asia_tech_allocation,
            previous_allocation: cfg.previous_allocation,
            risk_score: round1(5.0 + rng.random::<f64>() * 3.0),
            sectors,
            positions,
            performance,
        }
    }

    fn quote<R: Rng>(&self, rng: &mut R, s: &StockCfg) -> StockQuote {
        let volume = rng.random_range(0..10_000_000u64) + 1_000_000;
        let change_percent = symmetric(rng, self.market.volatility * 100.0);
        let change = s.base_price * change_percent / 100.0;
        StockQuote {
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            price: round2(s.base_price + change),
            change: round2(change),
            change_percent: round2(change_percent),
            volume,
        }
    }
}

fn position<R: Rng>(rng: &mut R, s: &StockCfg) -> Position {
    let shares = rng.random_range(0..1000u32) + 100;
    let avg_cost = round2(s.base_price * (0.9 + rng.random::<f64>() * 0.2));
    let current_price = round2(s.base_price + symmetric(rng, 0.05) * s.base_price);
    let diff = current_price - avg_cost;
    Position {
        symbol: s.symbol.clone(),
        name: s.name.clone(),
        shares,
        avg_cost,
        current_price,
        unrealized_gain: round2(diff * shares as f64),
        unrealized_gain_percent: round2(ratio_or_zero(diff, avg_cost) * 100.0),
        weight: rng.random::<f64>() * 10.0 + 2.0,
    }
}

/// Sentiment from the average daily move; the label follows the rounded score.
pub fn sentiment_for(stocks: &[StockQuote]) -> MarketSentiment {
    let avg = mean(stocks.iter().map(|s| s.change_percent));
    let score = (50.0 + avg * 5.0).clamp(0.0, 100.0).round();

    let mut factors = Vec::new();
    if avg > 1.0 {
        factors.push("Strong earnings performance".to_string());
    }
    if avg < -1.0 {
        factors.push("Market volatility concerns".to_string());
    }
    factors.push("Central bank policy uncertainty".to_string());
    factors.push("Geopolitical tensions".to_string());

    MarketSentiment {
        overall: Sentiment::from_score(score),
        score,
        factors,
    }
}

/// Generate a snapshot from the built-in catalog.
pub fn generate_data<R: Rng>(rng: &mut R) -> Snapshot {
    MarketGenerator::default().generate(rng, Utc::now())
}
