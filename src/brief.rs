//! Render spoken market briefs from the current snapshot.
//!
//! Renderers are pure: they read the snapshot and return one paragraph.
//! Computed percentages use one decimal; stored allocations and the risk
//! score are shown as stored.

use crate::intent::{classify, BriefKind};
use crate::types::{EarningsReport, MarketData, PortfolioData, Position, RiskLevel, Sentiment};
use crate::utils::{mean, signed_pct};

pub const DATA_UNAVAILABLE: &str =
    "I'm sorry, I don't have access to current market data. Please try again in a moment.";

pub const NO_EARNINGS_SURPRISES: &str = "No significant earnings surprises in your Asia tech holdings today. All companies reported results within expected ranges.";

/// Threshold for an earnings result to count as a surprise in the earnings brief.
const SURPRISE_THRESHOLD: f64 = 1.0;

/// Entry point for the voice layer.
pub fn generate_brief(
    query: &str,
    portfolio: Option<&PortfolioData>,
    market: Option<&MarketData>,
) -> String {
    let (Some(portfolio), Some(market)) = (portfolio, market) else {
        return DATA_UNAVAILABLE.to_string();
    };
    render(classify(query), portfolio, market)
}

pub fn render(kind: BriefKind, portfolio: &PortfolioData, market: &MarketData) -> String {
    match kind {
        BriefKind::Comprehensive => comprehensive_brief(portfolio, market),
        BriefKind::Allocation => allocation_brief(portfolio, market),
        BriefKind::Risk => risk_brief(portfolio, market),
        BriefKind::Earnings => earnings_brief(portfolio, market),
        BriefKind::Performance => performance_brief(portfolio, market),
    }
}

/// First element with the greatest key.
fn first_max_by<'a, T>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> f64,
) -> Option<&'a T> {
    items.fold(None, |best, x| match best {
        Some(b) if key(x) <= key(b) => Some(b),
        _ => Some(x),
    })
}

/// First element with the smallest key.
fn first_min_by<'a, T>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> f64,
) -> Option<&'a T> {
    items.fold(None, |worst, x| match worst {
        Some(w) if key(x) >= key(w) => Some(w),
        _ => Some(x),
    })
}

pub fn comprehensive_brief(p: &PortfolioData, m: &MarketData) -> String {
    let direction = if p.asia_tech_allocation > p.previous_allocation {
        "up"
    } else {
        "down"
    };

    let mut brief = format!(
        "Today, your Asia tech allocation is {}% of AUM, {} from {}% yesterday. ",
        p.asia_tech_allocation, direction, p.previous_allocation
    );

    let beats = m.earnings.iter().filter(|e| e.surprise_percent > 0.0);
    if let Some(top) = first_max_by(beats, |e: &EarningsReport| e.surprise_percent) {
        brief += &format!(
            "{} beat estimates by {:.1}%. ",
            top.company,
            top.surprise_percent.abs()
        );
    }

    let misses = m.earnings.iter().filter(|e| e.surprise_percent < 0.0);
    if let Some(worst) = first_min_by(misses, |e: &EarningsReport| e.surprise_percent) {
        brief += &format!(
            "{} missed by {:.1}%. ",
            worst.company,
            worst.surprise_percent.abs()
        );
    }

    let sentiment = &m.market_sentiment;
    brief += &format!(
        "Regional sentiment is {} {}. ",
        sentiment.overall.as_str(),
        sentiment_description(sentiment.overall, sentiment.score)
    );
    brief += &format!("Your current risk score is {} out of 10. ", p.risk_score);

    if let Some(factor) = sentiment.factors.first() {
        brief += &format!("Key factor to watch: {}.", factor.to_lowercase());
    }

    brief.trim_end().to_string()
}

pub fn allocation_brief(p: &PortfolioData, _m: &MarketData) -> String {
    let delta = p.asia_tech_allocation - p.previous_allocation;
    let direction = if delta > 0.0 { "increased" } else { "decreased" };

    let mut brief = format!(
        "Your Asia tech allocation currently stands at {}% of total AUM. ",
        p.asia_tech_allocation
    );
    brief += &format!(
        "This has {} by {:.1} percentage points from yesterday's {}%. ",
        direction,
        delta.abs(),
        p.previous_allocation
    );

    // Stable sort keeps catalog order among equal weights.
    let mut by_weight: Vec<&Position> = p.positions.iter().collect();
    by_weight.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top: Vec<&str> = by_weight.iter().take(3).map(|p| p.name.as_str()).collect();
    if !top.is_empty() {
        brief += &format!("Your largest positions include {}. ", top.join(", "));
    }

    let daily = p.performance.daily;
    if daily > 0.0 {
        brief += &format!(
            "The allocation is performing well today with a {:.1}% gain.",
            daily
        );
    } else {
        brief += &format!("The allocation is down {:.1}% today.", daily.abs());
    }

    brief
}

pub fn risk_brief(p: &PortfolioData, m: &MarketData) -> String {
    let mut brief = format!(
        "Your current portfolio risk score is {} out of 10, indicating {} risk exposure. ",
        p.risk_score,
        risk_label(p.risk_score)
    );

    let high: Vec<&str> = p
        .sectors
        .iter()
        .filter(|s| s.risk_level == RiskLevel::High)
        .map(|s| s.name.as_str())
        .collect();
    if !high.is_empty() {
        brief += &format!("High-risk exposure in {}. ", high.join(" and "));
    }

    let avg_move = mean(m.asian_stocks.iter().map(|s| s.change_percent.abs()));
    if avg_move > 2.0 {
        brief += &format!(
            "Current market volatility is elevated at {:.1}% average movement. ",
            avg_move
        );
    }

    if p.risk_score > 7.0 {
        brief += "Consider rebalancing towards defensive sectors to reduce risk exposure.";
    } else if p.risk_score < 4.0 {
        brief += "Your conservative allocation may benefit from selective growth opportunities.";
    }

    brief.trim_end().to_string()
}

pub fn earnings_brief(_p: &PortfolioData, m: &MarketData) -> String {
    let surprises: Vec<&EarningsReport> = m
        .earnings
        .iter()
        .filter(|e| e.surprise_percent.abs() > SURPRISE_THRESHOLD)
        .collect();

    if surprises.is_empty() {
        return NO_EARNINGS_SURPRISES.to_string();
    }

    let items: Vec<String> = surprises
        .iter()
        .map(|e| {
            let verb = if e.surprise_percent > 0.0 { "beat" } else { "missed" };
            format!(
                "{} {} estimates by {:.1}%",
                e.company,
                verb,
                e.surprise_percent.abs()
            )
        })
        .collect();

    let mut brief = format!(
        "Here are the key earnings highlights: {}. ",
        items.join(", ")
    );

    let reaction = mean(surprises.iter().map(|e| e.surprise_percent));
    if reaction > 2.0 {
        brief += "Overall earnings momentum is positive for the sector.";
    } else if reaction < -2.0 {
        brief += "Earnings headwinds may pressure sector performance.";
    } else {
        brief += "Mixed earnings results suggest selective stock picking is key.";
    }

    brief
}

pub fn performance_brief(p: &PortfolioData, _m: &MarketData) -> String {
    let perf = &p.performance;
    let mut brief = format!(
        "Your portfolio performance: Today {}, week {}, month {}, year-to-date {}. ",
        signed_pct(perf.daily),
        signed_pct(perf.weekly),
        signed_pct(perf.monthly),
        signed_pct(perf.ytd)
    );

    let gain = |pos: &Position| pos.unrealized_gain_percent;
    if let Some(best) = first_max_by(p.positions.iter(), gain) {
        brief += &format!(
            "Best performer: {} at {}. ",
            best.name,
            signed_pct(best.unrealized_gain_percent)
        );
    }
    if let Some(worst) = first_min_by(p.positions.iter(), gain) {
        brief += &format!(
            "Underperformer: {} at {}.",
            worst.name,
            signed_pct(worst.unrealized_gain_percent)
        );
    }

    brief.trim_end().to_string()
}

pub fn sentiment_description(overall: Sentiment, score: f64) -> &'static str {
    match overall {
        Sentiment::Bullish if score > 70.0 => "with strong optimism",
        Sentiment::Bullish => "with cautious optimism",
        Sentiment::Bearish if score < 30.0 => "with significant concern",
        Sentiment::Bearish => "with mild concern",
        Sentiment::Neutral => "with mixed signals and uncertainty",
    }
}

pub fn risk_label(score: f64) -> &'static str {
    if score >= 8.0 {
        "high"
    } else if score >= 6.0 {
        "moderate to high"
    } else if score >= 4.0 {
        "moderate"
    } else if score >= 2.0 {
        "low to moderate"
    } else {
        "low"
    }
}
