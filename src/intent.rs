//! Classify a spoken query into a brief category.
//! Keyword containment only; there is no language understanding here.

use regex::Regex;
use std::sync::LazyLock;

static RISK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"risk|exposure").unwrap());
static EARNINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"earnings|surprise").unwrap());
static ALLOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"allocation|asia|tech").unwrap());
static PERFORMANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"performance|return").unwrap());
static GENERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"brief|summary|overview").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BriefKind {
    Comprehensive,
    Allocation,
    Risk,
    Earnings,
    Performance,
}

/// Independent keyword flags; a query may raise several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentFlags {
    pub risk: bool,
    pub earnings: bool,
    pub allocation: bool,
    pub performance: bool,
    pub general: bool,
}

impl IntentFlags {
    pub fn detect(query: &str) -> Self {
        let q = query.to_lowercase();
        Self {
            risk: RISK.is_match(&q),
            earnings: EARNINGS.is_match(&q),
            allocation: ALLOCATION.is_match(&q),
            performance: PERFORMANCE.is_match(&q),
            general: GENERAL.is_match(&q),
        }
    }

    fn none(&self) -> bool {
        !(self.risk || self.earnings || self.allocation || self.performance || self.general)
    }

    /// First satisfied rule wins.
    pub fn route(&self) -> BriefKind {
        if self.general || (self.risk && self.earnings) || self.none() {
            BriefKind::Comprehensive
        } else if self.allocation {
            BriefKind::Allocation
        } else if self.risk {
            BriefKind::Risk
        } else if self.earnings {
            BriefKind::Earnings
        } else if self.performance {
            BriefKind::Performance
        } else {
            BriefKind::Comprehensive
        }
    }
}

pub fn classify(query: &str) -> BriefKind {
    IntentFlags::detect(query).route()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_and_earnings_together_is_comprehensive() {
        let q = "What's our risk exposure in Asia tech stocks today, and highlight any earnings surprises?";
        let f = IntentFlags::detect(q);
        assert!(f.risk && f.earnings && f.allocation);
        assert_eq!(classify(q), BriefKind::Comprehensive);
    }

    #[test]
    fn no_keywords_is_comprehensive() {
        assert_eq!(classify("hello there"), BriefKind::Comprehensive);
        assert_eq!(classify(""), BriefKind::Comprehensive);
    }

    #[test]
    fn general_keywords_beat_specific_ones() {
        assert_eq!(classify("give me a risk summary"), BriefKind::Comprehensive);
        assert_eq!(classify("performance overview"), BriefKind::Comprehensive);
        assert_eq!(classify("morning brief"), BriefKind::Comprehensive);
    }

    #[test]
    fn allocation_outranks_risk_and_performance() {
        assert_eq!(classify("how much asia exposure"), BriefKind::Allocation);
        assert_eq!(classify("tech performance"), BriefKind::Allocation);
        assert_eq!(classify("what is my allocation"), BriefKind::Allocation);
    }

    #[test]
    fn single_category_routes() {
        assert_eq!(classify("what's my risk"), BriefKind::Risk);
        assert_eq!(classify("any earnings surprises?"), BriefKind::Earnings);
        assert_eq!(classify("how are my returns"), BriefKind::Performance);
    }

    #[test]
    fn earnings_outranks_performance() {
        assert_eq!(classify("earnings and returns"), BriefKind::Earnings);
    }

    #[test]
    fn matching_is_case_insensitive_and_substring() {
        assert_eq!(classify("RISK"), BriefKind::Risk);
        // "technology" contains "tech"
        assert_eq!(classify("technology names"), BriefKind::Allocation);
    }

    #[test]
    fn classification_is_stable() {
        let q = "Any earnings surprises?";
        let first = classify(q);
        for _ in 0..10 {
            assert_eq!(classify(q), first);
        }
    }
}
