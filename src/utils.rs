//! Small helpers.

pub fn round_to(v: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    // + 0.0 folds -0.0 into 0.0
    (v * f).round() / f + 0.0
}

pub fn round2(v: f64) -> f64 {
    round_to(v, 2)
}

pub fn round1(v: f64) -> f64 {
    round_to(v, 1)
}

/// One decimal, "+" for values >= 0, natural "-" otherwise.
pub fn signed_pct(v: f64) -> String {
    let v = round1(v);
    if v >= 0.0 {
        format!("+{:.1}%", v)
    } else {
        format!("{:.1}%", v)
    }
}

/// `a / b`, or 0 when `b` is zero.
pub fn ratio_or_zero(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    ratio_or_zero(sum, n as f64)
}

/// Collapse runs of whitespace and lower-case an utterance.
pub fn normalize_utterance(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
