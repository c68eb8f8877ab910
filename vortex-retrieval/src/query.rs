//! Query normalization and temporal intent detection.

use std::sync::LazyLock;

use regex::Regex;

use vortex_core::config::defaults;

/// Trim, strip control characters, and collapse runs of whitespace.
pub fn normalize_query(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Temporal intent carried by the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalIntent {
    pub has_recent_intent: bool,
    pub explicit_year: Option<i32>,
    /// Weight of the semantic score when recency is blended in.
    pub alpha: f64,
    pub half_life_days: f64,
}

static YEAR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b(20[12]\d)\b").ok());

/// Markers that signal a freshness requirement. The corpus is bilingual, so
/// both Korean and English markers count.
const RECENT_KEYWORDS: &[&str] = &[
    "최신", "최근", "오늘", "뉴스", "올해", "recent", "latest", "today", "news", "this year",
];

/// Detect recency keywords and explicit years, and derive the temporal
/// blending parameters: recency intent tightens the half-life and gives the
/// recency term more weight.
pub fn extract_temporal_intent(query: &str) -> TemporalIntent {
    let lower = query.to_lowercase();
    let explicit_year = YEAR_RE
        .as_ref()
        .and_then(|re| re.captures(query))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());
    let has_recent_intent =
        RECENT_KEYWORDS.iter().any(|kw| lower.contains(kw)) || explicit_year.is_some();

    let (alpha, half_life_days) = if has_recent_intent {
        (defaults::RECENT_ALPHA, defaults::RECENT_HALF_LIFE_DAYS)
    } else {
        (defaults::NEUTRAL_ALPHA, defaults::NEUTRAL_HALF_LIFE_DAYS)
    };

    TemporalIntent {
        has_recent_intent,
        explicit_year,
        alpha,
        half_life_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_control_chars_and_collapses_whitespace() {
        assert_eq!(normalize_query("  hello\tworld\u{0007} \n"), "hello world");
        assert_eq!(normalize_query("졸업  요건"), "졸업 요건");
    }

    #[test]
    fn neutral_queries_have_no_recency_intent() {
        let intent = extract_temporal_intent("graduation requirements");
        assert!(!intent.has_recent_intent);
        assert_eq!(intent.alpha, defaults::NEUTRAL_ALPHA);
        assert_eq!(intent.half_life_days, defaults::NEUTRAL_HALF_LIFE_DAYS);
    }

    #[test]
    fn recency_keywords_tighten_parameters() {
        for q in ["latest robotics news", "최신 연구 동향"] {
            let intent = extract_temporal_intent(q);
            assert!(intent.has_recent_intent, "missed recency in: {q}");
            assert_eq!(intent.alpha, defaults::RECENT_ALPHA);
        }
    }

    #[test]
    fn explicit_years_are_extracted() {
        let intent = extract_temporal_intent("admission results 2024");
        assert_eq!(intent.explicit_year, Some(2024));
        assert!(intent.has_recent_intent);
        // Out-of-range numbers are not years.
        assert_eq!(extract_temporal_intent("room 1999").explicit_year, None);
    }
}
