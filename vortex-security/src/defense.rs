//! Request defense: injection screening over incoming query text and
//! per-role quota enforcement.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use vortex_core::config::SecurityConfig;
use vortex_core::errors::AccessError;
use vortex_core::models::Role;

struct InjectionPattern {
    name: &'static str,
    regex: &'static LazyLock<Option<Regex>>,
}

macro_rules! injection_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Store filter operators smuggled into free text ─────────────────────────
injection_pattern!(RE_FILTER_OPERATOR, r#"(?i)\$(?:where|regex|ne|gt|lt|or|and)\b"#);

// ── Markup / script injection ──────────────────────────────────────────────
injection_pattern!(RE_SCRIPT_TAG, r"(?i)<\s*script[\s>]");

// ── SQL fragments ──────────────────────────────────────────────────────────
injection_pattern!(
    RE_SQL,
    r"(?i)\b(?:union\s+select|drop\s+table|insert\s+into|delete\s+from)\b"
);

// ── Prompt-override phrasing ───────────────────────────────────────────────
injection_pattern!(
    RE_PROMPT_OVERRIDE,
    r"(?i)\bignore\s+(?:all\s+)?(?:previous|prior)\s+instructions\b"
);

// ── Path traversal ─────────────────────────────────────────────────────────
injection_pattern!(RE_TRAVERSAL, r"\.\./\.\./");

const PATTERNS: &[InjectionPattern] = &[
    InjectionPattern {
        name: "filter_operator",
        regex: &RE_FILTER_OPERATOR,
    },
    InjectionPattern {
        name: "script_tag",
        regex: &RE_SCRIPT_TAG,
    },
    InjectionPattern {
        name: "sql_fragment",
        regex: &RE_SQL,
    },
    InjectionPattern {
        name: "prompt_override",
        regex: &RE_PROMPT_OVERRIDE,
    },
    InjectionPattern {
        name: "path_traversal",
        regex: &RE_TRAVERSAL,
    },
];

/// Reject query text matching any injection pattern. Runs before retrieval.
pub fn screen_query(query: &str) -> Result<(), AccessError> {
    for pattern in PATTERNS {
        if let Some(re) = pattern.regex.as_ref() {
            if re.is_match(query) {
                warn!(pattern = pattern.name, "query rejected by injection screen");
                return Err(AccessError::InjectionDetected {
                    pattern: pattern.name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Enforce the per-role `top_k` ceiling.
pub fn check_quota(
    config: &SecurityConfig,
    role: Role,
    requested_top_k: usize,
) -> Result<(), AccessError> {
    let limit = config.quota_for(role);
    if requested_top_k > limit {
        return Err(AccessError::QuotaExceeded {
            role: role.as_str().to_string(),
            requested: requested_top_k,
            limit,
        });
    }
    Ok(())
}
