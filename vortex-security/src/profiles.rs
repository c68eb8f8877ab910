//! Tiered security profiles and override guardrails.
//!
//! A deployment selects a profile; profile tiers impose requirements
//! (tier ≥1: authentication, tier ≥2: MFA). A requirement can be waived by
//! an override, but only one carrying a reason, an approver, and an
//! unexpired expiry — anything less is treated as not present.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vortex_core::errors::{VortexError, VortexResult};

/// A justified, time-bounded waiver of one profile requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityOverride {
    pub reason: String,
    pub approved_by: String,
    pub expires: DateTime<Utc>,
}

impl SecurityOverride {
    /// An override counts only when fully justified and unexpired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.reason.trim().is_empty() && !self.approved_by.trim().is_empty() && self.expires > now
    }
}

/// A named security tier with its feature switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityProfile {
    pub name: String,
    pub tier: u8,
    pub authentication_enabled: bool,
    pub mfa_enabled: bool,
    pub audit_logging: bool,
    pub encryption_at_rest: bool,
    pub injection_detection: bool,
}

impl SecurityProfile {
    /// Look up one of the predefined profiles.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "development" => Some(Self {
                name: name.to_string(),
                tier: 0,
                authentication_enabled: false,
                mfa_enabled: false,
                audit_logging: true,
                encryption_at_rest: false,
                injection_detection: false,
            }),
            "production_basic" => Some(Self {
                name: name.to_string(),
                tier: 1,
                authentication_enabled: true,
                mfa_enabled: false,
                audit_logging: true,
                encryption_at_rest: true,
                injection_detection: true,
            }),
            "production_enhanced" => Some(Self {
                name: name.to_string(),
                tier: 2,
                authentication_enabled: true,
                mfa_enabled: true,
                audit_logging: true,
                encryption_at_rest: true,
                injection_detection: true,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One validation finding. Blocking findings fail activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWarning {
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
    pub blocking: bool,
}

impl ProfileWarning {
    fn new(severity: Severity, message: &str, recommendation: &str, blocking: bool) -> Self {
        Self {
            severity,
            message: message.to_string(),
            recommendation: recommendation.to_string(),
            blocking,
        }
    }
}

/// Check a profile's configuration against its tier requirements.
/// Overrides are keyed by requirement name (`"mfa"`, `"encryption"`).
pub fn validate_profile(
    profile: &SecurityProfile,
    overrides: &HashMap<String, SecurityOverride>,
    now: DateTime<Utc>,
) -> Vec<ProfileWarning> {
    let mut warnings = Vec::new();
    let active = |key: &str| overrides.get(key).map(|o| o.is_active(now)).unwrap_or(false);

    // Flag overrides that look like waivers but do not qualify.
    for (key, o) in overrides {
        if o.reason.trim().is_empty() || o.approved_by.trim().is_empty() {
            warnings.push(ProfileWarning::new(
                Severity::Critical,
                &format!("override for '{key}' is missing reason or approver"),
                "add reason and approved_by, or remove the override",
                true,
            ));
        } else if o.expires <= now {
            warnings.push(ProfileWarning::new(
                Severity::Medium,
                &format!("override for '{key}' expired at {}", o.expires),
                "renew the approval or remove the override",
                false,
            ));
        }
    }

    if profile.tier >= 1 {
        if !profile.authentication_enabled {
            warnings.push(ProfileWarning::new(
                Severity::Critical,
                "authentication disabled in a production tier",
                "enable authentication or downgrade to tier 0",
                true,
            ));
        }
        if !profile.encryption_at_rest && !active("encryption") {
            warnings.push(ProfileWarning::new(
                Severity::High,
                "encryption at rest disabled in production",
                "enable at-rest encryption",
                false,
            ));
        }
    }

    if profile.tier >= 2 && !profile.mfa_enabled && !active("mfa") {
        warnings.push(ProfileWarning::new(
            Severity::High,
            "MFA required for tier 2 and above",
            "enable MFA or add an authorized override",
            true,
        ));
    }

    warnings
}

/// Resolve and validate a profile by name; blocking findings fail it.
pub fn activate(
    name: &str,
    overrides: &HashMap<String, SecurityOverride>,
    now: DateTime<Utc>,
) -> VortexResult<SecurityProfile> {
    let profile = SecurityProfile::named(name)
        .ok_or_else(|| VortexError::Validation(format!("unknown security profile: {name}")))?;
    let blocking: Vec<String> = validate_profile(&profile, overrides, now)
        .into_iter()
        .filter(|w| w.blocking)
        .map(|w| w.message)
        .collect();
    if !blocking.is_empty() {
        return Err(VortexError::Validation(format!(
            "profile '{name}' blocked: {}",
            blocking.join("; ")
        )));
    }
    Ok(profile)
}
