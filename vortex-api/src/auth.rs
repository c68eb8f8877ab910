//! Credential resolution. Produces the per-request [`UserContext`] exactly
//! once; everything downstream receives it by reference.
//!
//! Service calls present an API key and run admin-equivalent. User calls
//! present bearer claims. Absence of both degrades to guest — never to
//! admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vortex_core::config::SecurityConfig;
use vortex_core::errors::AuthError;
use vortex_core::models::{Role, UserContext};

/// Claims carried by a verified bearer token. Signature verification is the
/// gateway's job; this layer consumes the decoded claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearerClaims {
    pub user_id: String,
    pub role: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub exp: Option<DateTime<Utc>>,
}

/// Credentials attached to one request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub bearer: Option<BearerClaims>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            bearer: None,
        }
    }

    pub fn bearer(claims: BearerClaims) -> Self {
        Self {
            api_key: None,
            bearer: Some(claims),
        }
    }
}

fn key_matches(presented: &str, configured: &str) -> bool {
    // Compare digests rather than raw keys; neither side keeps the plaintext
    // around longer than this call.
    blake3::hash(presented.as_bytes()) == blake3::hash(configured.as_bytes())
}

/// Resolve credentials into a [`UserContext`].
pub fn resolve_user_context(
    credentials: &Credentials,
    config: &SecurityConfig,
) -> Result<UserContext, AuthError> {
    if let Some(presented) = &credentials.api_key {
        let Some(configured) = &config.api_key else {
            warn!("API key presented but none is configured");
            return Err(AuthError::InvalidApiKey);
        };
        if !key_matches(presented, configured) {
            warn!("API key mismatch");
            return Err(AuthError::InvalidApiKey);
        }
        debug!("service authenticated via API key");
        return Ok(UserContext::new("service", Role::Admin));
    }

    if let Some(claims) = &credentials.bearer {
        if let Some(exp) = claims.exp {
            if exp <= Utc::now() {
                return Err(AuthError::TokenExpired);
            }
        }
        if claims.user_id.trim().is_empty() {
            return Err(AuthError::MalformedClaims {
                reason: "empty user_id".to_string(),
            });
        }
        // Unknown role strings degrade to guest, never upward.
        let role = claims.role.parse::<Role>().unwrap_or(Role::Guest);
        let mut ctx = UserContext::new(claims.user_id.clone(), role);
        ctx.team = claims.team.clone();
        return Ok(ctx);
    }

    Ok(UserContext::guest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn config_with_key(key: &str) -> SecurityConfig {
        SecurityConfig {
            api_key: Some(key.to_string()),
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn no_credentials_is_guest_never_admin() {
        let ctx = resolve_user_context(&Credentials::anonymous(), &SecurityConfig::default()).unwrap();
        assert_eq!(ctx.role, Role::Guest);
        assert_eq!(ctx.user_id, "anonymous");
    }

    #[test]
    fn valid_api_key_is_admin_equivalent_service() {
        let ctx =
            resolve_user_context(&Credentials::api_key("s3cret"), &config_with_key("s3cret")).unwrap();
        assert_eq!(ctx.role, Role::Admin);
        assert_eq!(ctx.user_id, "service");
    }

    #[test]
    fn wrong_or_unconfigured_api_key_is_rejected() {
        let err = resolve_user_context(&Credentials::api_key("nope"), &config_with_key("s3cret"))
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidApiKey));

        let err = resolve_user_context(&Credentials::api_key("any"), &SecurityConfig::default())
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidApiKey));
    }

    #[test]
    fn bearer_claims_carry_identity_and_role() {
        let ctx = resolve_user_context(
            &Credentials::bearer(BearerClaims {
                user_id: "alice".into(),
                role: "editor".into(),
                team: Some("nlp".into()),
                exp: Some(Utc::now() + Duration::hours(1)),
            }),
            &SecurityConfig::default(),
        )
        .unwrap();
        assert_eq!(ctx.role, Role::Editor);
        assert_eq!(ctx.team.as_deref(), Some("nlp"));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let err = resolve_user_context(
            &Credentials::bearer(BearerClaims {
                user_id: "alice".into(),
                role: "viewer".into(),
                team: None,
                exp: Some(Utc::now() - Duration::minutes(1)),
            }),
            &SecurityConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn unknown_roles_degrade_to_guest() {
        let ctx = resolve_user_context(
            &Credentials::bearer(BearerClaims {
                user_id: "eve".into(),
                role: "superuser".into(),
                team: None,
                exp: None,
            }),
            &SecurityConfig::default(),
        )
        .unwrap();
        assert_eq!(ctx.role, Role::Guest);
    }
}
