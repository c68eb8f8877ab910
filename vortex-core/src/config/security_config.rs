use serde::{Deserialize, Serialize};

/// Security boundary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Active security profile name (`development`, `production_basic`,
    /// `production_enhanced`).
    pub profile: String,
    /// Service API key. Calls presenting it run with an admin-equivalent
    /// service context. `None` disables API-key auth entirely.
    pub api_key: Option<String>,
    /// Per-role `top_k` ceilings; missing roles fall back to the guest limit.
    pub quota_guest: usize,
    pub quota_viewer: usize,
    pub quota_editor: usize,
    pub quota_admin: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            profile: "production_basic".to_string(),
            api_key: None,
            quota_guest: 10,
            quota_viewer: 50,
            quota_editor: 100,
            quota_admin: 100,
        }
    }
}

impl SecurityConfig {
    pub fn quota_for(&self, role: crate::models::Role) -> usize {
        use crate::models::Role;
        match role {
            Role::Guest => self.quota_guest,
            Role::Viewer => self.quota_viewer,
            Role::Editor => self.quota_editor,
            Role::Admin => self.quota_admin,
        }
    }
}
