//! Document-level access decisions: role whitelist over access levels plus
//! an ownership rule that always wins.

use tracing::debug;

use vortex_core::models::{ChunkPayload, Role, ScoredResult, UserContext};

/// Access levels each role may see on public documents.
fn allowed_levels(role: Role) -> &'static [u8] {
    match role {
        Role::Guest => &[1],
        Role::Viewer => &[1, 2],
        Role::Editor => &[1, 2, 3],
        Role::Admin => &[1, 2, 3, 4],
    }
}

/// Stateless decision engine, constructed once and passed by reference to
/// handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessControlManager;

impl AccessControlManager {
    pub fn new() -> Self {
        Self
    }

    /// A caller may view a document when they own it, or when it is public
    /// at a level their role allows. Private documents of other tenants are
    /// never visible, regardless of role.
    pub fn can_view(&self, user: &UserContext, doc: &ChunkPayload) -> bool {
        if doc.tenant_id == user.user_id {
            return true;
        }
        if doc.tenant_id == "public" {
            return allowed_levels(user.role).contains(&doc.access_level.value());
        }
        false
    }

    /// Mutation is stricter than visibility: owners may edit their own
    /// documents; admins may edit public ones; nobody touches another
    /// tenant's documents.
    pub fn can_edit(&self, user: &UserContext, doc: &ChunkPayload) -> bool {
        if doc.tenant_id == user.user_id {
            return true;
        }
        user.role == Role::Admin && doc.tenant_id == "public"
    }

    pub fn can_delete(&self, user: &UserContext, doc: &ChunkPayload) -> bool {
        self.can_edit(user, doc)
    }

    /// Security-level changes follow the edit rule.
    pub fn can_change_security_level(&self, user: &UserContext, doc: &ChunkPayload) -> bool {
        self.can_edit(user, doc)
    }

    /// Drop every result the caller may not view. Runs on every request —
    /// cache hit or miss — because cached lists are role-agnostic.
    pub fn filter_results(
        &self,
        user: &UserContext,
        results: Vec<ScoredResult>,
    ) -> Vec<ScoredResult> {
        let before = results.len();
        let visible: Vec<ScoredResult> = results
            .into_iter()
            .filter(|r| self.can_view(user, &r.payload))
            .collect();
        if visible.len() != before {
            debug!(
                user = %user.user_id,
                role = %user.role,
                dropped = before - visible.len(),
                "access filter removed results"
            );
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk_payload;
    use vortex_core::models::Role;

    fn user(id: &str, role: Role) -> UserContext {
        UserContext::new(id, role)
    }

    #[test]
    fn public_visibility_follows_role_levels() {
        let acm = AccessControlManager::new();
        let doc2 = chunk_payload("d", "public", 2);
        let doc4 = chunk_payload("d", "public", 4);

        assert!(!acm.can_view(&user("g", Role::Guest), &doc2));
        assert!(acm.can_view(&user("v", Role::Viewer), &doc2));
        assert!(!acm.can_view(&user("v", Role::Viewer), &doc4));
        assert!(acm.can_view(&user("a", Role::Admin), &doc4));
    }

    #[test]
    fn visibility_is_monotonic_in_role() {
        let acm = AccessControlManager::new();
        let docs: Vec<_> = (1..=4).map(|l| chunk_payload("d", "public", l)).collect();
        let visible = |role: Role| {
            docs.iter()
                .filter(|d| acm.can_view(&user("u", role), d))
                .count()
        };
        assert!(visible(Role::Guest) <= visible(Role::Viewer));
        assert!(visible(Role::Viewer) <= visible(Role::Editor));
        assert!(visible(Role::Editor) <= visible(Role::Admin));
    }

    #[test]
    fn ownership_overrides_level_caps() {
        let acm = AccessControlManager::new();
        // A viewer owning a private level-4 document sees and edits it.
        let own = chunk_payload("d", "alice", 4);
        let alice = user("alice", Role::Viewer);
        assert!(acm.can_view(&alice, &own));
        assert!(acm.can_edit(&alice, &own));
        assert!(acm.can_change_security_level(&alice, &own));
    }

    #[test]
    fn admins_never_touch_foreign_tenants() {
        let acm = AccessControlManager::new();
        let private = chunk_payload("d", "bob", 1);
        let admin = user("root", Role::Admin);
        assert!(!acm.can_view(&admin, &private));
        assert!(!acm.can_edit(&admin, &private));
        assert!(!acm.can_change_security_level(&admin, &private));
    }

    #[test]
    fn admins_edit_public_documents() {
        let acm = AccessControlManager::new();
        let public = chunk_payload("d", "public", 3);
        assert!(acm.can_edit(&user("root", Role::Admin), &public));
        assert!(!acm.can_edit(&user("v", Role::Viewer), &public));
    }
}
