use serde::Serialize;
use thiserror::Error;

use crate::{Action, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' may not {action}")]
    Forbidden { role: Role, action: Action },
}

/// Authorize a role for an action against the static allow-list.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(role: Role, action: Action) -> Result<(), AuthzError> {
    if action.is_allowed_for(role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden { role, action })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationExplanation {
    pub action: Action,
    pub role: Role,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Roles that would be granted the action.
    pub allowed_roles: Vec<Role>,
}

/// Explain why an authorization decision was made (or would be made).
pub fn explain_authorization(role: Role, action: Action) -> AuthorizationExplanation {
    let allowed_roles = action.allowed_roles().to_vec();
    let granted = allowed_roles.contains(&role);

    let reason = if granted {
        format!("role '{role}' is in the allow-list for '{action}'")
    } else {
        let names: Vec<&str> = allowed_roles.iter().map(|r| r.as_str()).collect();
        format!(
            "role '{role}' is not in the allow-list for '{action}' (allowed: {})",
            names.join(", ")
        )
    };

    AuthorizationExplanation {
        action,
        role,
        granted,
        reason,
        allowed_roles,
    }
}

/// Role definition with its granted actions (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: &'static str,
    pub actions: Vec<Action>,
}

/// Every role with the actions the static table grants it.
pub fn role_definitions() -> Vec<RoleDefinition> {
    Role::ALL
        .into_iter()
        .map(|role| RoleDefinition {
            role,
            description: role_description(role),
            actions: Action::ALL
                .into_iter()
                .filter(|a| a.is_allowed_for(role))
                .collect(),
        })
        .collect()
}

fn role_description(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin => "Full administrator across all projects",
        Role::Admin => "Office administrator: reviews estimations and assigns engineers",
        Role::Finance => "Finance staff: quotations, purchase orders and invoices",
        Role::Engineer => "Site engineer: prepares estimations and records work",
        Role::Driver => "Driver: follows work progress",
    }
}
