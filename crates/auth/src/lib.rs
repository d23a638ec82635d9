//! `sitedesk-auth`: role-based authorization boundary.
//!
//! Roles arrive as explicit parameters; this crate never reads session
//! state. It is decoupled from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod permissions;
pub mod roles;

pub use authorize::{
    AuthorizationExplanation, AuthzError, RoleDefinition, authorize, explain_authorization,
    role_definitions,
};
pub use claims::AuthorityClaims;
pub use permissions::Action;
pub use roles::{DEFAULT_ROLE, Role, RoleParseError, primary_role};
