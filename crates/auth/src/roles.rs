use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller role used for RBAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Finance,
    Engineer,
    Driver,
}

/// Role assumed when a caller carries no recognisable authority.
pub const DEFAULT_ROLE: Role = Role::Finance;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Finance,
        Role::Engineer,
        Role::Driver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Finance => "finance",
            Role::Engineer => "engineer",
            Role::Driver => "driver",
        }
    }

    /// Parse an authority string as issued by the identity provider.
    ///
    /// Accepts `super_admin`, `SUPER_ADMIN`, `ROLE_SUPER_ADMIN` and
    /// `super-admin` alike.
    pub fn from_authority(authority: &str) -> Option<Role> {
        let normalized = authority.trim().to_ascii_lowercase().replace('-', "_");
        let name = normalized.strip_prefix("role_").unwrap_or(&normalized);
        Role::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_authority(s).ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Resolve the single primary role of a caller from its authority list.
///
/// The first recognised authority wins. With no recognised authority the
/// caller is treated as `finance`.
pub fn primary_role<I, S>(authorities: I) -> Role
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    authorities
        .into_iter()
        .find_map(|a| Role::from_authority(a.as_ref()))
        .unwrap_or(DEFAULT_ROLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_spellings_are_normalized() {
        assert_eq!(Role::from_authority("ROLE_SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::from_authority("super-admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::from_authority(" Engineer "), Some(Role::Engineer));
        assert_eq!(Role::from_authority("ROLE_DRIVER"), Some(Role::Driver));
        assert_eq!(Role::from_authority("accountant"), None);
    }

    #[test]
    fn primary_role_defaults_to_finance() {
        assert_eq!(primary_role(Vec::<String>::new()), Role::Finance);
        assert_eq!(primary_role(["ROLE_UNKNOWN"]), Role::Finance);
    }

    #[test]
    fn primary_role_takes_first_recognised_authority() {
        assert_eq!(primary_role(["ROLE_USER", "ROLE_ENGINEER", "ROLE_ADMIN"]), Role::Engineer);
    }

    #[test]
    fn roles_round_trip_through_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
        assert_eq!("cashier".parse::<Role>(), Err(RoleParseError("cashier".to_string())));
    }
}
