use serde::{Deserialize, Serialize};

use crate::{Role, primary_role};

/// Authority claims of an authenticated caller (transport-agnostic).
///
/// Decoding and verifying the token that carried these claims happens
/// outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityClaims {
    /// Subject / principal identifier.
    #[serde(default)]
    pub sub: Option<String>,

    /// Granted authorities, in issuer order.
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl AuthorityClaims {
    /// The caller's primary role (`finance` when none is recognised).
    pub fn primary_role(&self) -> Role {
        primary_role(&self.authorities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_authorities_fall_back_to_finance() {
        let claims: AuthorityClaims = serde_json::from_str(r#"{"sub":"u-1"}"#).unwrap();
        assert_eq!(claims.primary_role(), Role::Finance);
    }

    #[test]
    fn first_authority_is_primary() {
        let claims: AuthorityClaims =
            serde_json::from_str(r#"{"sub":"u-2","authorities":["ROLE_ADMIN","ROLE_FINANCE"]}"#)
                .unwrap();
        assert_eq!(claims.primary_role(), Role::Admin);
    }
}
