//! Strongly-typed identifiers used across the domain.
//!
//! The backing store owns the identifier format, so these are opaque,
//! non-empty strings rather than parsed UUIDs.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a project (the unit the lifecycle is tracked on).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

/// Reference to an estimation document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimationId(String);

/// Reference to a quotation document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotationId(String);

/// Reference to a local purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LpoId(String);

/// Reference to a work progress record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkProgressRef(String);

/// Reference to an issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceRef(String);

/// Identifier of an engineer that a project can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineerId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier, rejecting blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_newtype!(ProjectId, "ProjectId");
impl_string_newtype!(EstimationId, "EstimationId");
impl_string_newtype!(QuotationId, "QuotationId");
impl_string_newtype!(LpoId, "LpoId");
impl_string_newtype!(WorkProgressRef, "WorkProgressRef");
impl_string_newtype!(InvoiceRef, "InvoiceRef");
impl_string_newtype!(EngineerId, "EngineerId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(matches!(ProjectId::new(""), Err(DomainError::InvalidId(_))));
        assert!(matches!("  ".parse::<EstimationId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn identifiers_display_their_raw_value() {
        let id: QuotationId = "Q-2024-007".parse().unwrap();
        assert_eq!(id.to_string(), "Q-2024-007");
        assert_eq!(id.as_str(), "Q-2024-007");
    }
}
