//! `sitedesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{EngineerId, EstimationId, InvoiceRef, LpoId, ProjectId, QuotationId, WorkProgressRef};
pub use money::{is_saturated, line_total, percent_of, round2, sum2};
pub use value_object::ValueObject;
