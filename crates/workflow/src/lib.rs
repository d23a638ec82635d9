//! Project document workflow.
//!
//! - [`resolve_documents`] derives which documents a caller can obtain or view
//!   from a project snapshot and the caller's role (pure, table-driven).
//! - [`EstimationReview`] is the verification/approval state machine.
//! - [`ProjectActions`] wires both to the project service seam.

pub mod actions;
pub mod document;
pub mod project;
pub mod resolver;
pub mod review;
pub mod service;

pub use actions::{ActionError, ProjectActions};
pub use document::{DOCUMENT_TABLE, DocumentCard, DocumentRule, DocumentType, Gate};
pub use project::{ProjectState, ProjectStatus, ReviewStatus};
pub use resolver::resolve_documents;
pub use review::{
    ApprovalState, DecideApproval, EstimationApproved, EstimationRejected, EstimationReview,
    EstimationVerified, RequestVerification, ReviewCommand, ReviewEvent, permitted_actions,
};
pub use service::{Engineer, EngineerDirectory, InMemoryProjectService, ProjectService, ServiceError};
