//! Static document table.
//!
//! One row per document type: when the card is offered, how its existence is
//! detected, where it routes, and which roles may see it. The resolver only
//! walks this table; no gating logic lives anywhere else.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sitedesk_auth::Role;

use crate::project::{ProjectState, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Estimation,
    Quotation,
    Lpo,
    WorkProgress,
    WorkCompletion,
    Invoice,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Estimation => "estimation",
            DocumentType::Quotation => "quotation",
            DocumentType::Lpo => "lpo",
            DocumentType::WorkProgress => "work_progress",
            DocumentType::WorkCompletion => "work_completion",
            DocumentType::Invoice => "invoice",
        }
    }
}

impl core::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a document card is offered at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Estimation approved and an engineer assigned.
    ApprovedAndAssigned,
    /// Status at or past the given lifecycle point.
    StatusAtLeast(ProjectStatus),
    StatusIs(ProjectStatus),
}

impl Gate {
    pub fn admits(&self, project: &ProjectState) -> bool {
        match *self {
            Gate::Always => true,
            Gate::ApprovedAndAssigned => project.is_approved && project.assigned_to.is_some(),
            Gate::StatusAtLeast(min) => project.status >= min,
            Gate::StatusIs(status) => project.status == status,
        }
    }
}

/// How a document's existence is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// Exists iff the snapshot carries a reference for this document type.
    Reference,
    /// Derived from project state; exists whenever the card is offered.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRule {
    pub kind: DocumentType,
    pub title: &'static str,
    pub gate: Gate,
    pub existence: Existence,
    /// Creation route template; `None` for view-only documents.
    pub create_route: Option<&'static str>,
    /// View route template.
    pub view_route: &'static str,
    pub roles: &'static [Role],
}

const STAFF: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Finance, Role::Engineer];

/// Ordered document table. Route templates accept `{project}` and `{ref}`.
pub static DOCUMENT_TABLE: [DocumentRule; 6] = [
    DocumentRule {
        kind: DocumentType::Estimation,
        title: "Estimation",
        gate: Gate::Always,
        existence: Existence::Reference,
        create_route: Some("/projects/{project}/estimation/create"),
        view_route: "/estimations/{ref}",
        roles: STAFF,
    },
    DocumentRule {
        kind: DocumentType::Quotation,
        title: "Quotation",
        gate: Gate::ApprovedAndAssigned,
        existence: Existence::Reference,
        create_route: Some("/projects/{project}/quotation/create"),
        view_route: "/quotations/{ref}",
        roles: STAFF,
    },
    DocumentRule {
        kind: DocumentType::Lpo,
        title: "Local Purchase Order",
        gate: Gate::StatusAtLeast(ProjectStatus::QuotationSent),
        existence: Existence::Reference,
        create_route: Some("/projects/{project}/lpo/create"),
        view_route: "/lpos/{ref}",
        roles: STAFF,
    },
    DocumentRule {
        kind: DocumentType::WorkProgress,
        title: "Work Progress",
        gate: Gate::StatusAtLeast(ProjectStatus::LpoReceived),
        existence: Existence::Reference,
        create_route: Some("/projects/{project}/work-progress/create"),
        view_route: "/work-progress/{ref}",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Finance, Role::Engineer, Role::Driver],
    },
    DocumentRule {
        kind: DocumentType::WorkCompletion,
        title: "Work Completion Report",
        gate: Gate::StatusIs(ProjectStatus::WorkCompleted),
        existence: Existence::Always,
        create_route: None,
        view_route: "/projects/{project}/work-completion",
        roles: STAFF,
    },
    DocumentRule {
        kind: DocumentType::Invoice,
        title: "Invoice",
        gate: Gate::StatusIs(ProjectStatus::WorkCompleted),
        existence: Existence::Reference,
        create_route: None,
        view_route: "/invoices/{ref}",
        roles: &[Role::SuperAdmin, Role::Admin, Role::Finance],
    },
];

impl DocumentRule {
    pub fn rule_for(kind: DocumentType) -> &'static DocumentRule {
        let index = match kind {
            DocumentType::Estimation => 0,
            DocumentType::Quotation => 1,
            DocumentType::Lpo => 2,
            DocumentType::WorkProgress => 3,
            DocumentType::WorkCompletion => 4,
            DocumentType::Invoice => 5,
        };
        &DOCUMENT_TABLE[index]
    }

    pub fn is_view_only(&self) -> bool {
        self.create_route.is_none()
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Build the card for a project that passed this rule's gate.
    pub fn card(&self, project: &ProjectState) -> DocumentCard {
        let reference = reference_for(project, self.kind);
        let exists = match self.existence {
            Existence::Always => true,
            Existence::Reference => reference.is_some(),
        };

        let fill = |template: &str| {
            template
                .replace("{project}", project.id.as_str())
                .replace("{ref}", reference.unwrap_or_default())
        };

        let (status, amount) = if exists {
            details_for(project, self.kind)
        } else {
            (None, None)
        };

        DocumentCard {
            kind: self.kind,
            title: self.title.to_string(),
            exists,
            route: if exists { None } else { self.create_route.map(|t| fill(t)) },
            view_route: if exists { Some(fill(self.view_route)) } else { None },
            status,
            amount,
        }
    }
}

fn reference_for(project: &ProjectState, kind: DocumentType) -> Option<&str> {
    match kind {
        DocumentType::Estimation => project.estimation_id.as_ref().map(|id| id.as_str()),
        DocumentType::Quotation => project.quotation_id.as_ref().map(|id| id.as_str()),
        DocumentType::Lpo => project.lpo_id.as_ref().map(|id| id.as_str()),
        DocumentType::WorkProgress => project.work_progress_ref.as_ref().map(|r| r.as_str()),
        DocumentType::Invoice => project.invoice_ref.as_ref().map(|r| r.as_str()),
        DocumentType::WorkCompletion => None,
    }
}

fn details_for(project: &ProjectState, kind: DocumentType) -> (Option<String>, Option<Decimal>) {
    match kind {
        DocumentType::Estimation => (
            Some(project.review_status().as_str().to_string()),
            project.estimated_amount,
        ),
        DocumentType::Quotation => (None, project.quotation_amount),
        _ => (None, None),
    }
}

/// Descriptor of one document as offered to the caller.
///
/// `view_route` is set iff `exists`; `route` (creation) is set iff the
/// document does not exist and is not view-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCard {
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub title: String,
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}
