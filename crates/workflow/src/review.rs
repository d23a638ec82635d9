//! Estimation review: verification then approval.
//!
//! `is_checked` must be set (verification) before an approval decision can be
//! taken, and only administrators may decide. Both rules are enforced in
//! `handle`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sitedesk_auth::{Action, Role};
use sitedesk_core::{Aggregate, AggregateRoot, DomainError, EstimationId};
use sitedesk_events::{Command, Event};

use crate::project::ProjectState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected { comment: String },
}

/// Aggregate root: review of one estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationReview {
    id: EstimationId,
    is_checked: bool,
    approval: ApprovalState,
    version: u64,
}

impl EstimationReview {
    pub fn new(id: EstimationId) -> Self {
        Self {
            id,
            is_checked: false,
            approval: ApprovalState::Pending,
            version: 0,
        }
    }

    /// Rebuild the review from a project snapshot.
    ///
    /// Returns `None` when the project has no estimation yet. The version
    /// counts the review facts visible in the snapshot.
    pub fn from_project(project: &ProjectState) -> Option<Self> {
        let id = project.estimation_id.clone()?;
        let approval = if project.is_approved {
            ApprovalState::Approved
        } else if let Some(comment) = &project.rejection_comment {
            ApprovalState::Rejected {
                comment: comment.clone(),
            }
        } else {
            ApprovalState::Pending
        };
        let version = u64::from(project.is_checked) + u64::from(approval != ApprovalState::Pending);

        Some(Self {
            id,
            is_checked: project.is_checked,
            approval,
            version,
        })
    }

    pub fn is_checked(&self) -> bool {
        self.is_checked
    }

    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }

    pub fn approval(&self) -> &ApprovalState {
        &self.approval
    }

    pub fn can_request_verification(&self, role: Role) -> bool {
        Action::RequestVerification.is_allowed_for(role) && !self.is_checked
    }

    pub fn can_request_approval(&self, role: Role) -> bool {
        Action::RequestApproval.is_allowed_for(role) && self.is_checked && !self.is_approved()
    }
}

impl AggregateRoot for EstimationReview {
    type Id = EstimationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: mark the estimation as checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestVerification {
    pub estimation_id: EstimationId,
    pub role: Role,
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: approve or reject a checked estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecideApproval {
    pub estimation_id: EstimationId,
    pub role: Role,
    pub approved: bool,
    /// Required when rejecting.
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewCommand {
    RequestVerification(RequestVerification),
    DecideApproval(DecideApproval),
}

impl ReviewCommand {
    pub fn estimation_id(&self) -> &EstimationId {
        match self {
            ReviewCommand::RequestVerification(cmd) => &cmd.estimation_id,
            ReviewCommand::DecideApproval(cmd) => &cmd.estimation_id,
        }
    }
}

impl Command for ReviewCommand {
    fn target_aggregate_id(&self) -> &str {
        self.estimation_id().as_str()
    }
}

/// Event: EstimationVerified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationVerified {
    pub estimation_id: EstimationId,
    pub role: Role,
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: EstimationApproved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationApproved {
    pub estimation_id: EstimationId,
    pub role: Role,
    pub comment: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: EstimationRejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRejected {
    pub estimation_id: EstimationId,
    pub role: Role,
    pub comment: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewEvent {
    Verified(EstimationVerified),
    Approved(EstimationApproved),
    Rejected(EstimationRejected),
}

impl Event for ReviewEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ReviewEvent::Verified(_) => "estimation.review.verified",
            ReviewEvent::Approved(_) => "estimation.review.approved",
            ReviewEvent::Rejected(_) => "estimation.review.rejected",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> &str {
        match self {
            ReviewEvent::Verified(e) => e.estimation_id.as_str(),
            ReviewEvent::Approved(e) => e.estimation_id.as_str(),
            ReviewEvent::Rejected(e) => e.estimation_id.as_str(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ReviewEvent::Verified(e) => e.occurred_at,
            ReviewEvent::Approved(e) => e.occurred_at,
            ReviewEvent::Rejected(e) => e.occurred_at,
        }
    }
}

impl Aggregate for EstimationReview {
    type Command = ReviewCommand;
    type Event = ReviewEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ReviewEvent::Verified(_) => {
                self.is_checked = true;
            }
            ReviewEvent::Approved(_) => {
                self.approval = ApprovalState::Approved;
            }
            ReviewEvent::Rejected(e) => {
                self.approval = ApprovalState::Rejected {
                    comment: e.comment.clone(),
                };
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if command.estimation_id() != &self.id {
            return Err(DomainError::conflict("estimation_id mismatch"));
        }
        match command {
            ReviewCommand::RequestVerification(cmd) => self.handle_verification(cmd),
            ReviewCommand::DecideApproval(cmd) => self.handle_approval(cmd),
        }
    }
}

impl EstimationReview {
    fn handle_verification(
        &self,
        cmd: &RequestVerification,
    ) -> Result<Vec<ReviewEvent>, DomainError> {
        if !Action::RequestVerification.is_allowed_for(cmd.role) {
            return Err(DomainError::Unauthorized);
        }
        if self.is_checked {
            return Err(DomainError::invariant("estimation is already verified"));
        }

        Ok(vec![ReviewEvent::Verified(EstimationVerified {
            estimation_id: cmd.estimation_id.clone(),
            role: cmd.role,
            comment: normalize_comment(cmd.comment.as_deref()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_approval(&self, cmd: &DecideApproval) -> Result<Vec<ReviewEvent>, DomainError> {
        if !Action::RequestApproval.is_allowed_for(cmd.role) {
            return Err(DomainError::Unauthorized);
        }
        if !self.is_checked {
            return Err(DomainError::invariant(
                "estimation must be verified before approval",
            ));
        }
        if self.is_approved() {
            return Err(DomainError::invariant("estimation is already approved"));
        }

        let comment = normalize_comment(cmd.comment.as_deref());
        if cmd.approved {
            return Ok(vec![ReviewEvent::Approved(EstimationApproved {
                estimation_id: cmd.estimation_id.clone(),
                role: cmd.role,
                comment,
                occurred_at: cmd.occurred_at,
            })]);
        }

        let comment =
            comment.ok_or_else(|| DomainError::validation("rejection requires a comment"))?;
        Ok(vec![ReviewEvent::Rejected(EstimationRejected {
            estimation_id: cmd.estimation_id.clone(),
            role: cmd.role,
            comment,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Review and assignment actions currently open to `role` on `project`.
///
/// Actions whose preconditions do not hold are absent rather than reported as
/// errors.
pub fn permitted_actions(project: &ProjectState, role: Role) -> Vec<Action> {
    let Some(review) = EstimationReview::from_project(project) else {
        return Vec::new();
    };

    let mut actions = Vec::new();
    if review.can_request_verification(role) {
        actions.push(Action::RequestVerification);
    }
    if review.can_request_approval(role) {
        actions.push(Action::RequestApproval);
    }
    if Action::AssignEngineer.is_allowed_for(role) && review.is_approved() {
        actions.push(Action::AssignEngineer);
    }
    actions
}
