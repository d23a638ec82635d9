//! Gated project actions.
//!
//! Fetches a snapshot from the [`ProjectService`], lets the review state
//! machine decide, and only then forwards the write. Returns the recorded
//! review event so callers can keep an approval history.

use chrono::{DateTime, Utc};
use thiserror::Error;

use sitedesk_auth::{Action, Role, authorize};
use sitedesk_core::{AggregateRoot, DomainError, EngineerId, ProjectId};
use sitedesk_events::{EventEnvelope, execute};

use crate::document::DocumentCard;
use crate::resolver::resolve_documents;
use crate::review::{DecideApproval, EstimationReview, RequestVerification, ReviewCommand, ReviewEvent};
use crate::service::{Engineer, EngineerDirectory, ProjectService, ServiceError};

const REVIEW_AGGREGATE: &str = "estimation_review";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("project {0} has no estimation yet")]
    NoEstimation(ProjectId),
}

pub struct ProjectActions<S> {
    service: S,
}

impl<S> ProjectActions<S>
where
    S: ProjectService + EngineerDirectory,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Document cards for the current snapshot of a project.
    pub fn documents(
        &self,
        project_id: &ProjectId,
        role: Role,
    ) -> Result<Vec<DocumentCard>, ActionError> {
        let project = self.service.project(project_id)?;
        Ok(resolve_documents(&project, role))
    }

    /// Engineers that can be offered in the assignment picker.
    pub fn assignable_engineers(&self) -> Result<Vec<Engineer>, ActionError> {
        Ok(self.service.engineers()?)
    }

    pub fn request_verification(
        &self,
        project_id: &ProjectId,
        role: Role,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<EventEnvelope<ReviewEvent>, ActionError> {
        let mut review = self.review(project_id)?;
        let command = ReviewCommand::RequestVerification(RequestVerification {
            estimation_id: review.id().clone(),
            role,
            comment,
            occurred_at: now,
        });
        let event = self.decide(&mut review, &command, project_id)?;

        if let ReviewEvent::Verified(e) = &event {
            self.service
                .set_checked(&e.estimation_id, true, e.comment.as_deref())?;
        }
        tracing::info!(project_id = %project_id, %role, "estimation verified");
        Ok(EventEnvelope::record(REVIEW_AGGREGATE, review.version(), event))
    }

    pub fn decide_approval(
        &self,
        project_id: &ProjectId,
        role: Role,
        approved: bool,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<EventEnvelope<ReviewEvent>, ActionError> {
        let mut review = self.review(project_id)?;
        let command = ReviewCommand::DecideApproval(DecideApproval {
            estimation_id: review.id().clone(),
            role,
            approved,
            comment,
            occurred_at: now,
        });
        let event = self.decide(&mut review, &command, project_id)?;

        match &event {
            ReviewEvent::Approved(e) => {
                self.service
                    .set_approval(&e.estimation_id, true, e.comment.as_deref())?;
                tracing::info!(project_id = %project_id, %role, "estimation approved");
            }
            ReviewEvent::Rejected(e) => {
                self.service
                    .set_approval(&e.estimation_id, false, Some(&e.comment))?;
                tracing::info!(project_id = %project_id, %role, "estimation rejected");
            }
            ReviewEvent::Verified(_) => {}
        }
        Ok(EventEnvelope::record(REVIEW_AGGREGATE, review.version(), event))
    }

    /// Assign an engineer once the estimation is approved.
    pub fn assign_engineer(
        &self,
        project_id: &ProjectId,
        role: Role,
        engineer_id: &EngineerId,
    ) -> Result<(), ActionError> {
        if let Err(err) = authorize(role, Action::AssignEngineer) {
            tracing::warn!(project_id = %project_id, %role, error = %err, "assignment denied");
            return Err(DomainError::Unauthorized.into());
        }

        let project = self.service.project(project_id)?;
        if !project.is_approved {
            tracing::warn!(project_id = %project_id, %role, "assignment before approval");
            return Err(DomainError::invariant(
                "estimation must be approved before assigning an engineer",
            )
            .into());
        }

        let known = self
            .service
            .engineers()?
            .iter()
            .any(|engineer| &engineer.id == engineer_id);
        if !known {
            return Err(DomainError::not_found(format!("engineer {engineer_id}")).into());
        }

        self.service.assign_engineer(project_id, engineer_id)?;
        tracing::info!(project_id = %project_id, engineer_id = %engineer_id, "engineer assigned");
        Ok(())
    }

    fn review(&self, project_id: &ProjectId) -> Result<EstimationReview, ActionError> {
        let project = self.service.project(project_id)?;
        EstimationReview::from_project(&project)
            .ok_or_else(|| ActionError::NoEstimation(project_id.clone()))
    }

    fn decide(
        &self,
        review: &mut EstimationReview,
        command: &ReviewCommand,
        project_id: &ProjectId,
    ) -> Result<ReviewEvent, ActionError> {
        let events = execute(review, command).map_err(|err| {
            if err.is_authorization() {
                tracing::warn!(project_id = %project_id, "review command denied for role");
            } else {
                tracing::warn!(project_id = %project_id, error = %err, "review command rejected");
            }
            err
        })?;
        events
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::invariant("review command produced no event").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;
    use crate::project::ProjectState;
    use crate::service::InMemoryProjectService;
    use sitedesk_core::EstimationId;

    fn project_id() -> ProjectId {
        ProjectId::new("P-7").unwrap()
    }

    fn engineer_id() -> EngineerId {
        EngineerId::new("ENG-3").unwrap()
    }

    fn actions() -> ProjectActions<InMemoryProjectService> {
        let mut project = ProjectState::new(project_id());
        project.estimation_id = Some(EstimationId::new("E-7").unwrap());
        let service = InMemoryProjectService::with_projects([project]);
        service.add_engineer(Engineer {
            id: engineer_id(),
            name: "Rashid".to_string(),
            email: Some("rashid@example.com".to_string()),
            phone: None,
        });
        ProjectActions::new(service)
    }

    #[test]
    fn full_review_then_assignment_unlocks_quotation() {
        let actions = actions();
        let now = Utc::now();

        let verified = actions
            .request_verification(&project_id(), Role::Engineer, None, now)
            .unwrap();
        assert_eq!(verified.event_type(), "estimation.review.verified");
        assert_eq!(verified.schema_version(), 1);
        assert_eq!(verified.occurred_at(), now);
        assert_eq!(verified.sequence_number(), 1);
        assert_eq!(verified.aggregate_id(), "E-7");

        let approved = actions
            .decide_approval(&project_id(), Role::Admin, true, Some("go".to_string()), now)
            .unwrap();
        assert_eq!(approved.sequence_number(), 2);

        let before: Vec<_> = actions
            .documents(&project_id(), Role::Admin)
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(before, vec![DocumentType::Estimation]);

        actions
            .assign_engineer(&project_id(), Role::Admin, &engineer_id())
            .unwrap();
        let after: Vec<_> = actions
            .documents(&project_id(), Role::Admin)
            .unwrap()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(after, vec![DocumentType::Estimation, DocumentType::Quotation]);
    }

    #[test]
    fn verification_comment_reaches_the_project_service() {
        let actions = actions();
        let envelope = actions
            .request_verification(
                &project_id(),
                Role::Engineer,
                Some("  rates checked against supplier list ".to_string()),
                Utc::now(),
            )
            .unwrap();
        assert!(matches!(
            envelope.payload(),
            ReviewEvent::Verified(e) if e.comment.as_deref() == Some("rates checked against supplier list")
        ));

        let project = actions.service().project(&project_id()).unwrap();
        assert!(project.is_checked);
        assert_eq!(
            project.verification_comment.as_deref(),
            Some("rates checked against supplier list")
        );
    }

    #[test]
    fn approval_before_verification_leaves_project_untouched() {
        let actions = actions();
        let err = actions
            .decide_approval(&project_id(), Role::Admin, true, None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, ActionError::Domain(DomainError::InvariantViolation(_))));

        let project = actions.service().project(&project_id()).unwrap();
        assert!(!project.is_approved);
        assert!(!project.is_checked);
    }

    #[test]
    fn assignment_requires_approval_and_a_known_engineer() {
        let actions = actions();
        let err = actions
            .assign_engineer(&project_id(), Role::Admin, &engineer_id())
            .unwrap_err();
        assert!(matches!(err, ActionError::Domain(DomainError::InvariantViolation(_))));

        let err = actions
            .assign_engineer(&project_id(), Role::Finance, &engineer_id())
            .unwrap_err();
        assert_eq!(err, ActionError::Domain(DomainError::Unauthorized));

        actions
            .request_verification(&project_id(), Role::Admin, None, Utc::now())
            .unwrap();
        actions
            .decide_approval(&project_id(), Role::SuperAdmin, true, None, Utc::now())
            .unwrap();
        let err = actions
            .assign_engineer(&project_id(), Role::Admin, &EngineerId::new("ENG-404").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::Domain(DomainError::not_found("engineer ENG-404"))
        );
    }

    #[test]
    fn project_without_estimation_cannot_be_reviewed() {
        let service = InMemoryProjectService::with_projects([ProjectState::new(project_id())]);
        let actions = ProjectActions::new(service);
        let err = actions
            .request_verification(&project_id(), Role::Admin, None, Utc::now())
            .unwrap_err();
        assert_eq!(err, ActionError::NoEstimation(project_id()));
    }
}
