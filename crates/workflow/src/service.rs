//! Collaborator seams: the project service and the engineer directory.
//!
//! The workflow decides whether a write is permitted; implementations of
//! these traits perform it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sitedesk_core::{EngineerId, EstimationId, ProjectId};

use crate::project::ProjectState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("estimation {0} not found")]
    EstimationNotFound(EstimationId),

    #[error("project service unavailable: {0}")]
    Unavailable(String),
}

/// Read and write access to project snapshots.
pub trait ProjectService: Send + Sync {
    fn project(&self, project_id: &ProjectId) -> Result<ProjectState, ServiceError>;

    fn assign_engineer(
        &self,
        project_id: &ProjectId,
        engineer_id: &EngineerId,
    ) -> Result<(), ServiceError>;

    fn set_approval(
        &self,
        estimation_id: &EstimationId,
        approved: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError>;

    fn set_checked(
        &self,
        estimation_id: &EstimationId,
        checked: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError>;
}

/// Assignable engineer, as listed for the assignment picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: EngineerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

pub trait EngineerDirectory: Send + Sync {
    fn engineers(&self) -> Result<Vec<Engineer>, ServiceError>;
}

impl<S> ProjectService for Arc<S>
where
    S: ProjectService + ?Sized,
{
    fn project(&self, project_id: &ProjectId) -> Result<ProjectState, ServiceError> {
        (**self).project(project_id)
    }

    fn assign_engineer(
        &self,
        project_id: &ProjectId,
        engineer_id: &EngineerId,
    ) -> Result<(), ServiceError> {
        (**self).assign_engineer(project_id, engineer_id)
    }

    fn set_approval(
        &self,
        estimation_id: &EstimationId,
        approved: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError> {
        (**self).set_approval(estimation_id, approved, comment)
    }

    fn set_checked(
        &self,
        estimation_id: &EstimationId,
        checked: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError> {
        (**self).set_checked(estimation_id, checked, comment)
    }
}

impl<D> EngineerDirectory for Arc<D>
where
    D: EngineerDirectory + ?Sized,
{
    fn engineers(&self) -> Result<Vec<Engineer>, ServiceError> {
        (**self).engineers()
    }
}

/// In-memory project service for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProjectService {
    projects: RwLock<HashMap<ProjectId, ProjectState>>,
    engineers: RwLock<Vec<Engineer>>,
}

impl InMemoryProjectService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: impl IntoIterator<Item = ProjectState>) -> Self {
        let service = Self::new();
        for project in projects {
            service.upsert(project);
        }
        service
    }

    /// Insert or replace a snapshot.
    pub fn upsert(&self, project: ProjectState) {
        if let Ok(mut guard) = self.projects.write() {
            guard.insert(project.id.clone(), project);
        }
    }

    pub fn add_engineer(&self, engineer: Engineer) {
        if let Ok(mut guard) = self.engineers.write() {
            guard.push(engineer);
        }
    }

    fn update_by_estimation(
        &self,
        estimation_id: &EstimationId,
        update: impl FnOnce(&mut ProjectState),
    ) -> Result<(), ServiceError> {
        let mut guard = self
            .projects
            .write()
            .map_err(|_| ServiceError::Unavailable("lock poisoned".to_string()))?;
        let project = guard
            .values_mut()
            .find(|p| p.estimation_id.as_ref() == Some(estimation_id))
            .ok_or_else(|| ServiceError::EstimationNotFound(estimation_id.clone()))?;
        update(project);
        Ok(())
    }
}

impl ProjectService for InMemoryProjectService {
    fn project(&self, project_id: &ProjectId) -> Result<ProjectState, ServiceError> {
        let guard = self
            .projects
            .read()
            .map_err(|_| ServiceError::Unavailable("lock poisoned".to_string()))?;
        guard
            .get(project_id)
            .cloned()
            .ok_or_else(|| ServiceError::ProjectNotFound(project_id.clone()))
    }

    fn assign_engineer(
        &self,
        project_id: &ProjectId,
        engineer_id: &EngineerId,
    ) -> Result<(), ServiceError> {
        let mut guard = self
            .projects
            .write()
            .map_err(|_| ServiceError::Unavailable("lock poisoned".to_string()))?;
        let project = guard
            .get_mut(project_id)
            .ok_or_else(|| ServiceError::ProjectNotFound(project_id.clone()))?;
        project.assigned_to = Some(engineer_id.clone());
        Ok(())
    }

    fn set_approval(
        &self,
        estimation_id: &EstimationId,
        approved: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.update_by_estimation(estimation_id, |project| {
            project.is_approved = approved;
            project.rejection_comment = if approved {
                None
            } else {
                comment.map(str::to_string)
            };
        })
    }

    fn set_checked(
        &self,
        estimation_id: &EstimationId,
        checked: bool,
        comment: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.update_by_estimation(estimation_id, |project| {
            project.is_checked = checked;
            project.verification_comment = if checked {
                comment.map(str::to_string)
            } else {
                None
            };
        })
    }
}

impl EngineerDirectory for InMemoryProjectService {
    fn engineers(&self) -> Result<Vec<Engineer>, ServiceError> {
        self.engineers
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| ServiceError::Unavailable("lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_estimation() -> ProjectState {
        let mut p = ProjectState::new(ProjectId::new("P-1").unwrap());
        p.estimation_id = Some(EstimationId::new("E-1").unwrap());
        p
    }

    #[test]
    fn unknown_project_is_reported() {
        let service = InMemoryProjectService::new();
        let id = ProjectId::new("P-404").unwrap();
        assert_eq!(service.project(&id), Err(ServiceError::ProjectNotFound(id)));
    }

    #[test]
    fn writes_are_visible_in_later_snapshots() {
        let service = InMemoryProjectService::with_projects([project_with_estimation()]);
        let estimation = EstimationId::new("E-1").unwrap();

        service.set_checked(&estimation, true, Some("quantities match drawings")).unwrap();
        service.set_approval(&estimation, false, Some("too costly")).unwrap();
        let p = service.project(&ProjectId::new("P-1").unwrap()).unwrap();
        assert!(p.is_checked);
        assert_eq!(p.verification_comment.as_deref(), Some("quantities match drawings"));
        assert!(!p.is_approved);
        assert_eq!(p.rejection_comment.as_deref(), Some("too costly"));

        service.set_approval(&estimation, true, None).unwrap();
        let p = service.project(&ProjectId::new("P-1").unwrap()).unwrap();
        assert!(p.is_approved);
        assert_eq!(p.rejection_comment, None);
    }

    #[test]
    fn unchecking_clears_the_verification_comment() {
        let service = InMemoryProjectService::with_projects([project_with_estimation()]);
        let estimation = EstimationId::new("E-1").unwrap();
        service.set_checked(&estimation, true, Some("ok")).unwrap();
        service.set_checked(&estimation, false, Some("ignored")).unwrap();
        let p = service.project(&ProjectId::new("P-1").unwrap()).unwrap();
        assert!(!p.is_checked);
        assert_eq!(p.verification_comment, None);
    }

    #[test]
    fn unknown_estimation_is_reported() {
        let service = InMemoryProjectService::with_projects([project_with_estimation()]);
        let other = EstimationId::new("E-9").unwrap();
        assert_eq!(
            service.set_checked(&other, true, None),
            Err(ServiceError::EstimationNotFound(other))
        );
    }

    #[test]
    fn shared_service_works_through_arc() {
        let service = Arc::new(InMemoryProjectService::new());
        service.add_engineer(Engineer {
            id: EngineerId::new("ENG-1").unwrap(),
            name: "Amal".to_string(),
            email: None,
            phone: None,
        });
        let directory: Arc<dyn EngineerDirectory> = service.clone();
        assert_eq!(directory.engineers().unwrap().len(), 1);
    }
}
