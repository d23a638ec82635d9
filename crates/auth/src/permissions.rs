use serde::{Deserialize, Serialize};

use crate::Role;

/// Role-restricted write action on a project.
///
/// Which roles may attempt an action is a static table; whether the action is
/// currently possible also depends on project state, which callers check
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RequestVerification,
    RequestApproval,
    AssignEngineer,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::RequestVerification,
        Action::RequestApproval,
        Action::AssignEngineer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RequestVerification => "request_verification",
            Action::RequestApproval => "request_approval",
            Action::AssignEngineer => "assign_engineer",
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Action::RequestVerification => &[Role::SuperAdmin, Role::Admin, Role::Engineer],
            Action::RequestApproval => &[Role::SuperAdmin, Role::Admin],
            Action::AssignEngineer => &[Role::SuperAdmin, Role::Admin],
        }
    }

    pub fn is_allowed_for(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
