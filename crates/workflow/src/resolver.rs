use sitedesk_auth::Role;

use crate::document::{DOCUMENT_TABLE, DocumentCard};
use crate::project::ProjectState;

/// Derive the ordered document cards a caller may see for a project.
///
/// Walks [`DOCUMENT_TABLE`] in order, keeping rows whose gate admits the
/// snapshot and whose allow-list contains `role`. Total and side-effect free:
/// an action that is not yet possible is simply absent from the output.
pub fn resolve_documents(project: &ProjectState, role: Role) -> Vec<DocumentCard> {
    DOCUMENT_TABLE
        .iter()
        .filter(|rule| rule.gate.admits(project) && rule.allows(role))
        .map(|rule| rule.card(project))
        .collect()
}
