use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use sitedesk_core::{
    EngineerId, EstimationId, InvoiceRef, LpoId, ProjectId, QuotationId, ValueObject,
    WorkProgressRef,
};

/// Project lifecycle status, in lifecycle order.
///
/// Missing or unrecognised values deserialize to `Draft`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    QuotationSent,
    LpoReceived,
    WorkStarted,
    InProgress,
    WorkCompleted,
    InvoiceSent,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        ProjectStatus::Draft,
        ProjectStatus::QuotationSent,
        ProjectStatus::LpoReceived,
        ProjectStatus::WorkStarted,
        ProjectStatus::InProgress,
        ProjectStatus::WorkCompleted,
        ProjectStatus::InvoiceSent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::QuotationSent => "quotation_sent",
            ProjectStatus::LpoReceived => "lpo_received",
            ProjectStatus::WorkStarted => "work_started",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::WorkCompleted => "work_completed",
            ProjectStatus::InvoiceSent => "invoice_sent",
        }
    }

    /// Parse a status, treating anything unrecognised as `Draft`.
    pub fn parse_lossy(raw: &str) -> ProjectStatus {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ProjectStatus::ALL
            .into_iter()
            .find(|s| s.as_str() == normalized)
            .unwrap_or_default()
    }
}

impl core::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LossyStatusVisitor)
    }
}

/// Accepts any value; only a recognised string maps to a non-draft status.
struct LossyStatusVisitor;

impl<'de> Visitor<'de> for LossyStatusVisitor {
    type Value = ProjectStatus;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a project status")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ProjectStatus::parse_lossy(value))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ProjectStatus::Draft)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ProjectStatus::Draft)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(ProjectStatus::Draft)
    }
}

/// Review progress of a project's estimation, as shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Checked,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Checked => "checked",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Read-only project snapshot as supplied by the project service.
///
/// Presence of a reference is the only signal that the referenced document
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectState {
    pub id: ProjectId,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimation_id: Option<EstimationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_id: Option<QuotationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lpo_id: Option<LpoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_progress_ref: Option<WorkProgressRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_ref: Option<InvoiceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<EngineerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotation_amount: Option<Decimal>,
}

impl ValueObject for ProjectState {}

impl ProjectState {
    /// A freshly intaken project: draft, nothing created yet.
    pub fn new(id: ProjectId) -> Self {
        Self {
            id,
            status: ProjectStatus::Draft,
            is_approved: false,
            is_checked: false,
            verification_comment: None,
            rejection_comment: None,
            estimation_id: None,
            quotation_id: None,
            lpo_id: None,
            work_progress_ref: None,
            invoice_ref: None,
            assigned_to: None,
            estimated_amount: None,
            quotation_amount: None,
        }
    }

    pub fn review_status(&self) -> ReviewStatus {
        if self.is_approved {
            ReviewStatus::Approved
        } else if self.rejection_comment.is_some() {
            ReviewStatus::Rejected
        } else if self.is_checked {
            ReviewStatus::Checked
        } else {
            ReviewStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_ordered_along_the_lifecycle() {
        assert!(ProjectStatus::Draft < ProjectStatus::QuotationSent);
        assert!(ProjectStatus::LpoReceived < ProjectStatus::WorkCompleted);
        assert!(ProjectStatus::WorkCompleted < ProjectStatus::InvoiceSent);
    }

    #[test]
    fn unknown_or_missing_status_is_draft() {
        let p: ProjectState = serde_json::from_str(r#"{"id":"P-1","status":"archived"}"#).unwrap();
        assert_eq!(p.status, ProjectStatus::Draft);

        let p: ProjectState = serde_json::from_str(r#"{"id":"P-1","status":null}"#).unwrap();
        assert_eq!(p.status, ProjectStatus::Draft);

        let p: ProjectState = serde_json::from_str(r#"{"id":"P-1"}"#).unwrap();
        assert_eq!(p.status, ProjectStatus::Draft);
    }

    #[test]
    fn non_string_status_is_draft() {
        for raw in ["3", "-1", "2.5", "true", "{}", r#"{"code":"lpo_received"}"#, r#"["work_started"]"#] {
            let json = format!(r#"{{"id":"P-1","status":{raw},"estimationId":"E-1"}}"#);
            let p: ProjectState = serde_json::from_str(&json).unwrap();
            assert_eq!(p.status, ProjectStatus::Draft, "{raw}");
            assert_eq!(p.estimation_id.unwrap().as_str(), "E-1", "{raw}");
        }
    }

    #[test]
    fn known_status_spellings_are_accepted() {
        assert_eq!(ProjectStatus::parse_lossy("LPO_RECEIVED"), ProjectStatus::LpoReceived);
        assert_eq!(ProjectStatus::parse_lossy("work-completed"), ProjectStatus::WorkCompleted);
        assert_eq!(ProjectStatus::parse_lossy("in progress"), ProjectStatus::InProgress);
    }

    #[test]
    fn snapshot_uses_camel_case_fields() {
        let p: ProjectState = serde_json::from_str(
            r#"{"id":"P-9","status":"work_started","isApproved":true,"isChecked":true,
                "estimationId":"E-9","assignedTo":"ENG-2"}"#,
        )
        .unwrap();
        assert!(p.is_approved && p.is_checked);
        assert_eq!(p.estimation_id.unwrap().as_str(), "E-9");
        assert_eq!(p.assigned_to.unwrap().as_str(), "ENG-2");
        assert_eq!(p.status, ProjectStatus::WorkStarted);
    }

    #[test]
    fn review_status_prefers_approval_over_rejection() {
        let mut p = ProjectState::new(ProjectId::new("P-1").unwrap());
        assert_eq!(p.review_status(), ReviewStatus::Pending);
        p.is_checked = true;
        assert_eq!(p.review_status(), ReviewStatus::Checked);
        p.rejection_comment = Some("missing scaffolding".to_string());
        assert_eq!(p.review_status(), ReviewStatus::Rejected);
        p.is_approved = true;
        assert_eq!(p.review_status(), ReviewStatus::Approved);
    }
}
