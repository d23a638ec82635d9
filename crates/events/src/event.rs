use chrono::{DateTime, Utc};

/// A fact recorded against one aggregate.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, e.g. `estimation.review.approved`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version.
    fn version(&self) -> u32;

    /// Identifier of the aggregate the fact belongs to.
    fn aggregate_id(&self) -> &str;

    /// Business time of the fact.
    fn occurred_at(&self) -> DateTime<Utc>;
}
