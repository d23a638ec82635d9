/// A command targets a specific aggregate (command abstraction).
///
/// Commands represent **intent**: a request to perform an action on an
/// aggregate. They are transient and are turned into events, or rejected.
///
/// - **Command**: "approve estimation E-17"
/// - **Event**: "estimation E-17 was approved by admin"
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Identifier of the aggregate this command is routed to.
    fn target_aggregate_id(&self) -> &str;
}
