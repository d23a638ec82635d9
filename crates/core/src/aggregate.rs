//! Aggregates: small state machines driven by commands.

/// Identity and progress of an aggregate instance.
pub trait AggregateRoot {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Count of facts applied so far; a review rebuilt from a snapshot starts
    /// at the number of facts the snapshot shows.
    fn version(&self) -> u64;
}

/// Decide/apply split.
///
/// `handle` inspects state and returns the events a command produces, or
/// refuses it. `apply` folds one event into state and bumps `version` by one.
/// Only `apply` mutates.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    fn apply(&mut self, event: &Self::Event);

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}
