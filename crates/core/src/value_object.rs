//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Snapshots handed to the resolver and the computation engine are value
/// objects: callers replace them wholesale instead of patching them, and two
/// snapshots with the same values are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
