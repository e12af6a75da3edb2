/// Identifier for a flower planted in a [`crate::garden::Garden`].
///
/// Ids are opaque and unique for the lifetime of a `Garden`: they come from
/// a monotonic counter and are never reused, not even after a clear. They
/// carry no ordering semantics; render order is the planting order of the
/// flower list itself.
pub type FlowerId = u64;
