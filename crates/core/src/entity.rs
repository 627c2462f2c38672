//! Entity trait: records with a stable identity.

/// Entity marker + minimal interface.
///
/// Records are replaced wholesale on update; the id is the only thing that
/// carries over between versions of a record.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
