//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values,
/// e.g. slab `Dimensions { width: 3.0, height: 2.0, thickness: 2.0 }` or a
/// postal `Address`. Two slabs with the same dimensions have the same area no
/// matter which record they belong to.
///
/// Value objects are immutable: to "change" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
