//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. A completed purchase record is a value object; a product
/// is an entity.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Purchase { base_price: i64, discount: i64, unit: i64 }
///
/// impl ValueObject for Purchase {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
