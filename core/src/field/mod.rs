//! Field types wrapping one raw input value each.
//!
//! A field owns its raw value and never replaces it. `adjust` recomputes the
//! bounded view on every call.

pub mod image;
pub mod text;

pub trait Field {
    type Raw: ?Sized;

    type Output<'a>
    where
        Self: 'a;

    /// The value the field was constructed with.
    fn raw(&self) -> &Self::Raw;

    /// The value bounded by the field's limits.
    fn adjust(&self) -> Self::Output<'_>;
}
