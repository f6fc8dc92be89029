//! Semigroup trait for merging error batches
//!
//! Errors from independent runs are merged rather than replaced: a callback
//! that validates a nested value folds that run's errors into its own, and
//! [`Validation::and`](crate::Validation::and) keeps the errors of both sides.
//! The merge must be associative so the order of grouping never changes the
//! resulting order of errors.
//!
//! ```
//! use plumbline::{FieldError, Semigroup, ValidationErrors};
//!
//! let a = ValidationErrors::from(vec![FieldError::new("required", "A")]);
//! let b = ValidationErrors::from(vec![FieldError::new("required", "B")]);
//! let c = ValidationErrors::from(vec![FieldError::new("required", "C")]);
//!
//! let left = a.clone().combine(b.clone()).combine(c.clone());
//! let right = a.combine(b.combine(c));
//! assert_eq!(left, right);
//! ```

/// A type with an associative merge.
///
/// # Laws
///
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
pub trait Semigroup: Sized {
    /// Merge `other` after `self`.
    fn combine(self, other: Self) -> Self;
}
