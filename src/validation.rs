//! Outcome of a validation run
//!
//! [`Validation`] is a `Result`-like type whose failure side accumulates.
//! [`Validate`](crate::Validate) returns `Validation<(), ValidationErrors>`:
//! success carries nothing, failure carries every reported error.
//!
//! # Examples
//!
//! ```
//! use plumbline::{FieldError, Validation, ValidationErrors};
//!
//! let first = Validation::<(), _>::failure(ValidationErrors::from(vec![
//!     FieldError::new("required", "Name"),
//! ]));
//! let second = Validation::<(), _>::failure(ValidationErrors::from(vec![
//!     FieldError::new("gte", "Age"),
//! ]));
//!
//! // Both runs' errors are kept, in order.
//! let combined = first.and(second);
//! assert_eq!(combined.errors().map(|e| e.len()), Some(2));
//! ```

use crate::Semigroup;

/// Either a success value or accumulated errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Nothing failed
    Success(T),
    /// At least one error was reported
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// A successful outcome.
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// A failed outcome.
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Whether validation passed.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Whether anything was reported.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// The accumulated errors, if validation failed.
    pub fn errors(&self) -> Option<&E> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(error) => Some(error),
        }
    }

    /// Convert into a `Result` for use with `?`.
    ///
    /// ```
    /// use plumbline::Validation;
    ///
    /// let v = Validation::<_, String>::success(1);
    /// assert_eq!(v.into_result(), Ok(1));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two outcomes, keeping the errors of both when both failed.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) | (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Combine many outcomes, e.g. one per validated item.
    ///
    /// ```
    /// use plumbline::{FieldError, Validation, ValidationErrors};
    ///
    /// let outcomes = vec![
    ///     Validation::success(()),
    ///     Validation::failure(ValidationErrors::from(vec![FieldError::new("a", "A")])),
    ///     Validation::failure(ValidationErrors::from(vec![FieldError::new("b", "B")])),
    /// ];
    /// let all = Validation::all_vec(outcomes);
    /// assert_eq!(all.errors().unwrap().len(), 2);
    /// ```
    pub fn all_vec(validations: Vec<Validation<T, E>>) -> Validation<Vec<T>, E> {
        let mut successes = Vec::new();
        let mut failure: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => {
                    failure = Some(match failure {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match failure {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(successes),
        }
    }
}
