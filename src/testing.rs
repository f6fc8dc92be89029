//! Assertion helpers for tests of validation code
//!
//! ```rust
//! use plumbline::prelude::*;
//! use plumbline::{assert_failure, assert_namespaces, assert_success};
//!
//! let mut validate = Validate::new();
//! validate.register_field_rule("Login", "User", "required", |v| !v.is_zero());
//!
//! let ok: Value = StructValue::new("Login").field("User", "ada").into();
//! let bad: Value = StructValue::new("Login").field("User", "").into();
//!
//! assert_success!(validate.validate_value(&ok));
//! assert_failure!(validate.validate_value(&bad));
//! assert_namespaces!(validate.validate_value(&bad), ["Login.User"]);
//! ```

/// Assert that a validation succeeded.
///
/// Panics with the reported errors otherwise.
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation failed.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a validation failed with errors at exactly these display
/// namespaces, in this order.
///
/// ```rust
/// use plumbline::{assert_namespaces, FieldError, Validation, ValidationErrors};
///
/// let v = Validation::<(), _>::failure(ValidationErrors::from(vec![
///     FieldError::new("required", "Name").with_namespace("User.Name", "User.Name"),
/// ]));
/// assert_namespaces!(v, ["User.Name"]);
/// ```
#[macro_export]
macro_rules! assert_namespaces {
    ($validation:expr, $expected:expr) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                let expected: &[&str] = &$expected;
                assert_eq!(errors.namespaces().as_slice(), expected);
            }
            $crate::Validation::Success(v) => {
                panic!(
                    "Expected Failure at {:?}, got Success: {:?}",
                    $expected, v
                );
            }
        }
    };
}
