//! Struct-level validation hooks
//!
//! Field rules look at one value at a time. Some rules span several fields of
//! a struct ("end must be after start", "either email or phone"), so the engine
//! also runs callbacks against whole structs. A callback receives a
//! [`StructLevel`]: a narrow view of the running validation that can answer
//! *where am I* and accept reports of *what is wrong here*.
//!
//! Reports are always relative. A callback never knows how deep its struct
//! sits in the object graph; the namespace it is given is spliced onto the
//! current position.
//!
//! There are two ways to attach a callback:
//!
//! - register a function for a type name with
//!   [`Validate::register_struct_validation`](crate::Validate::register_struct_validation);
//! - implement [`Validatable`] on the type and attach it when reflecting with
//!   [`StructValue::self_validating`](crate::value::StructValue::self_validating).
//!
//! Both kinds communicate failures only through [`StructLevel::report_error`]
//! and [`StructLevel::report_validation_errors`].
//!
//! # Examples
//!
//! ```
//! use plumbline::prelude::*;
//!
//! #[derive(Clone)]
//! struct Range {
//!     start: i64,
//!     end: i64,
//! }
//!
//! impl Validatable for Range {
//!     fn validate(&self, sl: &mut dyn StructLevel) {
//!         if self.end < self.start {
//!             sl.report_error(&self.end, "End", "end", "gtefield");
//!         }
//!     }
//! }
//!
//! impl Reflect for Range {
//!     fn reflect(&self) -> Value {
//!         StructValue::new("Range")
//!             .field("start", &self.start)
//!             .field("end", &self.end)
//!             .self_validating(self)
//!             .into()
//!     }
//! }
//!
//! let result = Validate::new().validate_struct(&Range { start: 5, end: 1 });
//! match result {
//!     Validation::Failure(errors) => {
//!         assert_eq!(errors.namespaces(), vec!["Range.End"]);
//!         assert_eq!(errors.get(0).unwrap().struct_namespace(), "Range.end");
//!     }
//!     Validation::Success(_) => panic!("expected failure"),
//! }
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::errors::ValidationErrors;
use crate::value::{Kind, Reflect, Value};
use crate::Validate;

/// Capabilities handed to struct-level callbacks.
///
/// The position accessors are only meaningful for the duration of the
/// callback invocation; do not hold on to what they return.
pub trait StructLevel {
    /// The engine running this validation, for nested validations.
    fn validator(&self) -> &Validate;

    /// The root value of the run.
    fn top(&self) -> &Value;

    /// The struct that contains the current one; the current struct itself
    /// at the root.
    fn parent(&self) -> &Value;

    /// The struct currently being validated.
    fn current(&self) -> &Value;

    /// Look through pointers and registered custom types.
    ///
    /// Returns the resolved value, its kind, and whether the original value
    /// was nullable. A nil pointer yields `Value::Invalid` with
    /// [`Kind::Invalid`]. Never fails.
    fn extract_type<'a>(&self, value: &'a Value) -> (Cow<'a, Value>, Kind, bool);

    /// Report a failure on one field of the current struct.
    ///
    /// `field_name` and `alt_name` are appended to the current display and
    /// actual namespaces; pass `"FirstName"` or `"Names[0]"` depending on
    /// nesting. An empty `alt_name` means "same as `field_name`". The tag may
    /// be any string, not only a known rule.
    fn report_error(&mut self, field: &dyn Reflect, field_name: &str, alt_name: &str, tag: &str);

    /// Merge errors produced by a separate validation into this run.
    ///
    /// Each error's own namespace is appended to the current namespace plus
    /// the given relative prefix, which is usually empty unless the nested
    /// value sits below the current struct. Order is preserved. The batch is
    /// consumed; clone it first to report it more than once.
    fn report_validation_errors(
        &mut self,
        relative_namespace: &str,
        relative_actual_namespace: &str,
        errors: ValidationErrors,
    );
}

/// A type that validates itself at struct level.
///
/// This is the same contract as a registered struct-level function, attached
/// to the type instead of the engine.
pub trait Validatable {
    /// Inspect `self` and report failures through `sl`.
    fn validate(&self, sl: &mut dyn StructLevel);
}

/// A registered struct-level validation function.
pub type StructLevelFn = Arc<dyn Fn(&mut dyn StructLevel) + Send + Sync>;

/// A [`Validatable`] implementation captured alongside a reflected struct.
#[derive(Clone)]
pub(crate) struct SelfValidation(StructLevelFn);

impl SelfValidation {
    pub(crate) fn from_shared<T>(value: Arc<T>) -> Self
    where
        T: Validatable + Send + Sync + 'static,
    {
        SelfValidation(Arc::new(move |sl: &mut dyn StructLevel| value.validate(sl)))
    }

    pub(crate) fn call(&self, sl: &mut dyn StructLevel) {
        (self.0)(sl)
    }
}

impl fmt::Debug for SelfValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelfValidation")
    }
}
