//! Field errors accumulated during a validation run
//!
//! A run never stops at the first failure. Every failed rule becomes one
//! [`FieldError`], addressed by its resolved namespace, and the run hands back
//! all of them as [`ValidationErrors`].
//!
//! # Examples
//!
//! ```
//! use plumbline::{FieldError, Semigroup, ValidationErrors};
//!
//! let name = FieldError::new("required", "Name").with_namespace("User.Name", "User.Name");
//! let age = FieldError::new("gte", "Age").with_namespace("User.Age", "User.Age");
//!
//! let errors = ValidationErrors::from(vec![name]).combine(ValidationErrors::from(vec![age]));
//! assert_eq!(errors.namespaces(), vec!["User.Name", "User.Age"]);
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::namespace;
use crate::value::{Kind, Value};
use crate::Semigroup;

/// One failed rule at one resolved position.
///
/// `value` and `type_name` are only present when the offending value had a
/// valid kind. `param` is always empty for errors raised from struct-level
/// callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    tag: String,
    actual_tag: String,
    namespace: String,
    struct_namespace: String,
    field: String,
    struct_field: String,
    kind: Kind,
    value: Option<Value>,
    type_name: Option<String>,
    param: String,
}

impl FieldError {
    /// Create an error for `field` failing `tag`.
    ///
    /// Both namespaces start out as the bare field name and the kind is
    /// [`Kind::Invalid`] until a value is attached.
    ///
    /// ```
    /// use plumbline::FieldError;
    /// use plumbline::value::Kind;
    ///
    /// let err = FieldError::new("required", "Email");
    /// assert_eq!(err.namespace(), "Email");
    /// assert_eq!(err.struct_field(), "Email");
    /// assert_eq!(err.kind(), Kind::Invalid);
    /// assert!(err.value().is_none());
    /// ```
    pub fn new(tag: impl Into<String>, field: impl Into<String>) -> Self {
        let tag = tag.into();
        let field = field.into();
        FieldError {
            actual_tag: tag.clone(),
            tag,
            namespace: field.clone(),
            struct_namespace: field.clone(),
            struct_field: field.clone(),
            field,
            kind: Kind::Invalid,
            value: None,
            type_name: None,
            param: String::new(),
        }
    }

    /// Set the fully resolved display and actual namespaces.
    pub fn with_namespace(
        mut self,
        namespace: impl Into<String>,
        struct_namespace: impl Into<String>,
    ) -> Self {
        self.namespace = namespace.into();
        self.struct_namespace = struct_namespace.into();
        self
    }

    /// Set the actual (struct) field name when it differs from the display one.
    pub fn with_struct_field(mut self, struct_field: impl Into<String>) -> Self {
        self.struct_field = struct_field.into();
        self
    }

    /// Set the rule identifier as written, when the reported tag is an alias.
    pub fn with_actual_tag(mut self, actual_tag: impl Into<String>) -> Self {
        self.actual_tag = actual_tag.into();
        self
    }

    /// Attach the offending value.
    ///
    /// The kind is taken from the value. Type and value are only kept when
    /// that kind is valid.
    pub fn with_value(mut self, value: Value) -> Self {
        self.kind = value.kind();
        if self.kind.is_valid() {
            self.type_name = Some(value.type_name());
            self.value = Some(value);
        } else {
            self.type_name = None;
            self.value = None;
        }
        self
    }

    /// The validation tag that failed.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The tag as originally written.
    pub fn actual_tag(&self) -> &str {
        &self.actual_tag
    }

    /// Fully resolved display namespace, e.g. `User.Name`.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fully resolved namespace built from actual field names.
    pub fn struct_namespace(&self) -> &str {
        &self.struct_namespace
    }

    /// Leaf segment of the display namespace.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Leaf segment of the actual namespace.
    pub fn struct_field(&self) -> &str {
        &self.struct_field
    }

    /// Kind of the offending value.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The offending value, when its kind is valid.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Runtime type name of the offending value, when its kind is valid.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Rule parameter. Empty for struct-level errors.
    pub fn param(&self) -> &str {
        &self.param
    }

    // Splice this error, namespaced relative to some nested value, under the
    // given absolute prefixes. A bare error without a namespace falls back to
    // its field name.
    pub(crate) fn rebase(mut self, prefix: &str, struct_prefix: &str) -> Self {
        let own = if self.namespace.is_empty() {
            &self.field
        } else {
            &self.namespace
        };
        let own_struct = if self.struct_namespace.is_empty() {
            &self.struct_field
        } else {
            &self.struct_namespace
        };
        let namespace = namespace::join(prefix, own);
        let struct_namespace = namespace::join(struct_prefix, own_struct);
        self.namespace = namespace;
        self.struct_namespace = struct_namespace;
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.namespace, self.field, self.tag
        )
    }
}

impl StdError for FieldError {}

/// All field errors of one run, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no error was reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// The error at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&FieldError> {
        self.0.get(index)
    }

    /// Display namespaces of every error, in report order.
    pub fn namespaces(&self) -> Vec<&str> {
        self.0.iter().map(FieldError::namespace).collect()
    }

    /// Borrow the errors as a slice.
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }
}

impl Semigroup for ValidationErrors {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        ValidationErrors(errors)
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        ValidationErrors(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl StdError for ValidationErrors {}
