//! Runtime value model
//!
//! Validation walks values it knows nothing about at compile time, so every
//! validated type is first lowered into a [`Value`]: a tagged variant with one
//! arm per [`Kind`]. Types opt in through the [`Reflect`] trait.
//!
//! # Examples
//!
//! ```
//! use plumbline::value::{Kind, Reflect, StructValue, Value};
//!
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Reflect for User {
//!     fn reflect(&self) -> Value {
//!         StructValue::new("User")
//!             .field("Name", &self.name)
//!             .field("Age", &self.age)
//!             .into()
//!     }
//! }
//!
//! let value = User { name: "Ada".into(), age: 36 }.reflect();
//! assert_eq!(value.kind(), Kind::Struct);
//! assert_eq!(value.field("Age"), Some(&Value::Int(36)));
//! ```

mod kind;
mod reflect;

use std::fmt;
use std::sync::Arc;

use crate::struct_level::{SelfValidation, Validatable};

pub use kind::Kind;
pub use reflect::Reflect;

/// A reflected runtime value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Nothing could be resolved (the zero value of a nil pointer)
    #[default]
    Invalid,
    /// A boolean
    Bool(bool),
    /// A signed integer
    Int(i64),
    /// An unsigned integer
    Uint(u64),
    /// A floating point number
    Float(f64),
    /// A string
    String(String),
    /// A nullable indirection; `None` is nil
    Pointer(Option<Box<Value>>),
    /// A growable sequence
    Slice(Vec<Value>),
    /// A fixed-size sequence
    Array(Vec<Value>),
    /// Key/value pairs in iteration order
    Map(Vec<(Value, Value)>),
    /// A struct with named fields
    Struct(StructValue),
}

impl Value {
    /// The kind of this value, without looking through pointers.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Invalid => Kind::Invalid,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Pointer(_) => Kind::Pointer,
            Value::Slice(_) => Kind::Slice,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Struct(_) => Kind::Struct,
        }
    }

    /// A printable name for the runtime type of this value.
    ///
    /// Collections name their element type after the first element, since
    /// the value model does not carry static element types.
    ///
    /// ```
    /// use plumbline::value::Reflect;
    ///
    /// assert_eq!(vec![1u8, 2].reflect().type_name(), "[]uint");
    /// assert_eq!(Some(String::new()).reflect().type_name(), "*string");
    /// ```
    pub fn type_name(&self) -> String {
        match self {
            Value::Pointer(Some(inner)) => format!("*{}", inner.type_name()),
            Value::Pointer(None) => "*any".to_string(),
            Value::Slice(items) => format!("[]{}", element_type(items.first())),
            Value::Array(items) => format!("[{}]{}", items.len(), element_type(items.first())),
            Value::Map(entries) => match entries.first() {
                Some((k, v)) => format!("map[{}]{}", k.type_name(), v.type_name()),
                None => "map[any]any".to_string(),
            },
            Value::Struct(s) => s.type_name().to_string(),
            other => other.kind().as_str().to_string(),
        }
    }

    /// Whether this is a nil pointer.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Pointer(None))
    }

    /// Whether this value equals the zero value of its kind.
    ///
    /// Structs are never zero; a nil pointer and `Invalid` always are.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Invalid | Value::Pointer(None) => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Uint(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Slice(items) | Value::Array(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Pointer(Some(_)) | Value::Struct(_) => false,
        }
    }

    /// The struct behind this value, if it is one.
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a struct field by its actual name.
    ///
    /// Returns `None` for non-struct values.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_struct().and_then(|s| s.get(name))
    }
}

fn element_type(first: Option<&Value>) -> String {
    first.map_or_else(|| "any".to_string(), Value::type_name)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => f.write_str("<invalid>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Pointer(None) => f.write_str("<nil>"),
            Value::Pointer(Some(inner)) => write!(f, "{}", inner),
            Value::Slice(items) | Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                f.write_str("]")
            }
            Value::Struct(s) => {
                f.write_str("{")?;
                for (i, field) in s.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", field.value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Value::Struct(value)
    }
}

/// A reflected struct: its type name, ordered fields and an optional
/// self-validation hook.
#[derive(Debug, Clone)]
pub struct StructValue {
    type_name: String,
    fields: Vec<StructField>,
    hook: Option<SelfValidation>,
}

impl StructValue {
    /// Start an empty struct of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        StructValue {
            type_name: type_name.into(),
            fields: Vec::new(),
            hook: None,
        }
    }

    /// Append a field whose display name equals its actual name.
    pub fn field<T: Reflect + ?Sized>(self, name: impl Into<String>, value: &T) -> Self {
        let name = name.into();
        self.push_field(name, None, value.reflect())
    }

    /// Append a field with a display name that differs from the actual
    /// (Rust-side) name, e.g. a serialized key.
    ///
    /// ```
    /// use plumbline::value::StructValue;
    ///
    /// let s = StructValue::new("User").field_as("first_name", "firstName", "Ada");
    /// assert_eq!(s.fields()[0].name(), "first_name");
    /// assert_eq!(s.fields()[0].display_name(), "firstName");
    /// ```
    pub fn field_as<T: Reflect + ?Sized>(
        self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        value: &T,
    ) -> Self {
        let name = name.into();
        self.push_field(name, Some(display_name.into()), value.reflect())
    }

    /// Attach the type's own [`Validatable`] implementation.
    ///
    /// The value is cloned into the hook so the traversal can invoke it
    /// while walking the reflected copy. Each reflection clones the whole
    /// value, including children that attach their own hooks when they are
    /// reflected in turn. For large graphs use
    /// [`StructValue::self_validating_shared`].
    pub fn self_validating<T>(self, value: &T) -> Self
    where
        T: Validatable + Clone + Send + Sync + 'static,
    {
        self.self_validating_shared(Arc::new(value.clone()))
    }

    /// Attach a [`Validatable`] implementation held behind an `Arc`.
    ///
    /// Only the pointer is cloned, so the type need not be `Clone`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use plumbline::prelude::*;
    ///
    /// struct Catalog {
    ///     entries: Vec<String>,
    /// }
    ///
    /// impl Validatable for Catalog {
    ///     fn validate(&self, sl: &mut dyn StructLevel) {
    ///         if self.entries.is_empty() {
    ///             sl.report_error(&self.entries, "Entries", "", "min");
    ///         }
    ///     }
    /// }
    ///
    /// let catalog = Arc::new(Catalog { entries: vec![] });
    /// let value: Value = StructValue::new("Catalog")
    ///     .field("Entries", &catalog.entries)
    ///     .self_validating_shared(Arc::clone(&catalog))
    ///     .into();
    ///
    /// let errors = Validate::new().validate_value(&value).into_result().unwrap_err();
    /// assert_eq!(errors.namespaces(), vec!["Catalog.Entries"]);
    /// ```
    pub fn self_validating_shared<T>(mut self, value: Arc<T>) -> Self
    where
        T: Validatable + Send + Sync + 'static,
    {
        self.hook = Some(SelfValidation::from_shared(value));
        self
    }

    fn push_field(mut self, name: String, display_name: Option<String>, value: Value) -> Self {
        self.fields.push(StructField {
            name,
            display_name,
            value,
        });
        self
    }

    /// The struct's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    /// Look up a field value by actual name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub(crate) fn hook(&self) -> Option<&SelfValidation> {
        self.hook.as_ref()
    }
}

// The hook is behavior, not data.
impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.fields == other.fields
    }
}

/// One field of a [`StructValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    name: String,
    display_name: Option<String>,
    value: Value,
}

impl StructField {
    /// The actual field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name used in display namespaces; falls back to the actual name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// The field's value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}
