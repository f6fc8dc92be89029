//! Runtime kinds of reflected values

use std::fmt;

/// The runtime kind of a [`Value`](crate::value::Value).
///
/// `Invalid` is what a nil pointer (or any value that could not be resolved)
/// reports after type extraction.
///
/// # Examples
///
/// ```
/// use plumbline::value::{Kind, Reflect};
///
/// assert_eq!(42i32.reflect().kind(), Kind::Int);
/// assert_eq!(Some("x").reflect().kind(), Kind::Pointer);
/// assert_eq!(Kind::Invalid.to_string(), "invalid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// No concrete value could be resolved
    #[default]
    Invalid,
    /// A boolean
    Bool,
    /// A signed integer of any width
    Int,
    /// An unsigned integer of any width
    Uint,
    /// A floating point number
    Float,
    /// A UTF-8 string
    String,
    /// A nullable indirection
    Pointer,
    /// A growable sequence
    Slice,
    /// A fixed-size sequence
    Array,
    /// A keyed collection
    Map,
    /// A struct with named fields
    Struct,
}

impl Kind {
    /// Lowercase name of the kind, as used in error output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Pointer => "ptr",
            Kind::Slice => "slice",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Struct => "struct",
        }
    }

    /// Whether this kind carries a readable value.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Kind::Invalid)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
