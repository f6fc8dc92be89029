//! Lowering Rust values into [`Value`]

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::{StructValue, Value};

/// Types that can describe themselves as a runtime [`Value`].
///
/// Implementations exist for primitives, strings, `Option` (a nullable
/// pointer), `Box` (a non-nil pointer), sequences and maps. Structs implement
/// it by building a [`StructValue`].
///
/// # Examples
///
/// ```
/// use plumbline::value::{Reflect, Value};
///
/// assert_eq!(7u16.reflect(), Value::Uint(7));
/// assert_eq!(None::<i32>.reflect(), Value::Pointer(None));
/// assert_eq!(
///     vec!["a"].reflect(),
///     Value::Slice(vec![Value::String("a".into())])
/// );
/// ```
pub trait Reflect {
    /// Produce the runtime representation of `self`.
    fn reflect(&self) -> Value;
}

macro_rules! impl_reflect_as {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl Reflect for $t {
                #[inline]
                fn reflect(&self) -> Value {
                    Value::$variant(*self as $target)
                }
            }
        )+
    };
}

impl_reflect_as!(Int as i64: i8, i16, i32, i64, isize);
impl_reflect_as!(Uint as u64: u8, u16, u32, u64, usize);
impl_reflect_as!(Float as f64: f32, f64);

impl Reflect for bool {
    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

// Unit carries no value; reporting it records an invalid kind.
impl Reflect for () {
    fn reflect(&self) -> Value {
        Value::Invalid
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl Reflect for StructValue {
    fn reflect(&self) -> Value {
        Value::Struct(self.clone())
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        Value::Pointer(self.as_ref().map(|v| Box::new(v.reflect())))
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        Value::Pointer(Some(Box::new((**self).reflect())))
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value {
        Value::Slice(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        Value::Array(self.iter().map(Reflect::reflect).collect())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect())
    }
}

// Hash order is not stable between runs; namespaces built from map keys must be.
// Keys sort the way a `BTreeMap` of the same key type would.
impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value {
        let mut entries: Vec<(Value, Value)> = self
            .iter()
            .map(|(k, v)| (k.reflect(), v.reflect()))
            .collect();
        entries.sort_by_cached_key(|(k, _)| KeyOrder::of(k));
        Value::Map(entries)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum KeyOrder {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
}

impl KeyOrder {
    fn of(key: &Value) -> Self {
        match key {
            Value::Bool(b) => KeyOrder::Bool(*b),
            Value::Int(n) => KeyOrder::Int(*n),
            Value::Uint(n) => KeyOrder::Uint(*n),
            Value::Pointer(Some(inner)) => KeyOrder::of(inner),
            other => KeyOrder::Text(other.to_string()),
        }
    }
}
