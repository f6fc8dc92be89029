//! Type extraction: looking through pointers and custom wrapper types

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{Kind, Value};

/// Function that unwraps a registered custom type into the value validated
/// in its place.
pub type CustomTypeFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Custom type unwrap functions keyed by struct type name.
#[derive(Clone, Default)]
pub(crate) struct CustomTypes {
    funcs: HashMap<String, CustomTypeFn>,
}

enum Step<'r> {
    Nil,
    Deref,
    Unwrap(&'r CustomTypeFn),
    Done,
}

impl CustomTypes {
    pub(crate) fn register(&mut self, type_name: &str, func: CustomTypeFn) {
        self.funcs.insert(type_name.to_string(), func);
    }

    /// Dereference `value` through pointers and registered custom types.
    ///
    /// Returns the resolved value, its kind, and whether a pointer was
    /// crossed on the way. A nil pointer resolves to `(Invalid, Invalid, true)`.
    /// Custom unwraps stop after `max_depth` applications.
    pub(crate) fn extract<'a>(
        &self,
        value: &'a Value,
        max_depth: usize,
    ) -> (Cow<'a, Value>, Kind, bool) {
        let mut current = Cow::Borrowed(value);
        let mut nullable = false;
        let mut unwraps = 0;

        loop {
            let step = match current.as_ref() {
                Value::Pointer(None) => Step::Nil,
                Value::Pointer(Some(_)) => Step::Deref,
                Value::Struct(s) => match self.funcs.get(s.type_name()) {
                    Some(func) if unwraps < max_depth => Step::Unwrap(func),
                    Some(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            type_name = %s.type_name(),
                            max_depth,
                            "custom type unwrap depth exhausted"
                        );
                        Step::Done
                    }
                    None => Step::Done,
                },
                _ => Step::Done,
            };

            current = match step {
                Step::Nil => return (Cow::Owned(Value::Invalid), Kind::Invalid, true),
                Step::Deref => {
                    nullable = true;
                    deref(current)
                }
                Step::Unwrap(func) => {
                    unwraps += 1;
                    Cow::Owned(func(current.as_ref()))
                }
                Step::Done => {
                    let kind = current.kind();
                    return (current, kind, nullable);
                }
            };
        }
    }
}

fn deref(value: Cow<'_, Value>) -> Cow<'_, Value> {
    match value {
        Cow::Borrowed(Value::Pointer(Some(inner))) => Cow::Borrowed(&**inner),
        Cow::Owned(Value::Pointer(Some(inner))) => Cow::Owned(*inner),
        other => other,
    }
}

impl fmt::Debug for CustomTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.funcs.keys().collect();
        names.sort();
        f.debug_struct("CustomTypes").field("types", &names).finish()
    }
}
