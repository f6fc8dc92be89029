//! The validation engine
//!
//! [`Validate`] holds everything that is configured once: struct-level
//! functions, custom type unwraps and per-field rules. Each call to
//! [`Validate::validate_struct`] walks the value depth-first with a fresh
//! context, so one engine can serve any number of runs, including runs
//! started from inside a struct-level callback.
//!
//! # Examples
//!
//! ```
//! use plumbline::prelude::*;
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
//! let mut validate = Validate::new();
//! validate.register_struct_validation(
//!     |sl: &mut dyn StructLevel| {
//!         let age = sl.current().field("Age").cloned().unwrap_or_default();
//!         if age == Value::Int(-1) {
//!             sl.report_error(&age, "Age", "Age", "gte");
//!         }
//!     },
//!     &["User"],
//! );
//!
//! let result = validate.validate_struct(&User { name: "Ada".into(), age: -1 });
//! assert_eq!(result.into_result().unwrap_err().namespaces(), vec!["User.Age"]);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::context::ValidationContext;
use crate::errors::ValidationErrors;
use crate::extract::{CustomTypeFn, CustomTypes};
use crate::struct_level::{StructLevel, StructLevelFn};
use crate::value::{Kind, Reflect, Value};
use crate::Validation;

type FieldCheckFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A per-field check registered for one field of one struct type.
#[derive(Clone)]
pub(crate) struct FieldRule {
    field: String,
    tag: String,
    check: FieldCheckFn,
}

impl FieldRule {
    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

/// Validation engine: registries plus the traversal entry points.
#[derive(Clone, Default)]
pub struct Validate {
    config: Config,
    struct_level: HashMap<String, StructLevelFn>,
    custom_types: CustomTypes,
    field_rules: HashMap<String, Vec<FieldRule>>,
}

impl Validate {
    /// An engine with the default [`Config`] and nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Validate {
            config,
            ..Self::default()
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a struct-level function for each of the given type names.
    ///
    /// The function runs after all fields of a struct of that type have
    /// been validated. Registering again for a type replaces the previous
    /// function.
    pub fn register_struct_validation<F>(&mut self, func: F, type_names: &[&str])
    where
        F: Fn(&mut dyn StructLevel) + Send + Sync + 'static,
    {
        let func: StructLevelFn = Arc::new(func);
        for name in type_names {
            self.struct_level.insert(name.to_string(), Arc::clone(&func));
        }
    }

    /// Register an unwrap function for custom wrapper types.
    ///
    /// Whenever a struct of one of these types is extracted, it is replaced
    /// by whatever the function returns, e.g. the inner value of a nullable
    /// wrapper, or `Value::Invalid` when it holds nothing.
    ///
    /// ```
    /// use plumbline::prelude::*;
    ///
    /// let mut validate = Validate::new();
    /// validate.register_custom_type(
    ///     |v: &Value| v.field("Inner").cloned().unwrap_or_default(),
    ///     &["Wrapper"],
    /// );
    ///
    /// let wrapped: Value = StructValue::new("Wrapper").field("Inner", &7i32).into();
    /// let (value, kind, nullable) = validate.extract_type(&wrapped);
    /// assert_eq!(*value, Value::Int(7));
    /// assert_eq!(kind, Kind::Int);
    /// assert!(!nullable);
    /// ```
    pub fn register_custom_type<F>(&mut self, func: F, type_names: &[&str])
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        let func: CustomTypeFn = Arc::new(func);
        for name in type_names {
            self.custom_types.register(name, Arc::clone(&func));
        }
    }

    /// Register a check for one field of a struct type.
    ///
    /// The check receives the field value after type extraction; a nil
    /// pointer arrives as `Value::Invalid`. When it returns `false` an error
    /// with `tag` is reported at the field's namespace.
    pub fn register_field_rule<F>(&mut self, type_name: &str, field: &str, tag: &str, check: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.field_rules
            .entry(type_name.to_string())
            .or_default()
            .push(FieldRule {
                field: field.to_string(),
                tag: tag.to_string(),
                check: Arc::new(check),
            });
    }

    /// Look through pointers and registered custom types.
    ///
    /// See [`StructLevel::extract_type`].
    pub fn extract_type<'a>(&self, value: &'a Value) -> (Cow<'a, Value>, Kind, bool) {
        self.custom_types
            .extract(value, self.config.max_unwrap_depth())
    }

    /// Validate a struct (or a pointer to one).
    ///
    /// Returns every error reported by field rules and struct-level
    /// callbacks, in traversal order. A value that does not resolve to a
    /// struct fails with a single `struct` error.
    pub fn validate_struct<T>(&self, value: &T) -> Validation<(), ValidationErrors>
    where
        T: Reflect + ?Sized,
    {
        self.validate_value(&value.reflect())
    }

    /// Validate an already reflected value.
    pub fn validate_value(&self, value: &Value) -> Validation<(), ValidationErrors> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("validate", type_name = %value.type_name()).entered();

        let errors = ValidationContext::new(self, value).run();

        #[cfg(feature = "tracing")]
        tracing::debug!(errors = errors.len(), "validation finished");

        if errors.is_empty() {
            Validation::success(())
        } else {
            Validation::failure(errors)
        }
    }

    pub(crate) fn struct_level(&self, type_name: &str) -> Option<&StructLevelFn> {
        self.struct_level.get(type_name)
    }

    pub(crate) fn field_rules<'a>(
        &'a self,
        type_name: &str,
        field: &'a str,
    ) -> impl Iterator<Item = &'a FieldRule> + 'a {
        self.field_rules
            .get(type_name)
            .into_iter()
            .flatten()
            .filter(move |rule| rule.field == field)
    }
}

impl fmt::Debug for Validate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut struct_level: Vec<&String> = self.struct_level.keys().collect();
        struct_level.sort();
        f.debug_struct("Validate")
            .field("config", &self.config)
            .field("struct_level", &struct_level)
            .field("custom_types", &self.custom_types)
            .field(
                "field_rules",
                &self.field_rules.values().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}
