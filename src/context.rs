//! Per-run validation state
//!
//! One [`ValidationContext`] is created for each top-level validation call and
//! dropped when it returns. It tracks where the traversal currently is and
//! collects every error reported along the way. Struct-level callbacks only
//! ever see it through the [`StructLevel`] trait.

use std::borrow::Cow;
use std::mem;

use crate::errors::{FieldError, ValidationErrors};
use crate::namespace::{self, Namespace};
use crate::struct_level::StructLevel;
use crate::value::{Kind, Reflect, StructValue, Value};
use crate::Validate;

pub(crate) struct ValidationContext<'v> {
    validate: &'v Validate,
    top: &'v Value,
    parent: &'v Value,
    current: &'v Value,
    ns: Namespace,
    errors: ValidationErrors,
}

impl<'v> ValidationContext<'v> {
    pub(crate) fn new(validate: &'v Validate, top: &'v Value) -> Self {
        ValidationContext {
            validate,
            top,
            parent: top,
            current: top,
            ns: Namespace::new(),
            errors: ValidationErrors::new(),
        }
    }

    /// Walk the whole value graph from the root and return what was reported.
    pub(crate) fn run(mut self) -> ValidationErrors {
        let top = self.top;
        let (root, kind, _) = self.validate.extract_type(top);

        let type_name = match root.as_ref() {
            Value::Struct(s) => s.type_name().to_string(),
            other => {
                let error = FieldError::new("struct", "")
                    .with_namespace("", "")
                    .with_value(other.clone());
                self.record(error);
                return self.errors;
            }
        };
        debug_assert_eq!(kind, Kind::Struct);

        if self.validate.config().include_root_name() {
            self.ns.push_field(&type_name, &type_name);
        }

        match root {
            Cow::Borrowed(root) => self.validate_struct(root, root),
            Cow::Owned(root) => {
                let mut scoped = self.scoped();
                scoped.validate_struct(&root, &root);
                self.absorb(scoped);
            }
        }

        self.errors
    }

    /// Validate the fields of `current`, then run its struct-level callbacks.
    fn validate_struct(&mut self, parent: &'v Value, current: &'v Value) {
        let Value::Struct(s) = current else {
            return;
        };

        for field in s.fields() {
            self.ns.push_field(field.display_name(), field.name());
            self.check_field_rules(s, field.name(), field.display_name(), field.value());
            self.traverse(current, field.value());
            self.ns.pop();
        }

        self.parent = parent;
        self.current = current;

        let validate = self.validate;
        if let Some(func) = validate.struct_level(s.type_name()) {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                type_name = %s.type_name(),
                namespace = %self.ns.display(),
                "running struct-level validation"
            );
            let sl: &mut dyn StructLevel = self;
            func(sl);
        }
        if let Some(hook) = s.hook() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                type_name = %s.type_name(),
                namespace = %self.ns.display(),
                "running self validation"
            );
            let sl: &mut dyn StructLevel = self;
            hook.call(sl);
        }
    }

    /// Descend into a field value, looking for nested structs.
    fn traverse(&mut self, parent: &'v Value, value: &'v Value) {
        let (resolved, _, _) = self.validate.extract_type(value);
        match resolved {
            Cow::Borrowed(resolved) => self.traverse_resolved(parent, resolved),
            Cow::Owned(resolved) => {
                let mut scoped = self.scoped();
                scoped.traverse_resolved(parent, &resolved);
                self.absorb(scoped);
            }
        }
    }

    fn traverse_resolved(&mut self, parent: &'v Value, value: &'v Value) {
        match value {
            Value::Struct(_) => self.validate_struct(parent, value),
            Value::Slice(items) | Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.ns.push_index(i);
                    self.traverse(parent, item);
                    self.ns.pop();
                }
            }
            Value::Map(entries) => {
                for (key, item) in entries {
                    self.ns.push_key(&key.to_string());
                    self.traverse(parent, item);
                    self.ns.pop();
                }
            }
            _ => {}
        }
    }

    fn check_field_rules(
        &mut self,
        owner: &StructValue,
        field: &str,
        display: &str,
        value: &Value,
    ) {
        let validate = self.validate;
        let mut rules = validate.field_rules(owner.type_name(), field).peekable();
        if rules.peek().is_none() {
            return;
        }

        let (resolved, kind, _) = validate.extract_type(value);
        for rule in rules {
            if rule.check(&resolved) {
                continue;
            }
            let mut error = FieldError::new(rule.tag(), display)
                .with_struct_field(field)
                .with_namespace(self.ns.display(), self.ns.actual());
            if kind.is_valid() {
                error = error.with_value(resolved.clone().into_owned());
            }
            self.record(error);
        }
    }

    // Borrow the run state for a value that lives shorter than the root,
    // e.g. the result of a custom type unwrap.
    fn scoped<'x>(&mut self) -> ValidationContext<'x>
    where
        'v: 'x,
    {
        ValidationContext {
            validate: self.validate,
            top: self.top,
            parent: self.parent,
            current: self.current,
            ns: mem::take(&mut self.ns),
            errors: mem::take(&mut self.errors),
        }
    }

    fn absorb(&mut self, scoped: ValidationContext<'_>) {
        self.ns = scoped.ns;
        self.errors = scoped.errors;
    }

    fn record(&mut self, error: FieldError) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            namespace = %error.namespace(),
            tag = %error.tag(),
            kind = %error.kind(),
            "field error reported"
        );
        self.errors.push(error);
    }
}

impl StructLevel for ValidationContext<'_> {
    fn validator(&self) -> &Validate {
        self.validate
    }

    fn top(&self) -> &Value {
        self.top
    }

    fn parent(&self) -> &Value {
        self.parent
    }

    fn current(&self) -> &Value {
        self.current
    }

    fn extract_type<'a>(&self, value: &'a Value) -> (Cow<'a, Value>, Kind, bool) {
        self.validate.extract_type(value)
    }

    fn report_error(&mut self, field: &dyn Reflect, field_name: &str, alt_name: &str, tag: &str) {
        let raw = field.reflect();
        let (resolved, kind, _) = self.validate.extract_type(&raw);
        let alt_name = if alt_name.is_empty() {
            field_name
        } else {
            alt_name
        };

        let mut error = FieldError::new(tag, field_name)
            .with_struct_field(alt_name)
            .with_namespace(
                namespace::join(&self.ns.display(), field_name),
                namespace::join(&self.ns.actual(), alt_name),
            );
        if kind.is_valid() {
            error = error.with_value(resolved.into_owned());
        }
        self.record(error);
    }

    fn report_validation_errors(
        &mut self,
        relative_namespace: &str,
        relative_actual_namespace: &str,
        errors: ValidationErrors,
    ) {
        let prefix = namespace::join(&self.ns.display(), relative_namespace);
        let struct_prefix = namespace::join(&self.ns.actual(), relative_actual_namespace);
        for error in errors {
            self.record(error.rebase(&prefix, &struct_prefix));
        }
    }
}
