//! Serde support for reported errors (feature-gated)
//!
//! With the `serde` feature enabled, [`ValidationErrors`] serializes as a
//! list of error records so a service can return them as-is:
//!
//! ```rust,ignore
//! let body = serde_json::to_string(&errors)?;
//! // [{"tag":"required","actual_tag":"required","namespace":"User.Name",...}]
//! ```
//!
//! Values serialize as plain data: structs become maps keyed by display
//! name, nil pointers and invalid values become `null`.

use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::errors::{FieldError, ValidationErrors};
use crate::value::{Kind, Value};

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Invalid | Value::Pointer(None) => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Pointer(Some(inner)) => inner.serialize(serializer),
            Value::Slice(items) | Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
            Value::Struct(s) => {
                let mut map = serializer.serialize_map(Some(s.fields().len()))?;
                for field in s.fields() {
                    map.serialize_entry(field.display_name(), field.value())?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 10)?;
        state.serialize_field("tag", self.tag())?;
        state.serialize_field("actual_tag", self.actual_tag())?;
        state.serialize_field("namespace", self.namespace())?;
        state.serialize_field("struct_namespace", self.struct_namespace())?;
        state.serialize_field("field", self.field())?;
        state.serialize_field("struct_field", self.struct_field())?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("type", &self.type_name())?;
        state.serialize_field("param", self.param())?;
        state.end()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StructValue;

    #[test]
    fn test_serialize_field_error() {
        let err = FieldError::new("gte", "Age")
            .with_namespace("User.Age", "User.age")
            .with_value(Value::Int(-1));

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["namespace"], "User.Age");
        assert_eq!(json["struct_namespace"], "User.age");
        assert_eq!(json["kind"], "int");
        assert_eq!(json["value"], -1);
        assert_eq!(json["type"], "int");
        assert_eq!(json["param"], "");
    }

    #[test]
    fn test_serialize_invalid_value_as_null() {
        let err = FieldError::new("required", "Nick");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json["value"].is_null());
        assert!(json["type"].is_null());
        assert_eq!(json["kind"], "invalid");
    }

    #[test]
    fn test_serialize_struct_value_uses_display_names() {
        let value: Value = StructValue::new("User")
            .field_as("first_name", "firstName", "Ada")
            .field("tags", &vec!["a", "b"])
            .field("nick", &None::<String>)
            .into();

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"firstName":"Ada","tags":["a","b"],"nick":null}"#);
    }

    #[test]
    fn test_serialize_errors_as_list() {
        let errors = ValidationErrors::from(vec![
            FieldError::new("required", "A"),
            FieldError::new("required", "B"),
        ]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }
}
