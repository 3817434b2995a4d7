//! Resolved type names, as they appear in dispatch diagnostics.

use crate::runtime::value::Value;

pub const TYPE_NAME_UNDEFINED: &str = "undefined";
pub const TYPE_NAME_NULL: &str = "null";
pub const TYPE_NAME_BOOLEAN: &str = "Boolean";
pub const TYPE_NAME_NUMBER: &str = "Number";
pub const TYPE_NAME_STRING: &str = "String";
pub const TYPE_NAME_SYMBOL: &str = "Symbol";
pub const TYPE_NAME_ARRAY: &str = "Array";
pub const TYPE_NAME_OBJECT: &str = "Object";

/// Resolve the type name of a value. Class-tagged objects report their
/// class name; plain objects report `Object`.
pub fn type_name_of(value: &Value) -> String {
    match value {
        Value::Undefined => TYPE_NAME_UNDEFINED.to_string(),
        Value::Null => TYPE_NAME_NULL.to_string(),
        Value::Boolean(_) => TYPE_NAME_BOOLEAN.to_string(),
        Value::Number(_) => TYPE_NAME_NUMBER.to_string(),
        Value::String(_) => TYPE_NAME_STRING.to_string(),
        Value::Symbol(_) => TYPE_NAME_SYMBOL.to_string(),
        Value::Array(_) => TYPE_NAME_ARRAY.to_string(),
        Value::Object(o) => match o.borrow().class() {
            Some(c) => c.name().to_string(),
            None => TYPE_NAME_OBJECT.to_string(),
        },
    }
}
