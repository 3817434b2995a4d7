//! Dispatch targets and pseudo-constructors.
//!
//! A target is the constructor-shaped identity an implementation is
//! registered against. True constructors are supplied by callers as
//! [`Class`] handles; the builtin variants stand in for the wrapper
//! constructors of primitives and arrays; and the three pseudo-constructor
//! variants give `null`, `undefined`, and plain objects a dispatchable
//! identity even though they have no natural constructor.

use crate::runtime::object::{Class, ObjectData};
use crate::runtime::type_name::{
    TYPE_NAME_ARRAY, TYPE_NAME_BOOLEAN, TYPE_NAME_NULL, TYPE_NAME_NUMBER, TYPE_NAME_OBJECT,
    TYPE_NAME_STRING, TYPE_NAME_SYMBOL, TYPE_NAME_UNDEFINED,
};
use crate::runtime::value::Value;

/// A registration/dispatch key for protocol implementations.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Symbol,
    Array,
    /// A caller-created constructor identity.
    Class(Class),
    /// The catch-all for plain objects with no dedicated registration.
    ObjectFallback,
}

impl Target {
    /// Derive the dispatch target of a runtime value.
    ///
    /// Class-tagged objects resolve to their class; objects without a
    /// constructor identity resolve directly to the object fallback.
    pub fn of(value: &Value) -> Target {
        match value {
            Value::Undefined => Target::Undefined,
            Value::Null => Target::Null,
            Value::Boolean(_) => Target::Boolean,
            Value::Number(_) => Target::Number,
            Value::String(_) => Target::String,
            Value::Symbol(_) => Target::Symbol,
            Value::Array(_) => Target::Array,
            Value::Object(o) => match o.borrow().class() {
                Some(c) => Target::Class(c.clone()),
                None => Target::ObjectFallback,
            },
        }
    }

    /// Stable type-identity string used as the registry storage key.
    pub(crate) fn key(&self) -> String {
        match self {
            Target::Undefined => "undefined".to_string(),
            Target::Null => "null".to_string(),
            Target::Boolean => "boolean".to_string(),
            Target::Number => "number".to_string(),
            Target::String => "string".to_string(),
            Target::Symbol => "symbol".to_string(),
            Target::Array => "array".to_string(),
            Target::Class(c) => format!("class:{}", c.id()),
            Target::ObjectFallback => "object-fallback".to_string(),
        }
    }

    /// Human-readable type name, as reported by introspection and errors.
    pub fn type_name(&self) -> String {
        match self {
            Target::Undefined => TYPE_NAME_UNDEFINED.to_string(),
            Target::Null => TYPE_NAME_NULL.to_string(),
            Target::Boolean => TYPE_NAME_BOOLEAN.to_string(),
            Target::Number => TYPE_NAME_NUMBER.to_string(),
            Target::String => TYPE_NAME_STRING.to_string(),
            Target::Symbol => TYPE_NAME_SYMBOL.to_string(),
            Target::Array => TYPE_NAME_ARRAY.to_string(),
            Target::Class(c) => c.name().to_string(),
            Target::ObjectFallback => TYPE_NAME_OBJECT.to_string(),
        }
    }
}

impl From<Class> for Target {
    fn from(class: Class) -> Self {
        Target::Class(class)
    }
}

impl From<&Class> for Target {
    fn from(class: &Class) -> Self {
        Target::Class(class.clone())
    }
}

/// Pseudo-constructor for the `null` sentinel.
pub fn null() -> Value {
    Value::Null
}

/// Pseudo-constructor for the `undefined` sentinel.
pub fn undefined() -> Value {
    Value::Undefined
}

/// Pseudo-constructor for the object-fallback sentinel: a fresh empty
/// plain object.
pub fn object_fallback() -> Value {
    Value::object(ObjectData::plain())
}
