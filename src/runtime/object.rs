use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::runtime::value::{ObjectRef, Value};

/// A user-defined constructor identity.
///
/// Where the protocol system needs to attach behavior to a caller's own
/// object type, the caller creates a `Class` once and tags instances with
/// it. Identity is a process-unique uuid; the name exists for diagnostics.
pub struct Class {
    inner: Rc<ClassInner>,
}

struct ClassInner {
    id: String,
    name: String,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class {
            inner: Rc::new(ClassInner {
                id: Uuid::new_v4().to_hyphenated().to_string(),
                name: name.into(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Construct a fresh empty instance tagged with this class.
    pub fn instantiate(&self) -> Value {
        Value::object(ObjectData::with_class(self.clone()))
    }
}

impl Clone for Class {
    fn clone(&self) -> Self {
        Class {
            inner: self.inner.clone(),
        }
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.inner.name)
    }
}

/// Backing data of an object value: an optional class tag plus a property
/// map. Objects without a class tag are "plain" and dispatch through the
/// object-fallback target.
pub struct ObjectData {
    class: Option<Class>,
    properties: HashMap<String, Value>,
}

impl ObjectData {
    /// A plain object with no constructor identity.
    pub fn plain() -> Self {
        ObjectData {
            class: None,
            properties: HashMap::new(),
        }
    }

    pub fn with_class(class: Class) -> Self {
        ObjectData {
            class: Some(class),
            properties: HashMap::new(),
        }
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    pub fn keys(&self) -> Vec<&String> {
        self.properties.keys().collect()
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }
}
