//! Protocol definition, extension, and dispatch.
//!
//! A protocol is a named, fixed set of method contracts that unrelated
//! runtime types implement independently. The registry is per-protocol and
//! registry-based: implementations are stored under a stable type-identity
//! key, never on the target type itself. Each protocol is an explicitly
//! constructed object - there is no process-global registry, so tests build
//! fresh protocols instead of sharing state.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};
use uuid::Uuid;

use crate::protocol::error::ProtocolError;
use crate::protocol::function::{NativeFn, ProtocolFn};
use crate::protocol::target::Target;
use crate::runtime::type_name::type_name_of;
use crate::runtime::value::Value;

/// Builder collecting method contracts for a protocol definition.
pub struct ProtocolBuilder {
    name: Option<String>,
    methods: Vec<(String, String)>,
}

impl ProtocolBuilder {
    /// Declare a method with a one-line description of its contract. The
    /// description is documentation metadata only; it is never validated.
    pub fn method(mut self, name: impl Into<String>, doc: impl Into<String>) -> Self {
        self.methods.push((name.into(), doc.into()));
        self
    }

    /// Allocate the protocol: a fresh unique identity, the frozen
    /// documentation map, and an empty implementation registry.
    pub fn define(self) -> Protocol {
        let id = Uuid::new_v4().to_hyphenated().to_string();
        let name = self
            .name
            .unwrap_or_else(|| format!("protocol-{}", id));

        let mut method_docs = HashMap::new();
        let mut method_order = Vec::new();
        for (method, doc) in self.methods {
            if !method_docs.contains_key(&method) {
                method_order.push(method.clone());
            }
            method_docs.insert(method, doc);
        }

        debug!(
            "defined protocol '{}' with {} methods",
            name,
            method_order.len()
        );

        Protocol {
            state: Rc::new(RefCell::new(ProtocolState {
                id,
                name,
                method_docs,
                method_order,
                implementations: HashMap::new(),
                implementors: Vec::new(),
            })),
        }
    }
}

/// A partial set of method implementations to attach to one
/// (protocol, target) pair. Extensions merge: methods registered earlier
/// for the same target survive, and a same-named method registered later
/// replaces only itself.
pub struct Extension {
    methods: Vec<(String, ProtocolFn)>,
}

impl Extension {
    pub fn new() -> Self {
        Extension {
            methods: Vec::new(),
        }
    }

    /// Add a native method implementation.
    pub fn add_method(mut self, name: impl Into<String>, f: NativeFn) -> Self {
        self.methods.push((name.into(), ProtocolFn::Native(f)));
        self
    }

    /// Add a capturing closure implementation.
    pub fn add_closure<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, Vec<Value>) -> Result<Value, ProtocolError> + 'static,
    {
        self.methods.push((name.into(), ProtocolFn::Closure(Box::new(f))));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self::new()
    }
}

struct ProtocolState {
    id: String,
    name: String,
    /// Frozen at definition time.
    method_docs: HashMap<String, String>,
    method_order: Vec<String>,
    /// Type-identity key -> method name -> implementation.
    implementations: HashMap<String, HashMap<String, Rc<ProtocolFn>>>,
    /// (key, type name) of every target ever extended, in first-seen order.
    implementors: Vec<(String, String)>,
}

/// A named set of method contracts with per-type implementations and
/// runtime-type dispatch. Cheap to clone; clones share the registry.
pub struct Protocol {
    state: Rc<RefCell<ProtocolState>>,
}

impl Protocol {
    /// Start defining a named protocol.
    pub fn named(name: impl Into<String>) -> ProtocolBuilder {
        ProtocolBuilder {
            name: Some(name.into()),
            methods: Vec::new(),
        }
    }

    /// Start defining a protocol with a generated name.
    pub fn anonymous() -> ProtocolBuilder {
        ProtocolBuilder {
            name: None,
            methods: Vec::new(),
        }
    }

    /// The protocol's process-unique identity.
    pub fn id(&self) -> String {
        self.state.borrow().id.clone()
    }

    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Declared method names, in declaration order.
    pub fn methods(&self) -> Vec<String> {
        self.state.borrow().method_order.clone()
    }

    /// The documentation string a method was declared with.
    pub fn doc(&self, method: &str) -> Option<String> {
        self.state.borrow().method_docs.get(method).cloned()
    }

    /// A bound dispatcher for one declared method.
    pub fn method(&self, name: &str) -> Result<Method, ProtocolError> {
        let state = self.state.borrow();
        if !state.method_docs.contains_key(name) {
            return Err(ProtocolError::UndeclaredMethod {
                protocol: state.name.clone(),
                method: name.to_string(),
            });
        }
        Ok(Method {
            protocol: self.clone(),
            name: name.to_string(),
        })
    }

    /// One dispatcher per declared method, in declaration order.
    pub fn dispatchers(&self) -> Vec<Method> {
        self.methods()
            .into_iter()
            .map(|name| Method {
                protocol: self.clone(),
                name,
            })
            .collect()
    }

    /// Merge method implementations into the record for `target`.
    ///
    /// Incremental: not all methods need to be given at once, and a later
    /// extension replaces only the methods it names. Fails fast if the
    /// extension names a method the protocol never declared.
    pub fn extend(&self, target: Target, extension: Extension) -> Result<(), ProtocolError> {
        let mut state = self.state.borrow_mut();

        for (method, _) in &extension.methods {
            if !state.method_docs.contains_key(method) {
                return Err(ProtocolError::UndeclaredMethod {
                    protocol: state.name.clone(),
                    method: method.clone(),
                });
            }
        }

        let key = target.key();
        if !state.implementors.iter().any(|(k, _)| k == &key) {
            state.implementors.push((key.clone(), target.type_name()));
        }

        let count = extension.methods.len();
        let record = state
            .implementations
            .entry(key)
            .or_insert_with(HashMap::new);
        for (method, f) in extension.methods {
            record.insert(method, Rc::new(f));
        }

        debug!(
            "protocol '{}' extended for '{}' ({} methods)",
            state.name,
            target.type_name(),
            count
        );
        Ok(())
    }

    /// Dispatch `method` on the runtime type of `receiver`.
    pub fn call(
        &self,
        method: &str,
        receiver: Value,
        args: Vec<Value>,
    ) -> Result<Value, ProtocolError> {
        {
            let state = self.state.borrow();
            if !state.method_docs.contains_key(method) {
                return Err(ProtocolError::UndeclaredMethod {
                    protocol: state.name.clone(),
                    method: method.to_string(),
                });
            }
        }

        let target = Target::of(&receiver);
        let found = match self.lookup(&target.key(), method) {
            Some(f) => Some(f),
            None => {
                // Object-fallback retry: genuine objects only, and only when
                // the primary key was not already the fallback. Arrays,
                // primitives, null, and undefined never reach this path.
                if matches!(&receiver, Value::Object(_)) && target != Target::ObjectFallback {
                    trace!(
                        "protocol '{}': '{}' missed for '{}', retrying object fallback",
                        self.name(),
                        method,
                        target.type_name()
                    );
                    self.lookup(&Target::ObjectFallback.key(), method)
                } else {
                    None
                }
            }
        };

        match found {
            Some(f) => f.call(receiver, args),
            None => Err(ProtocolError::DispatchMiss {
                protocol: self.name(),
                method: method.to_string(),
                type_name: type_name_of(&receiver),
            }),
        }
    }

    /// Cheap capability test: would dispatch find an implementation record
    /// for this value, for at least one declared method? Never invokes
    /// anything.
    pub fn satisfied_by(&self, value: &Value) -> bool {
        let state = self.state.borrow();
        let has = |key: &str| {
            state
                .implementations
                .get(key)
                .map(|record| !record.is_empty())
                .unwrap_or(false)
        };

        let target = Target::of(value);
        if has(&target.key()) {
            return true;
        }
        matches!(value, Value::Object(_))
            && target != Target::ObjectFallback
            && has(&Target::ObjectFallback.key())
    }

    /// Type names of every target ever extended against this protocol,
    /// in first-seen order, independent of which methods were implemented.
    pub fn implementors(&self) -> Vec<String> {
        self.state
            .borrow()
            .implementors
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn lookup(&self, key: &str, method: &str) -> Option<Rc<ProtocolFn>> {
        // Clone the Rc out so no borrow is held while the method runs;
        // implementations may re-enter the protocol.
        self.state
            .borrow()
            .implementations
            .get(key)
            .and_then(|record| record.get(method))
            .cloned()
    }
}

impl Clone for Protocol {
    fn clone(&self) -> Self {
        Protocol {
            state: self.state.clone(),
        }
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.state, &other.state) {
            return true;
        }
        self.state.borrow().id == other.state.borrow().id
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        write!(
            f,
            "Protocol({}, {} methods, {} implementors)",
            state.name,
            state.method_order.len(),
            state.implementors.len()
        )
    }
}

/// A bound dispatcher for one declared protocol method.
pub struct Method {
    protocol: Protocol,
    name: String,
}

impl Method {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Dispatch on the runtime type of `receiver`.
    pub fn call(&self, receiver: Value, args: Vec<Value>) -> Result<Value, ProtocolError> {
        self.protocol.call(&self.name, receiver, args)
    }
}

impl Clone for Method {
    fn clone(&self) -> Self {
        Method {
            protocol: self.protocol.clone(),
            name: self.name.clone(),
        }
    }
}
