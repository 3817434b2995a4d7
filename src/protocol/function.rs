//! Method implementation functions.

use crate::protocol::error::ProtocolError;
use crate::runtime::value::Value;

/// Function signature for protocol method implementations. The receiver is
/// always the first parameter; the method's remaining arguments arrive as a
/// vector.
pub type NativeFn = fn(Value, Vec<Value>) -> Result<Value, ProtocolError>;

/// A protocol method implementation.
pub enum ProtocolFn {
    /// Direct function pointer - zero overhead for compiled-in methods.
    Native(NativeFn),

    /// Boxed closure - small vtable indirection cost, can capture state.
    Closure(Box<dyn Fn(Value, Vec<Value>) -> Result<Value, ProtocolError>>),
}

impl ProtocolFn {
    /// Execute this implementation.
    pub fn call(&self, receiver: Value, args: Vec<Value>) -> Result<Value, ProtocolError> {
        match self {
            ProtocolFn::Native(f) => f(receiver, args),
            ProtocolFn::Closure(f) => f(receiver, args),
        }
    }
}
