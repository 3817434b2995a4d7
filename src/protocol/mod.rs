//! Protocol dispatch - operation-oriented polymorphism without inheritance.
//!
//! A **protocol** is a named, fixed set of method contracts. Unrelated
//! runtime types implement it independently by registering method
//! implementations against a dispatch **target**, and calls route to the
//! right implementation based on the runtime type of the first argument:
//!
//! ```text
//! protocol.call("first", receiver, args)
//!      |
//! 1. Derive the receiver's dispatch target
//!      null -> Target::Null        array       -> Target::Array
//!      "ab" -> Target::String      Point inst. -> Target::Class(point)
//!      {}   -> Target::ObjectFallback
//! 2. Look up (target, method) in the protocol's registry -> invoke
//! 3. Miss on a genuine object? Retry the object-fallback record
//! 4. Still missing -> DispatchMiss naming protocol, method, and type
//! ```
//!
//! Registration is monotonic and merging: repeated [`Protocol::extend`]
//! calls for the same target add methods, and a same-named method
//! registered later wins. There is no removal.
//!
//! The object fallback is consulted only for actual objects. An array or a
//! primitive with no dedicated registration is a dispatch miss, never a
//! silent fall-through to the generic-object record.

pub mod error;
pub mod function;
pub mod registry;
pub mod target;

pub use error::ProtocolError;
pub use function::{NativeFn, ProtocolFn};
pub use registry::{Extension, Method, Protocol, ProtocolBuilder};
pub use target::Target;
