use thiserror::Error;

/// Error type for protocol definition, extension, and dispatch.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// No implementation (direct or object-fallback) for the receiver's type.
    #[error("protocol '{protocol}' has no implementation of method '{method}' for type '{type_name}'")]
    DispatchMiss {
        protocol: String,
        method: String,
        type_name: String,
    },
    /// The method name was never declared when the protocol was defined.
    #[error("protocol '{protocol}' does not declare a method named '{method}'")]
    UndeclaredMethod { protocol: String, method: String },
    /// Raised by method implementations for receiver or argument misuse.
    #[error("type error: {0}")]
    Type(String),
}
