use thiserror::Error;

/// Error type for lazy module selection and invocation.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Zero implementations (the fallback included) reported a defined
    /// score for the requested options. Reaching this means the module is
    /// misconfigured - the fallback guarantee is broken.
    #[error("lazy module '{module}' has no implementation supporting options [{options}]")]
    SelectionExhausted { module: String, options: String },
    /// Malformed options configuration (file read, parse, or a non-scalar
    /// value).
    #[error("invalid module options config: {0}")]
    Config(String),
    /// Raised by a selected implementation at call time.
    #[error("module implementation failed: {0}")]
    Implementation(String),
}
