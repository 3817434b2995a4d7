//! Capability-scored lazy module selection.
//!
//! A **lazy module** wraps a family of candidate implementations of one
//! function behind a single callable. Each candidate reports a capability
//! score for a given options object; selection picks the highest defined
//! score, materializes the winner's loader, and memoizes the result:
//!
//! ```text
//! module.call(args)                 module.select(&options)
//!      |                                 |
//! default-options slot            canonical-key cache
//!      \                               /
//!        selection: install fallback once, score all candidates,
//!        highest defined score wins (earliest registration on ties),
//!        materialize the winner's loader, cache the Selection
//! ```
//!
//! The mandatory fallback is appended lazily on first selection and is
//! pinned at score `-0.1`: it always applies, and anything legitimate
//! (zero or better) beats it. An implementation reporting `None` from
//! `supports` is excluded entirely for those options.
//!
//! Registering a new implementation flushes every cached selection -
//! correctness over performance, because the newcomer might outscore a
//! previously cached choice.

pub mod async_module;
pub mod config;
pub mod error;
pub mod implementation;
pub mod module;
pub mod options;

pub use async_module::AsyncLazyModule;
pub use error::SelectError;
pub use implementation::{module_fn, scores, LazyImplementation, ModuleFn, Selection};
pub use module::{LazyModule, LazyModuleConfig};
pub use options::{OptionValue, Options};
