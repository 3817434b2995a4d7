//! # proteus - runtime polymorphism toolkit
//!
//! Two mechanisms for building polymorphic, environment-adaptive libraries:
//!
//! - **Protocol dispatch**: named operation sets ("protocols") that
//!   unrelated runtime types implement independently, with dispatch on the
//!   runtime type of the first argument - no inheritance involved.
//! - **Lazy module selection**: a single callable wrapping a family of
//!   candidate implementations, picking the best-scoring candidate for a
//!   given options object, memoizing the choice, and guaranteeing a
//!   working fallback always exists.
//!
//! ## Quick Start
//!
//! ### Dispatching on runtime type
//!
//! ```
//! use proteus::protocol::{Extension, Protocol, Target};
//! use proteus::runtime::value::Value;
//!
//! // Define a protocol: a fixed set of method contracts.
//! let seq = Protocol::named("Sequence")
//!     .method("first", "returns the first element of the receiver")
//!     .define();
//!
//! // Attach an implementation for arrays.
//! seq.extend(
//!     Target::Array,
//!     Extension::new().add_closure("first", |receiver, _args| match receiver {
//!         Value::Array(items) => {
//!             Ok(items.borrow().first().cloned().unwrap_or(Value::Undefined))
//!         }
//!         _ => Ok(Value::Undefined),
//!     }),
//! )
//! .unwrap();
//!
//! let v = seq
//!     .call("first", Value::array(vec![Value::from(7), Value::from(8)]), vec![])
//!     .unwrap();
//! assert_eq!(v, Value::from(7));
//!
//! // No implementation for strings: a descriptive dispatch miss, never a
//! // silent no-op.
//! assert!(seq.call("first", Value::from("abc"), vec![]).is_err());
//! ```
//!
//! ### Selecting the best implementation
//!
//! ```
//! use proteus::runtime::value::{NumberType, Value};
//! use proteus::select::{
//!     module_fn, scores, LazyImplementation, LazyModule, LazyModuleConfig,
//! };
//!
//! // A module is created with only its mandatory fallback.
//! let increment = LazyModule::create(LazyModuleConfig::new("increment", || {
//!     module_fn(|args| match args.first() {
//!         Some(Value::Number(NumberType::Integer(n))) => Ok(Value::from(n + 1)),
//!         _ => Ok(Value::Undefined),
//!     })
//! }));
//! assert_eq!(increment.call(vec![Value::from(5)]).unwrap(), Value::from(6));
//!
//! // Registering a better-scoring candidate flushes the cached choice.
//! increment.register(LazyImplementation::new(
//!     "fast",
//!     |_options| Some(scores::GOOD),
//!     || {
//!         module_fn(|args| match args.first() {
//!             Some(Value::Number(NumberType::Integer(n))) => Ok(Value::from(n + 100)),
//!             _ => Ok(Value::Undefined),
//!         })
//!     },
//! ));
//! assert_eq!(increment.call(vec![Value::from(5)]).unwrap(), Value::from(105));
//! assert_eq!(increment.default_selection().unwrap().name(), "fast");
//! ```
//!
//! ## Dispatch Architecture
//!
//! Implementations are stored registry-side, keyed by a stable
//! type-identity string, so behavior attaches to pre-existing and foreign
//! types without modifying them. Three pseudo-constructors give `null`,
//! `undefined`, and plain objects a constructor-shaped dispatch identity
//! ([`protocol::Target::Null`], [`protocol::Target::Undefined`],
//! [`protocol::Target::ObjectFallback`]); everything else dispatches
//! through its wrapper target or a caller-created
//! [`runtime::object::Class`].
//!
//! The object fallback is consulted only for genuine objects that lack a
//! dedicated registration. Arrays and primitives never fall through to it.
//!
//! ## Selection Architecture
//!
//! Candidates report a capability score for an options object; `None`
//! excludes a candidate entirely. Scores follow fixed bands
//! ([`select::scores`]): the fallback is pinned at `-0.1` so any
//! legitimate candidate (`0.0` and up) beats it, and a band below exists
//! for last-resort implementations that should lose even to the fallback.
//! Ties go to the earliest registration - deliberately, so results don't
//! depend on sort internals.
//!
//! Every registry here is an explicitly constructed object. There are no
//! process globals to reset between tests; build a fresh
//! [`protocol::Protocol`] or [`select::LazyModule`] instead.
//!
//! - **[`runtime`]** - dynamically typed values, objects, classes, symbols
//! - **[`protocol`]** - protocol definition, extension, and dispatch
//! - **[`select`]** - lazy modules, scoring, memoized selection

#[macro_use]
extern crate lazy_static;

pub mod protocol;
pub mod runtime;
pub mod select;
