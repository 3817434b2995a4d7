//! Candidate implementations, loaders, and the canonical score bands.

use std::rc::Rc;

use crate::runtime::value::Value;
use crate::select::error::SelectError;
use crate::select::options::Options;

/// The callable a lazy module ultimately dispatches to.
pub type ModuleFn = Rc<dyn Fn(Vec<Value>) -> Result<Value, SelectError>>;

/// Capability scorer: `None` means "not applicable to these options" and
/// excludes the candidate entirely - different from a low defined score.
pub type SupportsFn = Box<dyn Fn(&Options) -> Option<f64>>;

/// Wrap a closure as a [`ModuleFn`].
pub fn module_fn<F>(f: F) -> ModuleFn
where
    F: Fn(Vec<Value>) -> Result<Value, SelectError> + 'static,
{
    Rc::new(f)
}

/// Canonical capability score bands. Semantics are fixed: the fallback is
/// pinned at [`FALLBACK`] so that any zero-or-better implementation beats
/// it, and anything below loses to it.
pub mod scores {
    /// Not supported - report `None` from `supports` to exclude entirely.
    pub const UNSUPPORTED: Option<f64> = None;
    /// Last resort, potentially unstable; loses even to the fallback.
    pub const RISKY: f64 = -1.0;
    /// The mandatory pure fallback.
    pub const FALLBACK: f64 = -0.1;
    /// Correct but untested for performance.
    pub const BASELINE: f64 = 0.0;
    /// Measurably better than baseline.
    pub const GOOD: f64 = 0.5;
    /// Optimal; the ceiling.
    pub const OPTIMAL: f64 = 1.0;
}

/// Two-phase loader state: declared-but-unresolved vs. materialized.
///
/// Deferred loaders are not invoked until their implementation actually
/// wins a selection. The asynchronous module variant resolves loaders at
/// registration time and stores them as `Resolved`.
pub enum Loader {
    Deferred(Rc<dyn Fn() -> ModuleFn>),
    Resolved(ModuleFn),
}

impl Loader {
    pub(crate) fn materialize(&self) -> ModuleFn {
        match self {
            // Rc<dyn Fn> has no Fn impl; call through the place.
            Loader::Deferred(load) => (**load)(),
            Loader::Resolved(f) => f.clone(),
        }
    }
}

impl Clone for Loader {
    fn clone(&self) -> Self {
        match self {
            Loader::Deferred(load) => Loader::Deferred(load.clone()),
            Loader::Resolved(f) => Loader::Resolved(f.clone()),
        }
    }
}

/// One candidate implementation of a lazy module's function.
pub struct LazyImplementation {
    name: String,
    supports: SupportsFn,
    loader: Loader,
}

impl LazyImplementation {
    /// A deferred implementation: `load` runs only if this candidate is
    /// selected.
    pub fn new<S, L>(name: impl Into<String>, supports: S, load: L) -> Self
    where
        S: Fn(&Options) -> Option<f64> + 'static,
        L: Fn() -> ModuleFn + 'static,
    {
        LazyImplementation {
            name: name.into(),
            supports: Box::new(supports),
            loader: Loader::Deferred(Rc::new(load)),
        }
    }

    /// A pre-resolved implementation, already materialized.
    pub fn resolved<S>(name: impl Into<String>, supports: S, f: ModuleFn) -> Self
    where
        S: Fn(&Options) -> Option<f64> + 'static,
    {
        LazyImplementation {
            name: name.into(),
            supports: Box::new(supports),
            loader: Loader::Resolved(f),
        }
    }

    pub(crate) fn with_loader<S>(name: impl Into<String>, supports: S, loader: Loader) -> Self
    where
        S: Fn(&Options) -> Option<f64> + 'static,
    {
        LazyImplementation {
            name: name.into(),
            supports: Box::new(supports),
            loader,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self, options: &Options) -> Option<f64> {
        (self.supports)(options)
    }

    pub(crate) fn loader(&self) -> Loader {
        self.loader.clone()
    }
}

/// The outcome of selecting the best implementation for one options value.
/// Cached and shared; repeated selections for equal options return the
/// identical `Rc<Selection>`.
pub struct Selection {
    name: String,
    score: f64,
    function: ModuleFn,
}

impl Selection {
    pub(crate) fn new(name: String, score: f64, function: ModuleFn) -> Self {
        Selection {
            name,
            score,
            function,
        }
    }

    /// Name of the winning implementation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The score the winner reported for the selected options.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The materialized function, not yet invoked.
    pub fn function(&self) -> &ModuleFn {
        &self.function
    }

    /// Invoke the selected implementation.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, SelectError> {
        (*self.function)(args)
    }
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selection({}, score {})", self.name, self.score)
    }
}
