//! The synchronous lazy module: scored selection with memoization.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};

use crate::runtime::value::Value;
use crate::select::error::SelectError;
use crate::select::implementation::{scores, LazyImplementation, Loader, ModuleFn, Selection};
use crate::select::options::{Options, EMPTY_OPTIONS};

/// Configuration for a lazy module. Immutable once the module is created.
///
/// The fallback loader is mandatory and taken at construction; default
/// options are optional (an empty options object is used otherwise).
pub struct LazyModuleConfig {
    name: String,
    default_options: Option<Options>,
    fallback_name: String,
    fallback: Loader,
}

impl LazyModuleConfig {
    /// A config with the given diagnostic name and fallback loader.
    pub fn new<L>(name: impl Into<String>, fallback: L) -> Self
    where
        L: Fn() -> ModuleFn + 'static,
    {
        LazyModuleConfig {
            name: name.into(),
            default_options: None,
            fallback_name: "fallback".to_string(),
            fallback: Loader::Deferred(Rc::new(fallback)),
        }
    }

    pub(crate) fn with_resolved_fallback(name: impl Into<String>, f: ModuleFn) -> Self {
        LazyModuleConfig {
            name: name.into(),
            default_options: None,
            fallback_name: "fallback".to_string(),
            fallback: Loader::Resolved(f),
        }
    }

    /// Options used by the plain call path.
    pub fn default_options(mut self, options: Options) -> Self {
        self.default_options = Some(options);
        self
    }

    /// Diagnostic name reported when the fallback wins a selection.
    pub fn fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = name.into();
        self
    }
}

struct ModuleState {
    /// Registration order is the selection tie-break.
    implementations: Vec<LazyImplementation>,
    /// Taken by the one-shot install on first selection.
    fallback: Option<LazyImplementation>,
    fallback_installed: bool,
    default_selection: Option<Rc<Selection>>,
    /// Canonical options key -> cached selection.
    cache: HashMap<String, Rc<Selection>>,
}

/// A callable wrapping a family of candidate implementations of one
/// function, selecting the best-scoring candidate for given options.
///
/// Selections are memoized: one slot for the default options, plus a map
/// keyed by canonicalized options for everything else. Registering a new
/// implementation invalidates both caches unconditionally, because the
/// newcomer might outscore any previously cached choice.
pub struct LazyModule {
    name: String,
    default_options: Options,
    state: RefCell<ModuleState>,
}

impl LazyModule {
    pub fn create(config: LazyModuleConfig) -> Self {
        let fallback = LazyImplementation::with_loader(
            config.fallback_name,
            |_: &Options| Some(scores::FALLBACK),
            config.fallback,
        );
        LazyModule {
            name: config.name,
            default_options: config
                .default_options
                .unwrap_or_else(|| EMPTY_OPTIONS.clone()),
            state: RefCell::new(ModuleState {
                implementations: Vec::new(),
                fallback: Some(fallback),
                fallback_installed: false,
                default_selection: None,
                cache: HashMap::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_options(&self) -> &Options {
        &self.default_options
    }

    /// Invoke the module with the default-options selection, computing
    /// that selection lazily on first call and reusing it thereafter.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, SelectError> {
        self.default_selection()?.call(args)
    }

    /// The winning implementation for the default options, for diagnostics.
    pub fn default_selection(&self) -> Result<Rc<Selection>, SelectError> {
        {
            let state = self.state.borrow();
            if let Some(selection) = &state.default_selection {
                trace!("module '{}': default selection cache hit", self.name);
                return Ok(selection.clone());
            }
        }
        let selection = self.select_best(&self.default_options)?;
        self.state.borrow_mut().default_selection = Some(selection.clone());
        Ok(selection)
    }

    /// The cached selection record for arbitrary options.
    pub fn selection(&self, options: &Options) -> Result<Rc<Selection>, SelectError> {
        let key = options.canonical_key();
        {
            let state = self.state.borrow();
            if let Some(selection) = state.cache.get(&key) {
                trace!("module '{}': cache hit for [{}]", self.name, key);
                return Ok(selection.clone());
            }
        }
        let selection = self.select_best(options)?;
        self.state.borrow_mut().cache.insert(key, selection.clone());
        Ok(selection)
    }

    /// The bare selected function for arbitrary options, not yet invoked.
    pub fn select(&self, options: &Options) -> Result<ModuleFn, SelectError> {
        Ok(self.selection(options)?.function().clone())
    }

    /// Append an implementation and invalidate BOTH caches. A newly
    /// registered implementation may outscore every cached choice, so
    /// correctness requires the unconditional flush.
    pub fn register(&self, implementation: LazyImplementation) {
        let mut state = self.state.borrow_mut();
        debug!(
            "module '{}': registered '{}', caches invalidated",
            self.name,
            implementation.name()
        );
        state.implementations.push(implementation);
        state.default_selection = None;
        state.cache.clear();
    }

    /// Names of every registered implementation, the fallback included
    /// once it has been lazily installed by a first selection.
    pub fn implementations(&self) -> Vec<String> {
        self.state
            .borrow()
            .implementations
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }

    fn select_best(&self, options: &Options) -> Result<Rc<Selection>, SelectError> {
        let (name, score, loader) = {
            let mut state = self.state.borrow_mut();

            // One-shot fallback install, guarded by a flag rather than by
            // list membership.
            if !state.fallback_installed {
                state.fallback_installed = true;
                if let Some(fallback) = state.fallback.take() {
                    state.implementations.push(fallback);
                }
            }

            // Highest defined score wins; a strict-greater scan keeps the
            // earliest registration on ties. The fallback sits at -0.1, so
            // any zero-or-better candidate beats it.
            let mut best: Option<(usize, f64)> = None;
            for (index, implementation) in state.implementations.iter().enumerate() {
                if let Some(score) = implementation.score(options) {
                    match best {
                        Some((_, leading)) if score <= leading => {}
                        _ => best = Some((index, score)),
                    }
                }
            }

            let (index, score) = best.ok_or_else(|| SelectError::SelectionExhausted {
                module: self.name.clone(),
                options: options.canonical_key(),
            })?;
            let winner = &state.implementations[index];
            (winner.name().to_string(), score, winner.loader())
        };

        // Materialize outside the borrow; loaders are caller code.
        let function = loader.materialize();
        debug!(
            "module '{}': selected '{}' (score {}) for [{}]",
            self.name,
            name,
            score,
            options.canonical_key()
        );
        Ok(Rc::new(Selection::new(name, score, function)))
    }
}
