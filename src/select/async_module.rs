//! The asynchronous-loading lazy module variant.
//!
//! Synchronous and asynchronous modules are distinct types, so a sync
//! module can never end up holding a loader that awaits: here, every
//! loader future is resolved at registration time and stored
//! pre-materialized, leaving a fully synchronous call surface. The only
//! awaits in an `AsyncLazyModule`'s lifetime happen in [`create`] and
//! [`register`].
//!
//! [`create`]: AsyncLazyModule::create
//! [`register`]: AsyncLazyModule::register

use std::future::Future;
use std::rc::Rc;

use crate::runtime::value::Value;
use crate::select::error::SelectError;
use crate::select::implementation::{LazyImplementation, ModuleFn, Selection};
use crate::select::module::{LazyModule, LazyModuleConfig};
use crate::select::options::Options;

/// A lazy module whose implementation *loading* is asynchronous. Loading
/// happens at registration; invocation never awaits.
pub struct AsyncLazyModule {
    module: LazyModule,
}

impl AsyncLazyModule {
    /// Build a module, resolving the fallback loader future up front.
    pub async fn create<F>(name: impl Into<String>, fallback: F) -> Self
    where
        F: Future<Output = ModuleFn>,
    {
        Self::create_with_options(name, Options::new(), fallback).await
    }

    /// Build a module with default options for the plain call path.
    pub async fn create_with_options<F>(
        name: impl Into<String>,
        default_options: Options,
        fallback: F,
    ) -> Self
    where
        F: Future<Output = ModuleFn>,
    {
        let f = fallback.await;
        let config =
            LazyModuleConfig::with_resolved_fallback(name, f).default_options(default_options);
        AsyncLazyModule {
            module: LazyModule::create(config),
        }
    }

    /// Register an implementation whose loader is a future. The future is
    /// awaited here, once, and the materialized function is stored - later
    /// selections never await.
    pub async fn register<S, F>(&self, name: impl Into<String>, supports: S, load: F)
    where
        S: Fn(&Options) -> Option<f64> + 'static,
        F: Future<Output = ModuleFn>,
    {
        let f = load.await;
        self.module
            .register(LazyImplementation::resolved(name, supports, f));
    }

    pub fn name(&self) -> &str {
        self.module.name()
    }

    /// Invoke with the default-options selection.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, SelectError> {
        self.module.call(args)
    }

    pub fn select(&self, options: &Options) -> Result<ModuleFn, SelectError> {
        self.module.select(options)
    }

    pub fn selection(&self, options: &Options) -> Result<Rc<Selection>, SelectError> {
        self.module.selection(options)
    }

    pub fn default_selection(&self) -> Result<Rc<Selection>, SelectError> {
        self.module.default_selection()
    }

    pub fn implementations(&self) -> Vec<String> {
        self.module.implementations()
    }

    /// The underlying synchronous module.
    pub fn module(&self) -> &LazyModule {
        &self.module
    }
}
