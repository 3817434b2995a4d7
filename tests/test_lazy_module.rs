extern crate proteus;

use std::cell::Cell;
use std::rc::Rc;

use proteus::runtime::value::{NumberType, Value};
use proteus::select::{
    config, module_fn, scores, LazyImplementation, LazyModule, LazyModuleConfig, ModuleFn,
    OptionValue, Options, SelectError,
};

/// Helper: a loader whose function adds `n` to an integer argument.
fn adds(n: i64) -> impl Fn() -> ModuleFn {
    move || {
        module_fn(move |args| match args.first() {
            Some(Value::Number(NumberType::Integer(i))) => Ok(Value::from(i + n)),
            _ => Err(SelectError::Implementation(
                "expected an integer argument".to_string(),
            )),
        })
    }
}

// ── Fallback guarantee ───────────────────────────────────────────────

#[test]
fn test_fallback_only_module_always_succeeds() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));

    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(6));

    let selection = module.default_selection().unwrap();
    assert_eq!(selection.name(), "fallback");
    assert_eq!(selection.score(), scores::FALLBACK);

    // Arbitrary options succeed too: the fallback applies everywhere.
    let f = module
        .select(&Options::new().with("anything", true))
        .unwrap();
    assert_eq!((*f)(vec![Value::from(1)]).unwrap(), Value::from(2));
}

#[test]
fn test_custom_fallback_name() {
    let module = LazyModule::create(
        LazyModuleConfig::new("hash", adds(0)).fallback_name("pure-rust"),
    );
    assert_eq!(module.default_selection().unwrap().name(), "pure-rust");
}

#[test]
fn test_fallback_appears_in_listing_after_first_selection() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    assert!(module.implementations().is_empty());

    module.register(LazyImplementation::new("fast", |_| Some(scores::GOOD), adds(100)));
    assert_eq!(module.implementations(), vec!["fast".to_string()]);

    module.call(vec![Value::from(0)]).unwrap();
    assert_eq!(
        module.implementations(),
        vec!["fast".to_string(), "fallback".to_string()]
    );
}

// ── Selection and score bands ────────────────────────────────────────

#[test]
fn test_selection_prefers_highest_score() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    module.register(LazyImplementation::new(
        "baseline",
        |_| Some(scores::BASELINE),
        adds(10),
    ));
    module.register(LazyImplementation::new("good", |_| Some(scores::GOOD), adds(100)));

    let selection = module.default_selection().unwrap();
    assert_eq!(selection.name(), "good");
    assert_eq!(selection.score(), scores::GOOD);
    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(105));
}

#[test]
fn test_baseline_beats_fallback() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    module.register(LazyImplementation::new(
        "baseline",
        |_| Some(scores::BASELINE),
        adds(10),
    ));
    assert_eq!(module.default_selection().unwrap().name(), "baseline");
}

#[test]
fn test_risky_band_loses_to_fallback() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    module.register(LazyImplementation::new("risky", |_| Some(scores::RISKY), adds(10)));
    assert_eq!(module.default_selection().unwrap().name(), "fallback");
    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(6));
}

#[test]
fn test_undefined_score_excludes_candidate() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    module.register(LazyImplementation::new(
        "never",
        |_| scores::UNSUPPORTED,
        adds(1000),
    ));
    assert_eq!(module.default_selection().unwrap().name(), "fallback");
}

#[test]
fn test_supports_sees_the_requested_options() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    module.register(LazyImplementation::new(
        "gpu",
        |options| {
            if options.get("accelerated") == Some(&OptionValue::Boolean(true)) {
                Some(scores::OPTIMAL)
            } else {
                scores::UNSUPPORTED
            }
        },
        adds(100),
    ));

    // Default (empty) options: the gpu candidate does not apply.
    assert_eq!(module.default_selection().unwrap().name(), "fallback");

    let accelerated = Options::new().with("accelerated", true);
    let selection = module.selection(&accelerated).unwrap();
    assert_eq!(selection.name(), "gpu");
    assert_eq!(selection.score(), scores::OPTIMAL);
}

#[test]
fn test_losing_loader_is_never_materialized() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));

    let loaded = Rc::new(Cell::new(false));
    let flag = loaded.clone();
    module.register(LazyImplementation::new(
        "loser",
        |_| Some(scores::BASELINE),
        move || {
            flag.set(true);
            module_fn(|_args| Ok(Value::Undefined))
        },
    ));
    module.register(LazyImplementation::new("winner", |_| Some(scores::GOOD), adds(100)));

    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(105));
    assert!(!loaded.get(), "losing implementation must stay unloaded");
}

// ── Caching ──────────────────────────────────────────────────────────

#[test]
fn test_register_invalidates_default_cache() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(6));

    module.register(LazyImplementation::new("fast", |_| Some(scores::GOOD), adds(100)));
    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(105));
    assert_eq!(module.default_selection().unwrap().name(), "fast");
}

#[test]
fn test_register_invalidates_options_cache() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    let options = Options::new().with("mode", "wide");

    assert_eq!(module.selection(&options).unwrap().name(), "fallback");

    module.register(LazyImplementation::new("fast", |_| Some(scores::GOOD), adds(100)));
    assert_eq!(module.selection(&options).unwrap().name(), "fast");
}

#[test]
fn test_default_selection_is_computed_once() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    let a = module.default_selection().unwrap();
    let b = module.default_selection().unwrap();
    assert!(Rc::ptr_eq(&a, &b));
}

#[test]
fn test_options_key_order_does_not_fragment_cache() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    let a = module
        .selection(&Options::new().with("a", 1).with("b", 2))
        .unwrap();
    let b = module
        .selection(&Options::new().with("b", 2).with("a", 1))
        .unwrap();
    assert!(Rc::ptr_eq(&a, &b));

    // Different values land in a different cache entry.
    let c = module
        .selection(&Options::new().with("a", 1).with("b", 3))
        .unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
}

// ── Invocation errors ────────────────────────────────────────────────

#[test]
fn test_implementation_failure_propagates() {
    let module = LazyModule::create(LazyModuleConfig::new("h", adds(1)));
    let err = module.call(vec![Value::from("not a number")]).unwrap_err();
    match err {
        SelectError::Implementation(message) => {
            assert!(message.contains("expected an integer"))
        }
        other => panic!("expected an implementation error, got {}", other),
    }
}

// ── Configured default options ───────────────────────────────────────

#[test]
fn test_toml_options_match_builder_options() {
    let parsed = config::parse_default_options(
        r#"
        [options]
        accelerated = true
        batch = 32
        "#,
    )
    .unwrap();
    let built = Options::new().with("accelerated", true).with("batch", 32);
    assert_eq!(parsed, built);
    assert_eq!(parsed.canonical_key(), built.canonical_key());
}

#[test]
fn test_module_with_configured_defaults() {
    let defaults = config::parse_default_options(
        r#"
        [options]
        accelerated = true
        "#,
    )
    .unwrap();

    let module =
        LazyModule::create(LazyModuleConfig::new("h", adds(1)).default_options(defaults));
    module.register(LazyImplementation::new(
        "gpu",
        |options| {
            if options.get("accelerated") == Some(&OptionValue::Boolean(true)) {
                Some(scores::OPTIMAL)
            } else {
                scores::UNSUPPORTED
            }
        },
        adds(100),
    ));

    assert_eq!(module.default_selection().unwrap().name(), "gpu");
    assert_eq!(module.call(vec![Value::from(5)]).unwrap(), Value::from(105));
}
