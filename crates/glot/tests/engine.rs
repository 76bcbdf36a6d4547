//! Integration tests for rendering stored patterns through an engine

use std::sync::Arc;
use std::thread;

use glot::{
    Dialect, Encoder, Engine, EvalContext, EvalError, Language, MemorySource, ParameterSet, params,
};

fn engine(source: MemorySource) -> Engine {
    Engine::builder()
        .source(Arc::new(source))
        .language(Language::parse("en").unwrap())
        .build()
}

fn shop() -> MemorySource {
    MemorySource::new()
        .with("", "Greeting", "en", "Hello {Name}")
        .with("", "Greeting", "", "Hi {Name}")
        .with("", "Items", "en", "#Count{1: one item | {#} items}")
        .with("", "Cart", "en", "Your cart has {@Items(Count)}.")
        .with("", "Pair", "", "{0} and {1}")
        .with("", "Price", "", "Total: {Amount}")
        .with("", "FruitLabel", "", "an apple")
        .with("", "IsOne", "", "1")
        .with("", "Plural1", "en", "one")
        .with("", "Title", "", "Store")
        .with("shop", "Title", "", "Shop {@Motto}")
        .with("shop", "Motto", "", "(open)")
}

#[test]
fn test_render_by_key() {
    let engine = engine(shop());
    let params = params! { "Name" => "Ada" };
    assert_eq!(engine.render("Greeting", params).unwrap(), "Hello Ada");
}

#[test]
fn test_language_chain_falls_back_to_invariant() {
    let engine = engine(shop());
    let params = params! { "Name" => "Ada" };
    let de = Language::parse("de").unwrap();
    let en_us = Language::parse("en-US").unwrap();
    assert_eq!(engine.render_in("", "Greeting", &de, params.clone()).unwrap(), "Hi Ada");
    assert_eq!(engine.render_in("", "Greeting", &en_us, params).unwrap(), "Hello Ada");
}

#[test]
fn test_lookup_passes_arguments_by_name() {
    let engine = engine(shop());
    assert_eq!(
        engine.render("Cart", params! { "Count" => 1 }).unwrap(),
        "Your cart has one item."
    );
    assert_eq!(
        engine.render("Cart", params! { "Count" => 3 }).unwrap(),
        "Your cart has 3 items."
    );
}

#[test]
fn test_lookup_passes_arguments_by_position() {
    let engine = engine(shop());
    let params = params! { "A" => "salt" };
    assert_eq!(engine.eval_str("{@Pair(A, 'pepper')}", params).unwrap(), "salt and pepper");
}

#[test]
fn test_lookup_argument_format_becomes_default_format() {
    let engine = engine(shop());
    let params = params! { "Amount" => 12.5 };
    assert_eq!(engine.eval_str("{@Price(Amount:N2)}", params).unwrap(), "Total: 12.50");
}

#[test]
fn test_lookup_result_is_not_encoded_again() {
    let source = MemorySource::new().with("", "Quote", "", "[{0}]");
    let engine = Engine::builder()
        .source(Arc::new(source))
        .encoder(Encoder::Html)
        .build();
    let params = params! { "X" => "a&b" };
    assert_eq!(engine.eval_str("&{@Quote(X)}", params).unwrap(), "&amp;[a&amp;b]");
}

#[test]
fn test_key_from_parameter() {
    let engine = engine(shop());
    let params = params! { "Kind" => "Fruit" };
    assert_eq!(engine.eval_str("It is {@@Kind+Label}.", params).unwrap(), "It is an apple.");
    assert_eq!(engine.eval_str("[{@@Kind+Label}]", ParameterSet::new()).unwrap(), "[]");
}

#[test]
fn test_namespaced_lookup() {
    let engine = engine(shop());
    assert_eq!(engine.eval_str("{@Title}", ParameterSet::new()).unwrap(), "Store");
    assert_eq!(
        engine.eval_str("{@shop__Title}", ParameterSet::new()).unwrap(),
        "Shop (open)"
    );
    assert_eq!(
        engine
            .render_in("shop", "Title", engine.language(), ParameterSet::new())
            .unwrap(),
        "Shop (open)"
    );
}

#[test]
fn test_unknown_key_suggests_close_keys() {
    let engine = engine(shop());
    let error = engine.render("Greting", ParameterSet::new()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "pattern 'Greting' not found in namespace ''; did you mean: Greeting?"
    );

    let error = engine.eval_str("{@Cartt}", ParameterSet::new()).unwrap_err();
    let EvalError::UnresolvedLookup { key, suggestions, .. } = error else {
        panic!("expected unresolved lookup");
    };
    assert_eq!(key, "Cartt");
    assert_eq!(suggestions, vec!["Cart"]);
}

#[test]
fn test_cyclic_lookups_fail() {
    let source = MemorySource::new()
        .with("", "A", "", "a{@B}")
        .with("", "B", "", "b{@A}");
    let engine = engine(source);
    let error = engine.render("A", ParameterSet::new()).unwrap_err();
    let EvalError::CyclicReference { chain } = error else {
        panic!("expected cyclic reference, got {error}");
    };
    assert_eq!(chain.first(), chain.last());
    assert!(chain.contains(&"/A".to_string()));
}

#[test]
fn test_lookup_depth_is_limited() {
    let source = MemorySource::new()
        .with("", "L1", "", "{@L2}")
        .with("", "L2", "", "{@L3}")
        .with("", "L3", "", "deep");
    let engine = engine(source);
    let compiled = Dialect::standard().compile("{@L1}").unwrap();

    let mut ctx = EvalContext::builder().lookup(&engine).max_depth(3).build();
    assert_eq!(compiled.evaluate(&mut ctx).unwrap(), "deep");

    let mut ctx = EvalContext::builder().lookup(&engine).max_depth(2).build();
    let error = compiled.evaluate(&mut ctx).unwrap_err();
    assert!(matches!(error, EvalError::MaxDepthExceeded { depth: 2 }));
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn test_lookup_conditions() {
    let engine = engine(shop());
    let pattern = "#N{@IsOne: one | many}";
    assert_eq!(engine.eval_str(pattern, params! { "N" => 1 }).unwrap(), "one");
    assert_eq!(engine.eval_str(pattern, params! { "N" => 2 }).unwrap(), "many");

    let error = engine.eval_str("#N{@Nope: x | y}", params! { "N" => 1 }).unwrap_err();
    assert!(matches!(error, EvalError::UnresolvedCondition { ref spelling } if spelling == "@Nope"));
}

#[test]
fn test_templated_switch_uses_stored_rules() {
    let engine = engine(shop());
    let pattern = "#Plural(Count){{#} item | {#} items}";
    assert_eq!(engine.eval_str(pattern, params! { "Count" => 1 }).unwrap(), "1 item");
    assert_eq!(engine.eval_str(pattern, params! { "Count" => 4 }).unwrap(), "4 items");
}

#[test]
fn test_compilations_are_cached() {
    let engine = engine(shop());
    assert_eq!(engine.cache_len(), 0);
    engine.render("Cart", params! { "Count" => 2 }).unwrap();
    assert_eq!(engine.cache_len(), 2);
    engine.render("Cart", params! { "Count" => 5 }).unwrap();
    assert_eq!(engine.cache_len(), 2);

    let first = engine.compiled("{X}").unwrap();
    let second = engine.compiled("{X}").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    engine.clear_cache();
    assert_eq!(engine.cache_len(), 0);
}

#[test]
fn test_compile_errors_name_the_key() {
    let source = MemorySource::new().with("", "Broken", "", "{Name");
    let engine = engine(source);
    let error = engine.render("Broken", ParameterSet::new()).unwrap_err();
    assert!(matches!(error, EvalError::Compile { ref key, .. } if key == "/Broken"));
}

#[test]
fn test_engine_is_shared_between_threads() {
    let engine = Arc::new(engine(shop()));
    let handles: Vec<_> = (1..=4)
        .map(|count| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.render("Items", params! { "Count" => count }).unwrap())
        })
        .collect();
    let rendered: Vec<String> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
    assert_eq!(rendered, vec!["one item", "2 items", "3 items", "4 items"]);
}
