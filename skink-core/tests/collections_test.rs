// skink-core - Collection evaluation integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for vector and map evaluation.

mod common;

use common::*;

// =============================================================================
// Vectors
// =============================================================================

#[test]
fn test_vector_elements_are_evaluated() {
    assert_eval!(
        "[1 (+ 1 1) (* 3 1)]",
        SkinkVal::vector(vec![SkinkVal::int(1), SkinkVal::int(2), SkinkVal::int(3)])
    );
}

#[test]
fn test_empty_vector() {
    assert_eval!("[]", SkinkVal::vector(vec![]));
}

#[test]
fn test_vector_failure_aborts() {
    assert_eval_err!("[1 missing 3]");
}

#[test]
fn test_vector_resolves_symbols() {
    let env = new_env();
    eval_str_with_env("(def! x 9)", &env).unwrap();
    assert_eval_with_env!(
        "[x x]",
        SkinkVal::vector(vec![SkinkVal::int(9), SkinkVal::int(9)]),
        &env
    );
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn test_map_values_are_evaluated() {
    assert_eval!(
        "{:a (+ 1 1)}",
        SkinkVal::map(vec![(
            SkinkVal::keyword(Keyword::new("a")),
            SkinkVal::int(2),
        )])
    );
}

#[test]
fn test_map_keys_are_evaluated() {
    // Computed keys are allowed
    assert_eval!(
        "{(+ 1 1) :two}",
        SkinkVal::map(vec![(
            SkinkVal::int(2),
            SkinkVal::keyword(Keyword::new("two")),
        )])
    );
}

#[test]
fn test_map_literal_round_trips() {
    assert_eval!(
        "{:a 1}",
        SkinkVal::map(vec![(
            SkinkVal::keyword(Keyword::new("a")),
            SkinkVal::int(1),
        )])
    );
}

#[test]
fn test_map_failure_aborts() {
    assert_eval_err!("{:a missing}");
    assert_eval_err!("{missing 1}");
}

#[test]
fn test_evaluated_keys_collapse() {
    // Two keys that evaluate to the same value collapse into one entry
    let result = eval_str("{(+ 1 1) :first 2 :second}").unwrap();
    if let SkinkVal::Map(map) = result {
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get(&SkinkVal::int(2)),
            Some(&SkinkVal::keyword(Keyword::new("second")))
        );
    } else {
        panic!("Expected map");
    }
}

#[test]
fn test_map_as_value() {
    let env = new_env();
    eval_str_with_env("(def! m {:a 1})", &env).unwrap();
    assert_eval_with_env!(
        "m",
        SkinkVal::map(vec![(
            SkinkVal::keyword(Keyword::new("a")),
            SkinkVal::int(1),
        )]),
        &env
    );
}
