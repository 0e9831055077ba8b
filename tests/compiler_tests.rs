// tests/compiler_tests.rs

use serde_json::json;
use valgen::compiler::{CompileOptions, Compiled, compile, compile_json, compile_with};
use valgen::convert::NodeError;
use valgen::generator::{Generator, Sample};
use valgen::{parse, to_source_json};

fn render_all(expression: &str) -> Vec<String> {
    let compiled = compile(&parse(expression).unwrap());
    compiled.iter().map(|sample| sample.render()).collect()
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_leaves_compile_to_text() {
    assert_eq!(compile(&parse("auto").unwrap()), Compiled::Text("auto".into()));
    assert_eq!(compile(&parse("'none'").unwrap()), Compiled::Text("none".into()));
    assert_eq!(compile(&parse("<color>").unwrap()), Compiled::Text("<color>".into()));
    assert_eq!(compile(&parse("auto").unwrap()).as_text(), Some("auto"));
    assert_eq!(compile(&parse("a b").unwrap()).as_text(), None);
}

#[test]
fn test_group_is_transparent() {
    assert_eq!(compile(&parse("[[auto]]").unwrap()), Compiled::Text("auto".into()));
    assert_eq!(
        compile(&parse("[a | b]").unwrap()),
        compile(&parse("a | b").unwrap())
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_exclusive_or_in_declared_order() {
    assert_eq!(render_all(r#""red" | "blue""#), vec!["red", "blue"]);
}

#[test]
fn test_and_is_ordered_cross_product() {
    assert_eq!(
        render_all("[a | b] [x | y]"),
        vec!["a x", "a y", "b x", "b y"]
    );
}

#[test]
fn test_permuted_and_covers_every_order() {
    assert_eq!(
        render_all("a && b && c"),
        vec!["a b c", "a c b", "b a c", "b c a", "c a b", "c b a"]
    );
}

#[test]
fn test_inclusive_or_is_non_empty_subsets() {
    assert_eq!(
        render_all("a || b || c"),
        vec!["a", "b", "c", "a b", "a c", "b c", "a b c"]
    );
}

#[test]
fn test_inclusive_or_crosses_member_values() {
    assert_eq!(
        render_all("[a | b] || c"),
        vec!["a", "b", "c", "a c", "b c"]
    );
}

// ============================================================================
// Quantifiers
// ============================================================================

#[test]
fn test_optional_term() {
    let values = render_all(r#""bold"? "red""#);
    assert_eq!(values, vec!["red", "bold red"]);
}

#[test]
fn test_optional_item_shapes() {
    let compiled = compile(&parse("bold? red").unwrap());
    let items: Vec<Sample> = compiled.iter().collect();
    assert_eq!(
        items[0],
        Sample::Seq(vec![Sample::Seq(vec![]), Sample::Text("red".into())])
    );
    assert_eq!(
        items[1],
        Sample::Seq(vec![
            Sample::Seq(vec![Sample::Text("bold".into())]),
            Sample::Text("red".into())
        ])
    );
}

#[test]
fn test_range_lengths_are_bounded() {
    let compiled = compile(&parse("a{2,5}").unwrap());
    let lengths: Vec<usize> = compiled.iter().map(|s| s.flatten().len()).collect();
    assert_eq!(lengths, vec![2, 3, 4, 5]);
}

#[test]
fn test_range_is_not_capped() {
    let compiled = compile_with(
        &parse("a{6,7}").unwrap(),
        &CompileOptions {
            repeat_limit: 2,
            draw_limit: None,
        },
    );
    let lengths: Vec<usize> = compiled.iter().map(|s| s.flatten().len()).collect();
    assert_eq!(lengths, vec![6, 7]);
}

#[test]
fn test_zero_or_more_uses_repeat_limit() {
    assert_eq!(render_all("a*"), vec!["", "a", "a a", "a a a", "a a a a"]);

    let compiled = compile_with(
        &parse("a*").unwrap(),
        &CompileOptions {
            repeat_limit: 2,
            draw_limit: None,
        },
    );
    assert_eq!(compiled.iter().count(), 3);
}

#[test]
fn test_one_or_more_starts_at_one() {
    assert_eq!(render_all("a+"), vec!["a", "a a", "a a a", "a a a a"]);
}

#[test]
fn test_repeat_draws_ordered_combinations() {
    assert_eq!(
        render_all("[x | y]{2}"),
        vec!["x x", "x y", "y x", "y y"]
    );
}

#[test]
fn test_comma_list() {
    let values = render_all("a#");
    assert_eq!(values[0], "a");
    assert_eq!(values[1], "a , a");
    assert_eq!(values.last().unwrap(), "a , a , a , a , a");
    assert_eq!(values.len(), 5);
}

// ============================================================================
// Laziness and Restarting
// ============================================================================

#[test]
fn test_prefix_of_huge_space_terminates() {
    let node = parse("[a | b | c | d]* && [e | f | g]+ && h#").unwrap();
    let compiled = compile(&node);

    let size = compiled.as_generator().unwrap().size().unwrap();
    assert!(size > 1_000_000);

    let prefix: Vec<Sample> = compiled.iter().take(10).collect();
    assert_eq!(prefix.len(), 10);
    assert!(prefix.iter().all(|s| s.flatten().len() < 64));
}

#[test]
fn test_wide_range_is_sized_and_sampled_lazily() {
    let compiled = compile(&parse("a{0,4000000000}").unwrap());

    let size = compiled.as_generator().unwrap().size();
    assert_eq!(size, Some(4_000_000_001));

    let prefix: Vec<String> = compiled.iter().take(3).map(|s| s.render()).collect();
    assert_eq!(prefix, vec!["", "a", "a a"]);
}

#[test]
fn test_enumeration_restarts() {
    let compiled = compile(&parse("[a | b] || c*").unwrap());
    let first: Vec<Sample> = compiled.iter().take(7).collect();
    let second: Vec<Sample> = compiled.iter().take(7).collect();
    assert_eq!(first, second);
}

#[test]
fn test_size_matches_count() {
    for expression in ["a || b c", "a && [b | c]", "a{1,3} b?", "[a | b]#"] {
        let compiled = compile(&parse(expression).unwrap());
        let generator = compiled.as_generator().unwrap();
        assert_eq!(
            generator.size(),
            Some(generator.iter().count() as u64),
            "for {}",
            expression
        );
    }
}

#[test]
fn test_generators_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Generator>();
    assert_send_sync::<Compiled>();
}

// ============================================================================
// Unknown Node Types
// ============================================================================

#[test]
fn test_compile_json() {
    let value = json!({"xor": [{"string": "red"}, {"string": "blue"}]});
    let compiled = compile_json(&value, &CompileOptions::default()).unwrap();
    let values: Vec<String> = compiled.iter().map(|s| s.render()).collect();
    assert_eq!(values, vec!["red", "blue"]);
}

#[test]
fn test_unknown_node_type_reaches_compiler() {
    let value = json!({"and": [{"identifier": "a"}, {"lookahead": {"identifier": "b"}}]});
    assert_eq!(
        compile_json(&value, &CompileOptions::default()),
        Err(NodeError::UnknownNodeType("lookahead".into()))
    );
}

#[test]
fn test_unknown_node_type_reaches_printer() {
    let value = json!({"?": {"optional": {"identifier": "a"}}});
    assert_eq!(
        to_source_json(&value),
        Err(NodeError::UnknownNodeType("optional".into()))
    );
}
