use std::error::Error;

use assetsel::errors::SelectError;
use assetsel::graph::{AssetDefinition, AssetGraph, AssetKey};
use assetsel::render_selection;
use assetsel::selection::resolve_selection;
use assetsel::types::{OutputFormat, UnresolvedKeyPolicy};
use assetsel_test_utils::builders::{graph_from_edges, key, keys, taxi_graph};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn asset_key_round_trips_through_display() -> TestResult {
    let k: AssetKey = "manhattan/manhattan_stats".parse()?;

    assert_eq!(k, AssetKey::new(["manhattan", "manhattan_stats"]));
    assert_eq!(k.to_string(), "manhattan/manhattan_stats");
    assert_eq!(serde_json::to_string(&k)?, "\"manhattan/manhattan_stats\"");

    Ok(())
}

#[test]
fn asset_key_equality_is_component_wise() {
    assert_ne!(key("a/b"), AssetKey::new(["a/b"]));
    assert!(key("a/b") < key("a/c"));
    assert!(key("a") < key("a/b"));
}

#[test]
fn upstream_and_downstream_follow_declaration_order() {
    let graph = graph_from_edges(&[
        ("src_b", &[]),
        ("src_a", &[]),
        ("joined", &["src_a", "src_b"]),
        ("report", &["joined"]),
        ("audit", &["joined"]),
    ]);

    assert_eq!(graph.upstream_of(&key("joined")), vec![&key("src_a"), &key("src_b")]);
    assert_eq!(
        graph.downstream_of(&key("joined")),
        vec![&key("report"), &key("audit")]
    );
    assert!(graph.upstream_of(&key("missing")).is_empty());

    let roots: Vec<&AssetKey> = graph.roots().collect();
    assert_eq!(roots, vec![&key("src_b"), &key("src_a")]);
    let leaves: Vec<&AssetKey> = graph.leaves().collect();
    assert_eq!(leaves, vec![&key("report"), &key("audit")]);
}

#[test]
fn repeated_dependencies_collapse_to_one_edge() {
    let graph = graph_from_edges(&[("a", &[]), ("b", &["a", "a"])]);

    assert_eq!(graph.upstream_of(&key("b")), vec![&key("a")]);
    assert_eq!(graph.downstream_of(&key("a")), vec![&key("b")]);
}

#[test]
fn builder_rejects_unknown_dependencies() {
    let result = AssetGraph::builder()
        .asset(key("a"), keys(&["ghost"]))
        .build();

    match result {
        Err(SelectError::AssetNotFound(msg)) => assert!(msg.contains("ghost")),
        other => panic!("expected AssetNotFound, got {:?}", other),
    }
}

#[test]
fn builder_rejects_duplicate_assets() {
    let result = AssetGraph::builder()
        .asset(key("a"), Vec::new())
        .asset(key("a"), Vec::new())
        .build();

    match result {
        Err(SelectError::ConfigError(msg)) => assert!(msg.contains("more than once")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn builder_keeps_definition_metadata() -> TestResult {
    let mut def = AssetDefinition::new(key("reports/daily"), Vec::new());
    def.group = Some("reports".to_string());

    let graph = AssetGraph::builder().definition(def).build()?;
    let node = graph.node(&key("reports/daily")).expect("node exists");
    assert_eq!(node.group(), Some("reports"));
    assert_eq!(node.description(), None);

    Ok(())
}

#[test]
fn plain_output_prints_one_key_per_line() -> TestResult {
    let graph = taxi_graph();
    let selection = resolve_selection(&graph, ["+manhattan_map"], UnresolvedKeyPolicy::Strict)?;

    let out = render_selection(&selection, OutputFormat::Plain)?;
    assert_eq!(out, "manhattan/manhattan_stats\nmanhattan_map\n");

    Ok(())
}

#[test]
fn json_output_lists_selected_and_unresolved() -> TestResult {
    let graph = taxi_graph();
    let selection = resolve_selection(
        &graph,
        ["taxi_trips_file", "nope"],
        UnresolvedKeyPolicy::Lenient,
    )?;

    let out = render_selection(&selection, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(
        value,
        serde_json::json!({
            "selected": ["taxi_trips_file"],
            "unresolved": ["nope"],
        })
    );

    Ok(())
}
