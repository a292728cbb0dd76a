use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tempfile::NamedTempFile;

use assetsel::cli::CliArgs;
use assetsel::config::{ConfigFile, RawConfigFile, load_and_validate};
use assetsel::errors::SelectError;
use assetsel::graph::AssetGraph;
use assetsel::selection::{SelectionSyntaxError, SyntaxErrorKind, resolve_selection};
use assetsel::types::{OutputFormat, UnresolvedKeyPolicy};
use assetsel_test_utils::builders::{AssetConfigBuilder, ConfigFileBuilder, key, keys};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn demo_definitions_load_into_a_graph() -> TestResult {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_and_validate(manifest.join("demos/taxi.toml"))?;

    assert_eq!(cfg.unresolved_keys(), UnresolvedKeyPolicy::Strict);
    assert_eq!(cfg.assets().len(), 5);

    let stats = &cfg.assets()[&key("manhattan/manhattan_stats")];
    assert_eq!(stats.deps, keys(&["taxi_zones"]));
    assert_eq!(stats.group.as_deref(), Some("manhattan"));

    let graph = AssetGraph::from_config(&cfg);
    assert_eq!(graph.len(), 5);
    assert_eq!(
        graph.upstream_of(&key("manhattan_map")),
        vec![&key("manhattan/manhattan_stats")]
    );
    assert_eq!(
        graph.node(&key("taxi_trips_file")).and_then(|n| n.description()),
        Some("Raw trip records")
    );

    let selection = resolve_selection(&graph, ["*manhattan_map"], cfg.unresolved_keys())?;
    assert_eq!(selection.len(), 4);
    for k in ["taxi_zones_file", "taxi_zones", "manhattan/manhattan_stats", "manhattan_map"] {
        assert!(selection.contains(&key(k)), "missing {k}");
    }

    Ok(())
}

#[test]
fn lenient_policy_is_read_from_config_section() -> TestResult {
    let file = write_config(
        r#"
[config]
unresolved_keys = "lenient"

[asset.a]
"#,
    );

    let cfg = load_and_validate(file.path())?;
    assert_eq!(cfg.unresolved_keys(), UnresolvedKeyPolicy::Lenient);

    Ok(())
}

#[test]
fn policy_defaults_to_strict() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_asset("a", AssetConfigBuilder::new().build())
        .build();
    assert_eq!(cfg.unresolved_keys(), UnresolvedKeyPolicy::Strict);
    assert_eq!(UnresolvedKeyPolicy::default(), UnresolvedKeyPolicy::Strict);
    assert_eq!(OutputFormat::default(), OutputFormat::Plain);

    Ok(())
}

#[test]
fn unknown_policy_is_a_toml_error() {
    let file = write_config(
        r#"
[config]
unresolved_keys = "sometimes"

[asset.a]
"#,
    );

    match load_and_validate(file.path()) {
        Err(SelectError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {:?}", other),
    }
}

#[test]
fn policy_parses_from_str() {
    assert_eq!(
        UnresolvedKeyPolicy::from_str(" Lenient "),
        Ok(UnresolvedKeyPolicy::Lenient)
    );
    assert_eq!(
        UnresolvedKeyPolicy::from_str("strict"),
        Ok(UnresolvedKeyPolicy::Strict)
    );
    assert!(UnresolvedKeyPolicy::from_str("loose").is_err());
}

#[test]
fn dependency_cycle_returns_structured_error() {
    let file = write_config(
        r#"
[asset.a]
deps = ["b"]

[asset.b]
deps = ["a"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(SelectError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains('a') || msg.contains('b'));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_dependency_returns_config_error() {
    let file = write_config(
        r#"
[asset.a]
deps = ["non_existent"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(SelectError::ConfigError(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("non_existent"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_dependency_is_rejected() {
    let result = ConfigFileBuilder::new()
        .with_asset("a", AssetConfigBuilder::new().dep("a").build())
        .try_build();

    match result {
        Err(SelectError::ConfigError(msg)) => assert!(msg.contains("cannot depend on itself")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn keys_with_selection_markers_are_rejected() {
    for bad in ["taxi*zones", "a+", "a b", "a,b"] {
        let result = ConfigFileBuilder::new()
            .with_asset(bad, AssetConfigBuilder::new().build())
            .try_build();

        match result {
            Err(SelectError::ConfigError(msg)) => {
                assert!(msg.contains("invalid key component"), "{bad}: {msg}")
            }
            other => panic!("{bad}: expected ConfigError, got {:?}", other),
        }
    }
}

#[test]
fn empty_key_components_are_rejected() {
    let result = ConfigFileBuilder::new()
        .with_asset("a", AssetConfigBuilder::new().dep("b//c").build())
        .try_build();

    match result {
        Err(SelectError::ConfigError(msg)) => {
            assert!(msg.contains("dependency of asset 'a'"));
            assert!(msg.contains("empty path component"));
        }
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn config_without_assets_is_rejected() {
    match ConfigFile::try_from(RawConfigFile::default()) {
        Err(SelectError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("expected ConfigError, got {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    match load_and_validate("/definitely/not/here/Assets.toml") {
        Err(SelectError::IoError(_)) => {}
        other => panic!("expected IoError, got {:?}", other),
    }
}

fn run_with_demo(selection: &str) -> anyhow::Result<()> {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let config = manifest.join("demos/taxi.toml");
    let args = CliArgs::parse_from([
        "assetsel",
        "--config",
        config.to_str().expect("utf-8 manifest path"),
        selection,
    ]);
    assetsel::run(args)
}

#[test]
fn run_keeps_library_errors_downcastable() {
    let err = run_with_demo("nope").expect_err("unknown key under strict policy");
    match err.downcast_ref::<SelectError>() {
        Some(SelectError::UnresolvedKeys(missing)) => assert_eq!(missing, &keys(&["nope"])),
        other => panic!("expected UnresolvedKeys, got {:?}", other),
    }

    let err = run_with_demo("*a/*").expect_err("empty component");
    let syntax = err
        .downcast_ref::<SelectionSyntaxError>()
        .expect("syntax error is the root cause");
    assert_eq!(syntax.kind, SyntaxErrorKind::EmptyComponent);
}

#[test]
fn run_adds_context_to_config_errors() {
    let args = CliArgs::parse_from([
        "assetsel",
        "--config",
        "/definitely/not/here/Assets.toml",
        "taxi_zones",
    ]);

    let err = assetsel::run(args).expect_err("missing definitions file");
    assert!(format!("{err:#}").contains("loading asset definitions"));
    match err.downcast_ref::<SelectError>() {
        Some(SelectError::IoError(_)) => {}
        other => panic!("expected IoError, got {:?}", other),
    }
}
