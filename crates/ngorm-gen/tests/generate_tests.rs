use ngorm_gen::{Config, EntityKind, GenError, Generator, RawFormatter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const MODEL: &str = r#"
use ngorm::{Edge, Tag};

/// Someone in the graph.
#[derive(Default)]
pub struct Person {
    pub tag: Tag,
    /// Display name.
    pub name: String,
    #[ngorm(idx)]
    pub age: i32,
}

#[derive(Default)]
pub struct Follow {
    pub edge: Edge,
    pub degree: f64,
}

pub struct Settings {
    pub theme: String,
}
"#;

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn output_of(dir: &TempDir) -> PathBuf {
    dir.path().join("ngorm_generate.rs")
}

#[test]
fn test_run_writes_beside_sources() {
    let dir = workspace(&[("model.rs", MODEL)]);
    let written = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(written, output_of(&dir));
    let out = fs::read_to_string(&written).unwrap();
    assert!(out.starts_with("// Code generated by \"ngormgen\"; DO NOT EDIT."));
    assert!(out.contains(
        "\"CREATE TAG IF NOT EXISTS person(name string COMMENT 'Display name.', age int32 COMMENT '');\""
    ));
    assert!(out.contains("\"CREATE TAG INDEX IF NOT EXISTS idx_age ON person(age)\""));
    assert!(out.contains("\"CREATE EDGE IF NOT EXISTS follow(degree double COMMENT '');\""));
    assert!(out.contains("impl ::ngorm::TagModel for Person"));
    assert!(out.contains("impl ::ngorm::EdgeModel for Follow"));
}

#[test]
fn test_plain_structs_produce_nothing() {
    let dir = workspace(&[("model.rs", MODEL)]);
    let written = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap();
    let out = fs::read_to_string(written).unwrap();

    assert!(!out.contains("Settings"));
    assert!(!out.contains("theme"));
}

#[test]
fn test_create_schema_follows_model_order() {
    let dir = workspace(&[("model.rs", MODEL)]);
    let written = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap();
    let out = fs::read_to_string(written).unwrap();

    let person = out.find("Person::create(session);").unwrap();
    let follow = out.find("Follow::create(session);").unwrap();
    assert!(person < follow);
}

#[test]
fn test_generation_is_deterministic() {
    let dir = workspace(&[("b.rs", MODEL), ("a.rs", "pub struct Place { tag: Tag, x: f32 }")]);
    let generator = Generator::new(Config::default());

    let first = fs::read_to_string(generator.run(&[dir.path().to_path_buf()]).unwrap()).unwrap();
    let second = fs::read_to_string(generator.run(&[dir.path().to_path_buf()]).unwrap()).unwrap();
    assert_eq!(first, second);

    // a.rs sorts first, and the previous output is not re-read.
    let place = first.find("impl Place {").unwrap();
    let person = first.find("impl Person {").unwrap();
    assert!(place < person);
}

#[test]
fn test_bool_field_aborts_without_output() {
    let dir = workspace(&[("model.rs", "pub struct Flag { tag: Tag, on: bool }")]);
    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();

    assert!(matches!(err, GenError::UnsupportedType { ref ty, .. } if ty == "bool"));
    assert!(!output_of(&dir).exists());
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = workspace(&[("model.rs", "pub struct Both { tag: Tag, edge: Edge }")]);
    fs::write(output_of(&dir), "previous").unwrap();

    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, GenError::AmbiguousKind { .. }));
    assert_eq!(fs::read_to_string(output_of(&dir)).unwrap(), "previous");
}

#[test]
fn test_allow_list_restricts_models() {
    let dir = workspace(&[("model.rs", MODEL)]);
    let mut config = Config::default();
    config.scan.types = vec!["Follow".to_string(), "Missing".to_string()];

    let out = fs::read_to_string(
        Generator::new(config)
            .run(&[dir.path().to_path_buf()])
            .unwrap(),
    )
    .unwrap();
    assert!(out.contains("impl Follow {"));
    assert!(!out.contains("impl Person {"));
}

#[test]
fn test_composite_index_target() {
    let dir = workspace(&[(
        "model.rs",
        "pub struct Player { tag: Tag, #[ngorm(idx = \"name,age\")] name: String, age: i64 }",
    )]);
    let out = fs::read_to_string(
        Generator::new(Config::default())
            .run(&[dir.path().to_path_buf()])
            .unwrap(),
    )
    .unwrap();
    assert!(out.contains("\"CREATE TAG INDEX IF NOT EXISTS idx_name ON player(name,age)\""));
}

#[test]
fn test_explicit_output_and_file_list() {
    let dir = workspace(&[("model.rs", MODEL), ("other.rs", "pub struct Zone { tag: Tag }")]);
    let mut config = Config::default();
    config.output.path = Some(dir.path().join("out").join("graph.rs"));
    fs::create_dir(dir.path().join("out")).unwrap();

    let written = Generator::new(config)
        .run(&[dir.path().join("model.rs")])
        .unwrap();
    assert_eq!(written, dir.path().join("out").join("graph.rs"));

    let out = fs::read_to_string(written).unwrap();
    assert!(out.contains("impl Person {"));
    assert!(!out.contains("Zone"));
}

#[test]
fn test_trim_prefix_and_line_comment() {
    let dir = workspace(&[(
        "model.rs",
        "/// Stored users.\npub struct DbUser { tag: Tag, name: String }",
    )]);
    let mut config = Config::default();
    config.naming.trim_prefix = Some("Db".to_string());
    config.naming.line_comment = true;

    let out = fs::read_to_string(
        Generator::new(config)
            .run(&[dir.path().to_path_buf()])
            .unwrap(),
    )
    .unwrap();
    assert!(out.contains(
        "\"CREATE TAG IF NOT EXISTS user(name string COMMENT '') COMMENT = 'Stored users.';\""
    ));
}

#[test]
fn test_extract_reports_kinds() {
    let generator = Generator::new(Config::default());
    let entities = generator
        .extract(&[ngorm_gen::SourceFile::new("model.rs", MODEL)])
        .unwrap();
    let kinds: Vec<_> = entities.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EntityKind::Vertex, EntityKind::Edge, EntityKind::Plain]
    );
}

#[test]
fn test_raw_formatter_still_produces_banner() {
    let generator = Generator::new(Config::default()).with_formatter(RawFormatter);
    let out = generator
        .render(&[ngorm_gen::SourceFile::new("model.rs", MODEL)])
        .unwrap();
    assert!(out.starts_with("// Code generated by \"ngormgen\"; DO NOT EDIT.\n"));
    assert!(out.contains("impl Person"));
}

#[test]
fn test_duplicate_labels_across_files() {
    let dir = workspace(&[
        ("a.rs", "pub struct Person { tag: Tag }"),
        ("b.rs", "#[ngorm(name = \"person\")] pub struct Human { tag: Tag }"),
    ]);
    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, GenError::DuplicateExternalName { .. }));
    assert!(!output_of(&dir).exists());
}

#[test]
fn test_non_identifier_names_abort_without_output() {
    let dir = workspace(&[(
        "model.rs",
        "#[ngorm(name = \"my label\")] pub struct P { tag: Tag, #[ngorm(name = \"full name\")] name: String }",
    )]);
    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, GenError::InvalidExternalName { ref name, .. } if name == "my label"));
    assert!(!output_of(&dir).exists());

    let dir = workspace(&[(
        "model.rs",
        "pub struct P { tag: Tag, #[ngorm(name = \"full-name\")] name: String }",
    )]);
    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, GenError::InvalidExternalName { ref declared, .. } if declared == "P.name"));
}

#[test]
fn test_shared_index_name_aborts_without_output() {
    let dir = workspace(&[
        ("a.rs", "pub struct Person { tag: Tag, #[ngorm(idx)] age: i32 }"),
        ("b.rs", "pub struct Pet { tag: Tag, #[ngorm(idx)] age: i32 }"),
    ]);
    let err = Generator::new(Config::default())
        .run(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, GenError::DuplicateIndex { .. }));
    assert!(!output_of(&dir).exists());
}
