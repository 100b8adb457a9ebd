use std::io::Write;

use pmi_classify::{RegistryError, SchemaRegistry};
use pmi_model::{ClassifyError, Schema, SchemaError, SchemaSpec};

#[test]
fn builtin_catalog_compiles() {
    let registry = SchemaRegistry::builtin().expect("builtin catalog");
    assert_eq!(registry.len(), 2);
    assert!(registry.get("Brother HL-L2350DW series").is_some());
    assert!(registry.get("Brother MFC-L2710DW series").is_some());
}

#[test]
fn lookup_is_exact_only() {
    let registry = SchemaRegistry::builtin().expect("builtin catalog");
    let err = registry.lookup("Brother HL-L2350DW").unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::UnknownModel { ref model } if model == "Brother HL-L2350DW"
    ));
}

#[test]
fn duplicate_model_is_rejected() {
    let mut registry = SchemaRegistry::builtin().expect("builtin catalog");
    let spec = SchemaSpec {
        model: "Brother HL-L2350DW series".to_string(),
        info_columns: Vec::new(),
        group_rules: Vec::new(),
        plain_rules: Vec::new(),
        ignore_names: Vec::new(),
    };
    let err = registry.insert(Schema::compile(spec).expect("schema")).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateModel { .. }));
}

#[test]
fn schemas_iterate_in_model_order() {
    let registry = SchemaRegistry::builtin().expect("builtin catalog");
    let models: Vec<&str> = registry.schemas().map(|s| s.model.as_str()).collect();
    let mut sorted = models.clone();
    sorted.sort_unstable();
    assert_eq!(models, sorted);
}

#[test]
fn loads_schemas_from_a_json_file() {
    let json = r#"[
        {
            "model": "Acme LaserJot 9000",
            "info_columns": ["Model Name"],
            "plain_rules": [
                {"column": "Page Counter", "metric": "printer_page_total"}
            ]
        }
    ]"#;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{json}").expect("write");

    let mut registry = SchemaRegistry::builtin().expect("builtin catalog");
    let added = registry.load_schema_file(file.path()).expect("load");
    assert_eq!(added, 1);
    assert!(registry.get("Acme LaserJot 9000").is_some());
}

#[test]
fn schema_file_with_bad_pattern_fails_at_load_time() {
    let json = r#"[
        {
            "model": "Acme LaserJot 9000",
            "group_rules": [
                {"metric": "m_total", "pattern": "^no capture group$", "label": "part"}
            ]
        }
    ]"#;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{json}").expect("write");

    let mut registry = SchemaRegistry::empty();
    let err = registry.load_schema_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Schema(SchemaError::CaptureCount { groups: 0, .. })
    ));
}

#[test]
fn unreadable_schema_file_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let mut registry = SchemaRegistry::empty();
    let err = registry.load_schema_file(&path).unwrap_err();
    assert!(matches!(err, RegistryError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}
