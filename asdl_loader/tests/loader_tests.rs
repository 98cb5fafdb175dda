/* Schema loading tests
 *
 * These tests write schema files to a scratch directory and load them back
 * through the extension-based dispatch.
 */

use asdl_loader::asdl_types::TypeBody;
use asdl_loader::load_schema;
use std::fs;

#[test]
fn loads_asdl_text_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("shapes.asdl");
    fs::write(
        &path,
        "module shapes {\n  shape = Circle(int r) | Square(int side)\n}\n",
    )
    .expect("Failed to write schema");

    let module = load_schema(&path).expect("schema should load");
    assert_eq!(module.name, "shapes");
    match &module.types[0].body {
        TypeBody::Sum(sum) => assert_eq!(sum.variants.len(), 2),
        TypeBody::Product(_) => panic!("expected a sum"),
    }
}

#[test]
fn loads_yaml_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("shapes.yaml");
    fs::write(
        &path,
        r#"
name: shapes
types:
  - name: point
    body:
      product:
        fields:
          - name: x
            type: int
          - name: y
            type: int
"#,
    )
    .expect("Failed to write schema");

    let module = load_schema(&path).expect("schema should load");
    match &module.types[0].body {
        TypeBody::Product(product) => assert_eq!(product.fields.len(), 2),
        TypeBody::Sum(_) => panic!("expected a product"),
    }
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("absent.asdl");

    let err = load_schema(&path).unwrap_err();
    assert!(
        format!("{err:#}").contains("absent.asdl"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn syntax_error_names_the_path_and_position() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.asdl");
    fs::write(&path, "module broken {\n  p = (int x\n}\n").expect("Failed to write schema");

    let message = format!("{:#}", load_schema(&path).unwrap_err());
    assert!(message.contains("broken.asdl"), "{message}");
    assert!(message.contains("3:1"), "{message}");
}
