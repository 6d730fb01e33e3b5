use flowdoc::{
    apply_model, apply_model_with_diagnostics, parse, DiagnosticKind, Diagnostics,
    FieldDefinition, FieldType, ModelDefinition, ModelRegistry, Parser, Value,
};

fn catalog() -> ModelDefinition {
    ModelDefinition::new("Item")
        .with_field(FieldDefinition::new("title").with_alias("t"))
        .with_field(FieldDefinition::new("price").with_alias("p").with_type(FieldType::Float))
        .with_field(FieldDefinition::new("stock").with_alias("s").with_type(FieldType::Int))
        .with_field(FieldDefinition::new("released").with_alias("r").with_type(FieldType::Date))
        .with_field(FieldDefinition::new("listed").with_alias("l").with_type(FieldType::Bool))
}

#[test]
fn test_alias_resolution() {
    let model = ModelDefinition::new("Person")
        .with_field(FieldDefinition::new("name").with_alias("n"));
    let doc = parse("n = \"X\"\n").unwrap();
    let applied = apply_model(&doc, &model);
    assert_eq!(applied.get("name"), Some(&Value::from("X")));
    assert!(applied.get("n").is_none());
}

#[test]
fn test_coercion_fallback() {
    let model = ModelDefinition::new("Person")
        .with_field(FieldDefinition::new("age").with_type(FieldType::Int));
    let doc = parse("age = \"abc\"\n").unwrap();
    let mut diagnostics = Diagnostics::new();
    let applied = apply_model_with_diagnostics(&doc, &model, &mut diagnostics);

    assert_eq!(applied.get("age"), Some(&Value::from("abc")));
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.kind, DiagnosticKind::CoercionFallback);
    assert_eq!(diagnostic.path, "age");
    assert_eq!(diagnostic.message, "invalid int value: abc");
}

#[test]
fn test_every_type_coerces() {
    let doc = parse("t = 42\np = 3\ns = \"12\"\nr = 2023-12-01\nl = \"false\"\n").unwrap();
    let applied = apply_model(&doc, &catalog());
    let keys: Vec<_> = applied.keys().cloned().collect();
    assert_eq!(keys, vec!["title", "price", "stock", "released", "listed"]);
    assert_eq!(applied.get("title"), Some(&Value::from("42")));
    assert_eq!(applied.get("price"), Some(&Value::Float(3.0)));
    assert_eq!(applied.get("stock"), Some(&Value::Integer(12)));
    assert_eq!(applied.get("released"), Some(&Value::from("2023-12-01")));
    assert_eq!(applied.get("listed"), Some(&Value::Bool(false)));
}

#[test]
fn test_idempotence() {
    let doc = parse("items:\n  t = Lamp\n  p = 19\n  s = many\n  extra = [1, 2]\n").unwrap();
    let model = catalog();
    let once = apply_model(&doc, &model);
    let twice = apply_model(&once, &model);
    assert_eq!(once, twice);
}

#[test]
fn test_parser_collects_model_diagnostics() {
    let text = "\
$models:
  Item:
    fields:
      stock:
        alias = s
        type = integer
      broken = 1
use_model = Item
shelf:
  s = 3
  junk line
";
    let mut parser = Parser::from_str(text);
    let doc = parser.parse_with_model(None).unwrap();

    // `integer` is not a known type, so the field stays a string.
    assert_eq!(doc.get("shelf").and_then(|s| s.pointer("stock")), Some(&Value::from("3")));

    let diagnostics = parser.diagnostics();
    assert_eq!(diagnostics.count(DiagnosticKind::IgnoredLine), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::InvalidAttribute), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::SkippedField), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::CoercionFallback), 0);
}

#[test]
fn test_registry_shared_across_threads() {
    let mut registry = ModelRegistry::new();
    registry.register(catalog());

    std::thread::scope(|scope| {
        for n in 0..4 {
            let registry = &registry;
            scope.spawn(move || {
                let text = format!("use_model = Item\nshelf:\n  s = {}\n", n);
                let doc = flowdoc::parse_with_model(&text, Some(registry)).unwrap();
                assert_eq!(
                    doc.get("shelf").and_then(|s| s.pointer("stock")),
                    Some(&Value::Integer(n))
                );
            });
        }
    });
}
