use flowdoc::{
    flow, flow_to_json, from_str, json_to_flow, load, load_binary, load_with_model, parse,
    parse_with_model, save, save_binary, stringify, to_string, Error, Map, ModelRegistry, Value,
};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::tempdir;

const PERSON_DOC: &str = "\
# people file
$models:
  Person:
    fields:
      name:
        alias = n
      age:
        alias = a
        type = int
        id = 1
      joined:
        alias = j
        type = datetime
use_model = Person
version = 2
owner:
  n = \"Ann Lee\"
  a = 41
  j = 2024-01-15T10:30:00Z
guest:
  n = Bob
  a = abc
";

fn mapping(value: Value) -> Map {
    match value {
        Value::Mapping(map) => map,
        other => panic!("expected mapping, got {:?}", other),
    }
}

#[test]
fn test_nesting_example() {
    let doc = parse("a:\n  b:\n    c = 1\n  d = 2\n").unwrap();
    assert_eq!(doc, mapping(flow!({ "a": { "b": { "c": 1 }, "d": 2 } })));
}

#[test]
fn test_list_round_trip_is_verbatim() {
    let doc = parse("list = [a, b, c]\n").unwrap();
    assert_eq!(
        doc.get("list"),
        Some(&Value::List(vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("c"),
        ]))
    );
    assert_eq!(stringify(&doc), "list = [a, b, c]\n");
}

#[test]
fn test_realistic_document() {
    let text = "\
# service configuration
app:
\tname = \"Demo App\"   # tab-indented
\tversion = 1.5
  debug = false

database:
  host = localhost
  port = 5432
  replicas = [db1, db2]
  pool:
    min = 1
    max = 10
";
    let doc = parse(text).unwrap();
    let expected = mapping(flow!({
        "app": { "name": "Demo App", "version": 1.5, "debug": false },
        "database": {
            "host": "localhost",
            "port": 5432,
            "replicas": ["db1", "db2"],
            "pool": { "min": 1, "max": 10 }
        }
    }));
    assert_eq!(doc, expected);
}

#[test]
fn test_stringify_output_shape() {
    let doc = mapping(flow!({
        "title": "two words",
        "empty": "",
        "ratio": 3.0,
        "nested": { "flag": true }
    }));
    assert_eq!(
        stringify(&doc),
        "title = \"two words\"\nempty = \"\"\nratio = 3.0\nnested:\n  flag = true\n"
    );
}

#[test]
fn test_parse_with_embedded_model() {
    let doc = parse_with_model(PERSON_DOC, None).unwrap();
    let expected = mapping(flow!({
        "version": 2,
        "owner": { "name": "Ann Lee", "age": 41, "joined": "2024-01-15T10:30:00Z" },
        "guest": { "name": "Bob", "age": "abc" }
    }));
    assert_eq!(doc, expected);
}

#[test]
fn test_unknown_model_has_no_partial_output() {
    let text = PERSON_DOC.replace("use_model = Person", "use_model = Robot");
    let err = parse_with_model(&text, None).unwrap_err();
    assert!(matches!(err, Error::ModelNotFound(ref name) if name == "Robot"));
    assert_eq!(err.to_string(), "model 'Robot' not found in registry");
}

#[test]
fn test_model_without_registry() {
    let err = parse_with_model("use_model = Person\nx = 1\n", None).unwrap_err();
    assert!(matches!(err, Error::ModelNotFound(_)));
}

#[test]
fn test_parse_with_model_without_directive() {
    let doc = parse_with_model("$models:\n  P:\n    fields:\n      x:\n        alias = y\ny = 1\n", None)
        .unwrap();
    assert_eq!(doc, mapping(flow!({ "y": 1 })));
}

#[test]
fn test_parse_with_supplied_registry() {
    let embedded = parse(PERSON_DOC).unwrap();
    let registry = ModelRegistry::extract(&embedded).unwrap();
    let doc = parse_with_model("use_model = Person\np:\n  a = 7\n", Some(&registry)).unwrap();
    assert_eq!(doc, mapping(flow!({ "p": { "age": 7 } })));
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
enum Level {
    Debug,
    Info,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Logging {
    level: Level,
    targets: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Service {
    name: String,
    port: u16,
    weight: f32,
    owner: Option<String>,
    logging: Logging,
}

#[test]
fn test_typed_round_trip() {
    let service = Service {
        name: "edge proxy".to_string(),
        port: 8443,
        weight: 0.5,
        owner: None,
        logging: Logging {
            level: Level::Info,
            targets: vec!["stdout".to_string(), "file".to_string()],
        },
    };
    let text = to_string(&service).unwrap();
    assert_eq!(
        text,
        "name = \"edge proxy\"\nport = 8443\nweight = 0.5\nlogging:\n  level = Info\n  targets = [stdout, file]\n"
    );
    let back: Service = from_str(&text).unwrap();
    assert_eq!(back, service);
}

#[test]
fn test_typed_read_of_hand_written_text() {
    let logging: Logging = from_str("level = Debug\ntargets = []\n").unwrap();
    assert_eq!(logging.level, Level::Debug);
    assert!(logging.targets.is_empty());
}

#[test]
fn test_json_conversion() {
    let json = flow_to_json("a:\n  b = [1, x]\n").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, serde_json::json!({ "a": { "b": [1, "x"] } }));
    assert_eq!(json_to_flow(&json).unwrap(), "a:\n  b = [1, x]\n");
}

#[test]
fn test_text_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.flow");
    let doc = parse("app:\n  name = demo\n  ratio = 0.25\n").unwrap();

    save(&path, &doc).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "app:\n  name = demo\n  ratio = 0.25\n"
    );
    assert_eq!(load(&path).unwrap(), doc);
}

#[test]
fn test_binary_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.flowb");
    let doc = mapping(flow!({ "a": { "b": [1, 2.5, "x y", true] }, "c": (-4) }));

    save_binary(&path, &doc).unwrap();
    assert_eq!(load_binary(&path).unwrap(), doc);
}

#[test]
fn test_load_with_model() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.flow");
    fs::write(&path, PERSON_DOC).unwrap();

    let doc = load_with_model(&path, None).unwrap();
    assert_eq!(doc.get("owner").and_then(|o| o.pointer("age")), Some(&Value::Integer(41)));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = load(dir.path().join("absent.flow")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
