use flowdoc::{flow, stringify, Map, Value};

#[test]
fn test_flow_macro_booleans() {
    assert_eq!(flow!(true), Value::Bool(true));
    assert_eq!(flow!(false), Value::Bool(false));
}

#[test]
fn test_flow_macro_numbers() {
    assert_eq!(flow!(42), Value::Integer(42));
    assert_eq!(flow!(-123), Value::Integer(-123));
    assert_eq!(flow!(3.5), Value::Float(3.5));
    assert_eq!(flow!(i64::MAX), Value::Integer(i64::MAX));
}

#[test]
fn test_flow_macro_strings() {
    assert_eq!(flow!("hello world"), Value::String("hello world".to_string()));
    let owned = String::from("owned");
    assert_eq!(flow!(owned), Value::String("owned".to_string()));
}

#[test]
fn test_flow_macro_lists() {
    assert_eq!(flow!([]), Value::List(vec![]));
    assert_eq!(
        flow!([1, "two", 3.0, true]),
        Value::List(vec![
            Value::Integer(1),
            Value::from("two"),
            Value::Float(3.0),
            Value::Bool(true),
        ])
    );
}

#[test]
fn test_flow_macro_mappings() {
    assert_eq!(flow!({}), Value::Mapping(Map::new()));

    let value = flow!({
        "service": {
            "name": "api",
            "ports": [80, 443],
        },
        "enabled": true
    });
    let Value::Mapping(map) = value else {
        panic!("expected mapping");
    };
    assert_eq!(
        stringify(&map),
        "service:\n  name = api\n  ports = [80, 443]\nenabled = true\n"
    );
}
