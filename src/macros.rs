/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys must be string literals. Negative numbers inside lists need
/// parentheses, e.g. `flow!([(-1), 2])`.
///
/// ```rust
/// use flowdoc::{flow, Value};
///
/// let doc = flow!({
///     "server": { "host": "localhost", "port": 8080 },
///     "tags": ["a", "b"],
///     "debug": false
/// });
/// assert_eq!(doc.pointer("server.port"), Some(&Value::Integer(8080)));
/// ```
#[macro_export]
macro_rules! flow {
    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::flow!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::flow!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Any other expression with a `From` conversion into `Value`.
    ($s:expr) => {
        $crate::Value::from($s)
    };
}
