//! Building FlowDoc values with the flow! macro.
//!
//! Run with: cargo run --example macro

use flowdoc::{flow, stringify, Value};

fn main() {
    let port = 8443;

    let doc = flow!({
        "service": {
            "name": "gateway",
            "port": port,
            "ratio": 0.75,
            "hosts": ["edge-1", "edge-2"]
        },
        "enabled": true
    });

    println!("Value: {:?}\n", doc);

    if let Value::Mapping(map) = &doc {
        println!("FlowDoc:\n{}", stringify(map));
    }

    assert_eq!(doc.pointer("service.port"), Some(&Value::Integer(8443)));
}
