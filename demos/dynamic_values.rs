//! Working with FlowDoc trees without a Rust type.
//!
//! Run with: cargo run --example dynamic_values

use flowdoc::{parse, stringify, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "\
app:
  name = \"Demo App\"
  version = 1.5
  features = [search, export]
  window:
    width = 1280
    height = 720
";

    let mut doc = parse(text)?;

    // Access fields by dotted path
    if let Some(app) = doc.get("app") {
        println!("name:    {:?}", app.pointer("name").and_then(Value::as_str));
        println!("version: {:?}", app.pointer("version").and_then(Value::as_f64));
        println!("width:   {:?}", app.pointer("window.width").and_then(Value::as_i64));
    }

    // Walk a list
    if let Some(features) = doc.get("app").and_then(|a| a.pointer("features")).and_then(Value::as_list) {
        for feature in features {
            println!("feature: {}", feature);
        }
    }

    // Modify the tree and write it back
    if let Some(app) = doc.get_mut("app").and_then(Value::as_mapping_mut) {
        app.insert("debug".to_string(), Value::Bool(true));
        app.remove("version");
    }
    println!("\nUpdated:\n{}", stringify(&doc));

    Ok(())
}
