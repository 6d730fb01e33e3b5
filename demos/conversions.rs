//! Converting FlowDoc to JSON and MessagePack.
//!
//! Run with: cargo run --example conversions

use flowdoc::{flow_to_json, from_binary, json_to_flow, parse, to_binary};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "\
build:
  target = release
  jobs = 8
  features = [tls, metrics]
";

    let json = flow_to_json(text)?;
    println!("JSON:\n{}\n", json);

    let back = json_to_flow(&json)?;
    println!("FlowDoc from JSON:\n{}", back);
    assert_eq!(back, text);

    let doc = parse(text)?;
    let bytes = to_binary(&doc)?;
    println!("MessagePack: {} bytes (text: {} bytes)", bytes.len(), text.len());
    assert_eq!(from_binary(&bytes)?, doc);
    println!("✓ Binary round-trip successful");

    Ok(())
}
