//! Basic FlowDoc serialization and deserialization.
//!
//! Run with: cargo run --example simple

use flowdoc::{from_str, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    debug: bool,
    database: Database,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "Inventory Service".to_string(),
        debug: false,
        database: Database {
            host: "db.internal".to_string(),
            port: 5432,
            replicas: vec!["db-a".to_string(), "db-b".to_string()],
        },
    };

    // Serialize to FlowDoc
    let text = to_string(&config)?;
    println!("FlowDoc output:\n{}", text);

    // Deserialize back to struct
    let config_back: Config = from_str(&text)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
