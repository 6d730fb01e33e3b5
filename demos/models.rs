//! Resolving aliases and types with models.
//!
//! Run with: cargo run --example models

use flowdoc::{
    parse_with_model, stringify, FieldDefinition, FieldType, ModelDefinition, ModelRegistry,
    Parser,
};
use std::error::Error;

const EMBEDDED: &str = "\
$models:
  Person:
    fields:
      name:
        alias = n
      age:
        alias = a
        type = int
      birthday:
        alias = b
        type = date
use_model = Person
owner:
  n = \"Ann Lee\"
  a = \"41\"
  b = 1983-05-12
guest:
  n = Bob
  a = unknown
";

fn main() -> Result<(), Box<dyn Error>> {
    // Models declared inside the document
    println!("Embedded models:");
    let mut parser = Parser::from_str(EMBEDDED);
    let doc = parser.parse_with_model(None)?;
    println!("{}", stringify(&doc));
    for diagnostic in parser.diagnostics().iter() {
        println!("  note: {}", diagnostic);
    }

    // Models supplied by the caller
    println!("\nSupplied registry:");
    let mut registry = ModelRegistry::new();
    registry.register(
        ModelDefinition::new("Host")
            .with_field(FieldDefinition::new("address").with_alias("addr"))
            .with_field(FieldDefinition::new("port").with_type(FieldType::Int).with_id(1)),
    );
    let doc = parse_with_model(
        "use_model = Host\nprimary:\n  addr = 10.0.0.1\n  port = \"22\"\n",
        Some(&registry),
    )?;
    println!("{}", stringify(&doc));

    // Unknown models are an error
    match parse_with_model("use_model = Robot\n", Some(&registry)) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("error: {}", err),
    }

    Ok(())
}
