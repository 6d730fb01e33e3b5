//! Strict indentation, nesting limits and diagnostics.
//!
//! Run with: cargo run --example custom_options

use flowdoc::{ParseOptions, Parser};
use std::error::Error;

const UNEVEN: &str = "\
server:
   host = localhost
  port = 8080
  this line has no value
limits:
      burst = 10
";

fn main() -> Result<(), Box<dyn Error>> {
    // Default parsing tolerates the irregular lines and reports them
    println!("Permissive:");
    let mut parser = Parser::from_str(UNEVEN);
    let doc = parser.parse()?;
    println!("{}", flowdoc::stringify(&doc));
    for diagnostic in parser.diagnostics().iter() {
        println!("  note: {}", diagnostic);
    }

    // Strict parsing rejects the first irregular indentation
    println!("\nStrict:");
    let strict = Parser::from_str(UNEVEN)
        .with_options(ParseOptions::strict())
        .parse();
    match strict {
        Ok(_) => println!("  accepted"),
        Err(err) => println!("  {}", err),
    }

    // Sections may nest at most `max_depth` levels, in every mode
    println!("\nShallow limit:");
    let shallow = ParseOptions::new().with_max_depth(1);
    match flowdoc::parse_with_options("a:\n  b:\n    c = 1\n", &shallow) {
        Ok(_) => println!("  accepted"),
        Err(err) => println!("  {}", err),
    }

    Ok(())
}
