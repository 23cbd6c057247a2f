//! Exporting a parsed document as JSON with every value in its preferred type.
//!
//! Run with: cargo run --example to_json -- [path]
//! Pass `-` to read from standard input.

use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/sample.ini".to_string());
    let doc = if path == "-" {
        inidoc::from_reader(std::io::stdin().lock())?
    } else {
        inidoc::parse_file(&path)?
    };

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
