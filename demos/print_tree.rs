//! Walking every section and key of an INI file.
//!
//! Run with: cargo run --example print_tree -- [path]
//! Set RUST_LOG=inidoc=debug to see parser events.

use inidoc::{parse_file, Tree};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/sample.ini".to_string());

    let tree = Tree::new(parse_file(&path)?);

    for section in tree.sections() {
        match section.name() {
            Some(name) => println!("[{}]", name),
            None => println!("(global)"),
        }
        for key in section.keys() {
            let value = key.value();
            println!("  {} = {:<24} ({})", key.name(), key.entry().raw(), value.kind());
        }
    }

    let document = tree.into_document();
    println!(
        "\n{} sections, {} keys",
        document.section_count(),
        document.len()
    );
    Ok(())
}
