//! Reading values as specific types.
//!
//! Run with: cargo run --example typed_lookup

use inidoc::{parse_str, Value, ValueKind};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = "\
[server]
port = 8080
ratio = 0.25
debug = on
motd = \"hello\\nworld\"
host = localhost
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let doc = parse_str(CONFIG)?;

    // Preferred interpretation: first of Boolean, Integer, Float, String, Raw
    for key in ["port", "ratio", "debug", "motd", "host"] {
        if let Some((entry, value)) = doc.get_entry(Some("server"), key) {
            println!("{:<6} raw={:<16} preferred={:?}", key, entry.raw(), value);
        }
    }

    // A requested kind either succeeds or yields nothing
    println!();
    for kind in [
        ValueKind::Integer,
        ValueKind::Float,
        ValueKind::Boolean,
        ValueKind::String,
        ValueKind::Raw,
    ] {
        let port = doc.lookup(Some("server"), "port", kind);
        println!("port as {:<8} -> {:?}", kind, port);
    }

    let port = doc
        .lookup(Some("server"), "port", ValueKind::Integer)
        .and_then(|v| v.as_u64())
        .unwrap_or(80);
    let debug = matches!(
        doc.lookup(Some("server"), "debug", ValueKind::Boolean),
        Some(Value::Boolean(true))
    );
    println!("\nlistening on port {} (debug: {})", port, debug);
    Ok(())
}
