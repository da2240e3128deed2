//! Decoding and encoding positional records.
//!
//! Run with: cargo run --example simple

use csv_transcode::{parse_document, parse_field, parse_line, write_arrays, Config, ParsePosition};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::new().with_headers(false);

    let text = "id,comment\n1,\"multi\nline, with comma\"\n2,\"quote \"\"inside\"\"\"\n";
    let records = parse_document(text, &config)?;
    for (i, record) in records.iter().enumerate() {
        println!("record {}: {:?}", i + 1, record);
    }

    println!("\nRe-encoded:\n{}", write_arrays(&records, &config)?);

    let mut position = ParsePosition::new();
    let line = parse_line("x,\"y,z\"", &config, &mut position)?;
    println!("line: {:?} (next column {})", line, position.col_num);

    println!("field: {}", parse_field("\"He said \"\"hi\"\"\"", &config)?);

    match parse_document("a,b\nc,\"d\"e\n", &config) {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("error: {}", e),
    }

    Ok(())
}
