//! Rewriting and filtering data while it is decoded.
//!
//! Run with: RUST_LOG=csv_transcode=trace cargo run --example hooks

use csv_transcode::hooks::{cast_to_scalar, HookOutcome};
use csv_transcode::{Config, Converter, Field, Row};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let text = "# exported 2024-01-01\nsku,price,qty\nA-1, 9.99 ,3\n,,\nB-2,14.50,\n";

    let config = Config::new()
        // Drop the comment line before tokenizing.
        .with_on_pre_parse(|text, _| {
            text.lines()
                .filter(|line| !line.starts_with('#'))
                .map(|line| format!("{}\n", line))
                .collect()
        })
        .with_on_parse_value(cast_to_scalar)
        .with_on_parse_entry(|record, position| {
            if record.iter().all(Field::is_empty) {
                tracing::info!(row = position.row_num, "skipping blank row");
                HookOutcome::Skip
            } else {
                HookOutcome::Keep(record)
            }
        })
        .with_transform(|row| {
            row.into_iter()
                .map(|(name, value)| (name.to_uppercase(), value))
                .collect::<Row>()
        });

    let converter = Converter::new(config)?;
    let rows = converter.parse_objects(text)?;
    for row in &rows {
        println!("{:?}", row);
    }

    let total: f64 = rows
        .iter()
        .filter_map(|row| row.get("PRICE").and_then(Field::as_f64))
        .sum();
    println!("total price: {}", total);

    Ok(())
}
