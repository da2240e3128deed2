//! Header-keyed rows, column ordering and row windows.
//!
//! Run with: cargo run --example objects

use csv_transcode::{row, Config, Converter, ParsePosition, SortOrder};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let text = "name,age,city\nJoe,10,Oslo\nNancy,20,Lima\nAnn,30,Rome\nBo,40,Kyiv\n";

    let converter = Converter::new(Config::new())?;
    for row in converter.parse_objects(text)? {
        println!("{:?}", row);
    }

    // Data rows 2 and 3 only; the position still counts every row.
    let windowed = Converter::new(Config::new().with_window(2, 3))?;
    let mut position = ParsePosition::new();
    let rows = windowed.parse_objects_at(text, &mut position)?;
    println!("\nwindow: {} rows, {} rows seen", rows.len(), position.row_num);

    let rows = vec![
        row! { "name" => "Joe", "age" => 10 },
        row! { "zip" => "0150", "name" => "Ann" },
    ];
    let config = Config::new()
        .with_sort_order(SortOrder::Alpha)
        .with_manual_order(["name"]);
    print!("\n{}", Converter::new(config)?.write_objects(&rows));

    Ok(())
}
