//! Reading and writing `#[derive]`d structs.
//!
//! Run with: cargo run --example typed_rows

use csv_transcode::{from_str, to_string, to_string_with_config, Config};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
struct Employee {
    name: String,
    age: u8,
    email: Option<String>,
    remote: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let text = "name,age,email,remote\n\"Doe, Jane\",34,jane@example.com,true\nJoe,29,,false\n";
    let employees: Vec<Employee> = from_str(text)?;
    for employee in &employees {
        println!("{:?}", employee);
    }

    print!("\n{}", to_string(&employees)?);

    let tsv = Config::new().with_separator('\t');
    print!("\n{}", to_string_with_config(&employees, &tsv)?);

    Ok(())
}
