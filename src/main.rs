use mathtab::{LayoutConfig, MathtabError, layout_document};
use std::env;
use std::fs;
use std::time::Instant;

/// Lays out a JSON table document and prints the resolved geometry as JSON.
fn main() -> Result<(), MathtabError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Lays out a MathML table described as JSON.");
        eprintln!();
        eprintln!("Usage: {} <path/to/table.json>", args[0]);
        eprintln!();
        eprintln!("Set RUST_LOG=debug to trace the layout stages.");
        std::process::exit(1);
    }

    let json = fs::read_to_string(&args[1])?;
    let start = Instant::now();
    let report = layout_document(&json, LayoutConfig::default())?;
    log::info!("laid out {} in {:?}", args[1], start.elapsed());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
