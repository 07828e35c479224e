use anima_core::Importer;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// anima-import — bring a journal export into Anima's entries
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the exported tabular file (CSV or similar)
    input: PathBuf,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("anima-import: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let importer = Importer::new()?;
    let report = importer.import(&cli.input)?;

    println!("Found columns: {}", report.columns.join(", "));
    println!("Processing complete!");
    println!("  Files created: {}", report.created);
    println!("  Files updated: {}", report.updated);
    println!("  Location: {}", importer.entries_dir.display());

    Ok(())
}
