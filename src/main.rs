// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the target list from the input file (fatal if it's bad)
// 3. Probe every target concurrently, collecting results in input order
// 4. Print the text report to stdout
// 5. Write the JSON report to disk (fatal if it can't be written, but
//    only AFTER the text report has been printed)
// 6. Exit with proper code (0 = pipeline completed, 2 = error)
//
// Note that individual URLs failing to respond is a normal outcome, not
// an error: the run still exits 0 and the failures show up in the report.
//
// Rust concepts used:
// - async/await: Because we make several network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - The ? operator: Bubbles errors up to main for a clean exit
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod probe; // src/probe.rs - HTTP probing logic
mod report; // src/report.rs - aggregation, rendering, and the JSON file
mod targets; // src/targets.rs - input file loading

use cli::Cli;
use clap::Parser; // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Fatal error (bad input file or unwritable report):
            // print it to stderr and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = pipeline completed (individual URL failures included)
//   Err = input could not be loaded or report could not be written
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Load the target list; this fails fast before any network activity
    let targets = targets::load_targets(&cli.input)?;

    println!(
        "🔍 Checking {} URL(s) with up to {} concurrent probes...",
        targets.len(),
        probe::MAX_CONCURRENT_PROBES
    );

    // Probe everything; per-target failures are recorded, never raised
    let results = probe::probe_targets(targets).await;

    // Aggregate and render from the same result set
    let summary = report::summarize(&results);
    print!("{}", report::render_text(&results, &summary));

    // Persist the JSON report, defaulting to a stable filename next to
    // the input so each run overwrites the previous one
    let output_path = cli
        .output
        .unwrap_or_else(|| report::default_output_path(&cli.input));

    let poll_report = report::build_report(results, &summary);
    report::write_report(&poll_report, &output_path)?;

    println!("📝 Results saved to: {}", output_path.display());

    Ok(0)
}
