// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// url-warden has a deliberately tiny surface: one required positional
// argument (the input file) and one optional flag (--output).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - PathBuf: An owned filesystem path (like String, but for paths)
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "url-warden",
    version = "0.1.0",
    about = "A CLI tool to poll a list of URLs and report which ones are responding",
    long_about = "url-warden reads a JSON list of URLs, probes each one with an HTTP GET, \
                  and reports status codes and response times. The text report goes to \
                  stdout and a JSON report is written to disk for machine consumption."
)]
pub struct Cli {
    /// Path to the JSON input file: an array of {"url": ..., "caption": ...} objects
    ///
    /// This is a positional argument (required, no flag needed)
    pub input: PathBuf,

    /// Where to write the JSON report
    ///
    /// This is an optional flag: --output <PATH>
    /// Defaults to url_poll_results.json next to the input file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why PathBuf instead of String?
//    - PathBuf is the owned path type (String is for text)
//    - It handles platform differences (/ vs \) for us
//    - Methods like .parent() and .join() come for free
//
// 2. What is Option<PathBuf>?
//    - Option represents a value that might not exist
//    - Some(path) = the user passed --output
//    - None = they didn't, so we compute a default ourselves
//
// 3. Why no subcommands?
//    - This tool does exactly one thing: poll a list of URLs
//    - A single argument struct keeps the interface obvious
// -----------------------------------------------------------------------------
