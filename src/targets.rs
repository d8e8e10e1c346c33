// src/targets.rs
// =============================================================================
// This module loads the list of URL targets from the input file.
//
// The input format is a JSON array of objects:
//   [{"url": "https://example.com", "caption": "Example"}, ...]
//
// Rules:
// - "url" is required; a record without it is a hard error
// - "caption" is optional and defaults to the URL itself
// - An empty array is perfectly valid input (the report just says 0/0)
//
// Loading happens before any network activity, so a bad input file fails
// fast without firing a single request.
//
// Rust concepts:
// - serde Deserialize: Automatically parse JSON into typed structs
// - Option<T>: For the optional caption field
// - anyhow Context: Attach human-readable context to low-level errors
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// One URL-and-caption pair to be checked
//
// Identity is the target's position in the input list; captions are
// display labels and are not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub caption: String,
}

// The raw shape of one input record, exactly as it appears in the file
//
// We deserialize into this first, then fill in the caption default.
// Keeping the raw shape separate means Target itself never carries
// an Option the rest of the program would have to unwrap everywhere.
#[derive(Debug, Deserialize)]
struct RawTarget {
    url: String,
    caption: Option<String>,
}

// Loads targets from a JSON file
//
// Parameters:
//   path: the input file path from the CLI
//
// Returns: ordered Vec of Target, or an error if the file is missing,
// unreadable, or not a valid array of records
pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file '{}'", path.display()))?;

    parse_targets(&contents)
        .with_context(|| format!("Invalid input file '{}'", path.display()))
}

// Parses the JSON text into targets
//
// Split out from load_targets so tests can exercise the parsing rules
// without touching the filesystem.
fn parse_targets(contents: &str) -> Result<Vec<Target>> {
    let raw: Vec<RawTarget> = serde_json::from_str(contents)
        .context("Expected a JSON array of {\"url\", \"caption\"} objects")?;

    // Fill in the caption default: a record without a caption is
    // labelled with its own URL
    let targets = raw
        .into_iter()
        .map(|record| {
            let caption = record.caption.unwrap_or_else(|| record.url.clone());
            Target {
                url: record.url,
                caption,
            }
        })
        .collect();

    Ok(targets)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two structs (RawTarget and Target)?
//    - RawTarget mirrors the file format, quirks and all
//    - Target is what the rest of the program wants: no Options
//    - Converting at the boundary keeps downstream code simple
//
// 2. What does unwrap_or_else do?
//    - If the Option is Some(caption), use it
//    - If it's None, run the closure to compute a fallback
//    - _else takes a closure so the fallback is only built when needed
//
// 3. What is with_context?
//    - Wraps a low-level error ("No such file or directory") with a
//      message that tells the user WHICH file and WHAT we were doing
//    - The original error is still attached underneath
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_records() {
        let input = r#"[
            {"url": "https://www.google.com", "caption": "Google"},
            {"url": "https://www.github.com", "caption": "Github"}
        ]"#;
        let targets = parse_targets(input).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].url, "https://www.google.com");
        assert_eq!(targets[0].caption, "Google");
        assert_eq!(targets[1].caption, "Github");
    }

    #[test]
    fn test_caption_defaults_to_url() {
        let input = r#"[{"url": "https://example.com"}]"#;
        let targets = parse_targets(input).unwrap();
        assert_eq!(targets[0].caption, "https://example.com");
    }

    #[test]
    fn test_order_is_preserved() {
        let input = r#"[
            {"url": "https://c.example"},
            {"url": "https://a.example"},
            {"url": "https://b.example"}
        ]"#;
        let targets = parse_targets(input).unwrap();
        let urls: Vec<&str> = targets.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://c.example", "https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_empty_array_is_valid() {
        let targets = parse_targets("[]").unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_missing_url_field_is_an_error() {
        let input = r#"[{"caption": "No URL here"}]"#;
        assert!(parse_targets(input).is_err());
    }

    #[test]
    fn test_non_array_json_is_an_error() {
        let input = r#"{"url": "https://example.com"}"#;
        assert!(parse_targets(input).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_targets("[{").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_targets(Path::new("/definitely/not/a/real/file.json"));
        assert!(result.is_err());
    }
}
