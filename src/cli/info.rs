//! CLI implementation for the `ibooks info` subcommand.
//!
//! Shows which store files were resolved and how many rows each holds.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{open_library, wprintln};
use crate::IbkError;

/// Options for the `ibooks info` subcommand.
pub struct InfoOptions {
    /// Path to the BKLibrary store, or None to auto-discover.
    pub library: Option<String>,
    /// Path to the AEAnnotation store, or None to auto-discover.
    pub store: Option<String>,
    /// Output in JSON format.
    pub json: bool,
}

#[derive(Serialize)]
struct InfoReport {
    books_path: String,
    annotations_path: String,
    book_count: u64,
    annotation_count: u64,
}

/// Show store paths and row counts.
pub fn execute(opts: &InfoOptions, writer: &mut dyn Write) -> Result<(), IbkError> {
    let library = open_library(&opts.library, &opts.store)?;
    let (book_count, annotation_count) = library.counts()?;

    let report = InfoReport {
        books_path: library.books_path().display().to_string(),
        annotations_path: library.annotations_path().display().to_string(),
        book_count,
        annotation_count,
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| IbkError::Io(format!("JSON encoding failed: {e}")))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "{}", "Apple Books stores".bold())?;
    wprintln!(writer, "  library:     {}", report.books_path)?;
    wprintln!(writer, "  annotations: {}", report.annotations_path)?;
    wprintln!(writer)?;
    wprintln!(writer, "  {} books, {} annotations", book_count, annotation_count)?;

    Ok(())
}
