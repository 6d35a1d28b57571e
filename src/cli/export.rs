//! CLI implementation for the `ibooks export` subcommand.
//!
//! Dumps the whole library — every book with its annotations nested, in
//! reading order — as JSON or flat CSV.

use std::io::Write;

use serde::Serialize;

use crate::books::annotation::{sort_by_location, Annotation};
use crate::books::book::Book;
use crate::cli::{open_library, wprint, wprintln};
use crate::IbkError;

/// Output format for exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn from_str(s: &str) -> Result<Self, IbkError> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(IbkError::Argument(format!(
                "Unknown format '{}'. Use json or csv.",
                s
            ))),
        }
    }
}

/// Options for the `ibooks export` subcommand.
pub struct ExportOptions {
    /// Path to the BKLibrary store, or None to auto-discover.
    pub library: Option<String>,
    /// Path to the AEAnnotation store, or None to auto-discover.
    pub store: Option<String>,
    /// Output format: json or csv.
    pub format: String,
    /// Include annotations marked deleted.
    pub deleted: bool,
}

#[derive(Serialize)]
struct ExportEntry<'a> {
    #[serde(flatten)]
    book: &'a Book,
    annotations: Vec<&'a Annotation>,
}

/// Export books with their nested annotations.
pub fn execute(opts: &ExportOptions, writer: &mut dyn Write) -> Result<(), IbkError> {
    let format = ExportFormat::from_str(&opts.format)?;
    let library = open_library(&opts.library, &opts.store)?;

    let mut books = library.books()?;
    books.sort_by(|a, b| a.display_title().cmp(b.display_title()));

    let mut per_book: Vec<Vec<Annotation>> = Vec::with_capacity(books.len());
    for book in &books {
        let mut annotations = library.annotations_for(&book.id)?;
        if !opts.deleted {
            annotations.retain(|a| !a.deleted);
        }
        sort_by_location(&mut annotations);
        per_book.push(annotations);
    }

    match format {
        ExportFormat::Json => export_json(writer, &books, &per_book),
        ExportFormat::Csv => export_csv(writer, &books, &per_book),
    }
}

fn export_json(
    writer: &mut dyn Write,
    books: &[Book],
    per_book: &[Vec<Annotation>],
) -> Result<(), IbkError> {
    let entries: Vec<ExportEntry<'_>> = books
        .iter()
        .zip(per_book)
        .map(|(book, annotations)| ExportEntry {
            book,
            annotations: annotations.iter().collect(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| IbkError::Io(format!("JSON encoding failed: {e}")))?;
    wprintln!(writer, "{}", json)
}

fn export_csv(
    writer: &mut dyn Write,
    books: &[Book],
    per_book: &[Vec<Annotation>],
) -> Result<(), IbkError> {
    wprintln!(
        writer,
        "asset_id,title,author,style,location,selected_text,note,created"
    )?;

    for (book, annotations) in books.iter().zip(per_book) {
        for ann in annotations {
            let style = ann.style.name();
            let created = ann
                .creation_date
                .map(|d| d.to_rfc3339())
                .unwrap_or_default();
            let fields = [
                book.id.as_str(),
                book.display_title(),
                book.display_author(),
                style.as_str(),
                ann.location.as_ref().map(|l| l.as_str()).unwrap_or(""),
                ann.selected_text.as_deref().unwrap_or(""),
                ann.note.as_deref().unwrap_or(""),
                created.as_str(),
            ];
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    wprint!(writer, ",")?;
                }
                wprint!(writer, "{}", csv_escape(field))?;
            }
            wprintln!(writer)?;
        }
    }

    Ok(())
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("CSV").unwrap(), ExportFormat::Csv);
        assert!(ExportFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
