//! CLI implementation for the `ibooks books` subcommand.
//!
//! Lists every asset in the book library with its author and state flags.
//! Hidden assets are skipped unless `--hidden` is given.

use std::io::Write;

use colored::Colorize;

use crate::books::book::Book;
use crate::cli::{open_library, wprintln};
use crate::IbkError;

/// Options for the `ibooks books` subcommand.
pub struct BooksOptions {
    /// Path to the BKLibrary store, or None to auto-discover.
    pub library: Option<String>,
    /// Path to the AEAnnotation store, or None to auto-discover.
    pub store: Option<String>,
    /// Include hidden assets.
    pub hidden: bool,
    /// Display additional metadata per book.
    pub verbose: bool,
    /// Output in JSON format.
    pub json: bool,
}

/// List library assets.
pub fn execute(opts: &BooksOptions, writer: &mut dyn Write) -> Result<(), IbkError> {
    let library = open_library(&opts.library, &opts.store)?;

    let mut books = library.books()?;
    if !opts.hidden {
        books.retain(|b| !b.is_hidden);
    }
    books.sort_by(|a, b| a.display_title().cmp(b.display_title()));

    if opts.json {
        let json = serde_json::to_string_pretty(&books)
            .map_err(|e| IbkError::Io(format!("JSON encoding failed: {e}")))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    wprintln!(writer, "{} ({} assets)", "Library".bold(), books.len())?;
    wprintln!(writer)?;

    for book in &books {
        print_book(writer, book, opts.verbose)?;
    }

    Ok(())
}

fn print_book(writer: &mut dyn Write, book: &Book, verbose: bool) -> Result<(), IbkError> {
    let mut flags = Vec::new();
    if book.is_finished {
        flags.push("finished");
    }
    if book.is_sample {
        flags.push("sample");
    }
    if book.is_hidden {
        flags.push("hidden");
    }
    if book.is_store_audiobook {
        flags.push("audiobook");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", ")).dimmed().to_string()
    };

    wprintln!(
        writer,
        "{} by {}{}",
        book.display_title().green().bold(),
        book.display_author(),
        flags
    )?;

    if verbose {
        wprintln!(writer, "  asset id:  {}", book.id)?;
        if let Some(genre) = &book.genre {
            wprintln!(writer, "  genre:     {}", genre)?;
        }
        if let Some(language) = &book.language {
            wprintln!(writer, "  language:  {}", language)?;
        }
        if let Some(pages) = book.page_count {
            wprintln!(writer, "  pages:     {}", pages)?;
        }
        if let Some(year) = &book.year {
            wprintln!(writer, "  year:      {}", year)?;
        }
        if let Some(date) = book.modification_date {
            wprintln!(writer, "  modified:  {}", date.format("%Y-%m-%d %H:%M:%S"))?;
        }
        if let Some(path) = &book.path {
            wprintln!(writer, "  path:      {}", path)?;
        }
        wprintln!(writer)?;
    }

    Ok(())
}
