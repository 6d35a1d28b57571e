//! CLI implementation for the `ibooks annotations` subcommand.
//!
//! Lists highlights and notes, grouped by book and sorted into reading
//! order via the CFI comparator. Deleted annotations are skipped unless
//! `--deleted` is given; `--unsorted` keeps raw store order instead.

use std::collections::HashMap;
use std::io::Write;

use colored::Colorize;

use crate::books::annotation::Annotation;
use crate::cli::{open_library, wprintln};
use crate::IbkError;

/// Options for the `ibooks annotations` subcommand.
pub struct AnnotationsOptions {
    /// Path to the BKLibrary store, or None to auto-discover.
    pub library: Option<String>,
    /// Path to the AEAnnotation store, or None to auto-discover.
    pub store: Option<String>,
    /// Only annotations of this store asset id.
    pub book: Option<String>,
    /// Include annotations marked deleted.
    pub deleted: bool,
    /// Keep store order instead of sorting by location.
    pub unsorted: bool,
    /// Display location and dates per annotation.
    pub verbose: bool,
    /// Output in JSON format.
    pub json: bool,
}

/// List annotations in reading order.
pub fn execute(opts: &AnnotationsOptions, writer: &mut dyn Write) -> Result<(), IbkError> {
    let library = open_library(&opts.library, &opts.store)?;

    let mut annotations = match &opts.book {
        Some(asset_id) => library.annotations_for(asset_id)?,
        None => library.annotations()?,
    };
    if !opts.deleted {
        annotations.retain(|a| !a.deleted);
    }
    if !opts.unsorted {
        // Group by owning book, reading order inside each group. The sort
        // is stable, so unlocated rows keep their store order up front.
        annotations.sort_by(|a, b| a.asset_id.cmp(&b.asset_id).then(a.location.cmp(&b.location)));
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&annotations)
            .map_err(|e| IbkError::Io(format!("JSON encoding failed: {e}")))?;
        wprintln!(writer, "{}", json)?;
        return Ok(());
    }

    let titles: HashMap<String, String> = library
        .books()?
        .into_iter()
        .map(|b| {
            let title = b.display_title().to_string();
            (b.id, title)
        })
        .collect();

    let mut current_book: Option<&str> = None;
    for ann in &annotations {
        let asset = ann.asset_id.as_deref().unwrap_or("(no asset)");
        if current_book != Some(asset) {
            current_book = Some(asset);
            let title = titles.get(asset).map(String::as_str).unwrap_or(asset);
            wprintln!(writer)?;
            wprintln!(writer, "{}", title.bold().underline())?;
        }
        print_annotation(writer, ann, opts.verbose)?;
    }

    Ok(())
}

fn print_annotation(
    writer: &mut dyn Write,
    ann: &Annotation,
    verbose: bool,
) -> Result<(), IbkError> {
    let marker = format!("[{}]", ann.style);
    let text = ann
        .selected_text
        .as_deref()
        .or(ann.representative_text.as_deref())
        .unwrap_or("(no text)");

    wprintln!(writer, "  {} {}", marker.yellow(), text.trim())?;

    if ann.has_note() {
        if let Some(note) = &ann.note {
            wprintln!(writer, "    {} {}", "note:".cyan(), note.trim())?;
        }
    }

    if verbose {
        if let Some(location) = &ann.location {
            wprintln!(writer, "    {} {}", "at:".dimmed(), location)?;
        }
        if let Some(date) = ann.creation_date {
            wprintln!(
                writer,
                "    {} {}",
                "created:".dimmed(),
                date.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
    }

    Ok(())
}
