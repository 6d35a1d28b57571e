//! Apple Books library and annotation extraction toolkit.
//!
//! The `ibooks-utils` crate (library name `ibk`) provides Rust types and
//! functions for reading the two SQLite stores that Apple Books keeps on
//! disk — the book library (`BKLibrary/*.sqlite`) and the annotation store
//! (`AEAnnotation/*.sqlite`) — and for parsing and ordering the EPUB CFI
//! location strings that anchor each highlight and note to a position in
//! its book.
//!
//! # CLI Reference
//!
//! Install the `ibooks` binary and use its subcommands to work with the
//! Apple Books stores from the command line.
//!
//! ```text
//! cargo install ibooks-utils
//! ```
//!
//! ## Subcommands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`ibooks books`](cli::app::Commands::Books) | List library assets with title, author, and state flags |
//! | [`ibooks annotations`](cli::app::Commands::Annotations) | List annotations, sorted into reading order by CFI |
//! | [`ibooks export`](cli::app::Commands::Export) | Dump books with their nested annotations as JSON |
//! | [`ibooks info`](cli::app::Commands::Info) | Show resolved store paths and row counts |
//!
//! All subcommands accept `--color <auto|always|never>` and `--output <file>`.
//! Most also accept `--json` for machine-readable output and `--library` /
//! `--store` to override the auto-discovered database paths.
//!
//! # Library API
//!
//! Add `ibk` as a dependency to use the extraction library directly:
//!
//! ```toml
//! [dependencies]
//! ibk = { package = "ibooks-utils", version = "0.3" }
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use ibk::books::annotation::sort_by_location;
//! use ibk::books::library::Library;
//!
//! // Open the stores (paths are auto-discovered under ~/Library)
//! let library = Library::discover().unwrap();
//!
//! for book in library.books().unwrap() {
//!     let mut annotations = library.annotations_for(&book.id).unwrap();
//!     // Reading order: CFI locations form a total order
//!     sort_by_location(&mut annotations);
//!     for ann in &annotations {
//!         println!("{}: {:?}", book.display_title(), ann.selected_text);
//!     }
//! }
//! ```
//!
//! ## Key entry points
//!
//! | Type / Function | Purpose |
//! |-----------------|---------|
//! | [`Library`](books::library::Library) | Open the stores, iterate books and annotations |
//! | [`Book`](books::book::Book) | One `ZBKLIBRARYASSET` row |
//! | [`Annotation`](books::annotation::Annotation) | One `ZAEANNOTATION` row |
//! | [`EpubCfi`](books::cfi::EpubCfi) | Parsed CFI location; `Ord` gives document order |
//! | [`core_data_timestamp`](books::timestamp::core_data_timestamp) | Core Data float → `DateTime<Utc>` |
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`books::cfi`] | EPUB CFI step-path parsing and total ordering |
//! | [`books::library`] | Store discovery, connections, fixed queries |
//! | [`books::book`] | Book record and row mapping |
//! | [`books::annotation`] | Annotation record, row mapping, location sort |
//! | [`books::style`] | Highlight style codes mapped to color names |
//! | [`books::timestamp`] | Core Data timestamp conversion |
//! | [`books::constants`] | Container paths, table names, epoch offset |

pub mod books;
#[cfg(feature = "cli")]
pub mod cli;
pub mod util;

use thiserror::Error;

/// Errors returned by `ibk` operations.
#[derive(Error, Debug)]
pub enum IbkError {
    /// An I/O error occurred (store discovery, file open, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// A SQLite error occurred (open, query, or row mapping failure).
    #[error("Database error: {0}")]
    Database(String),

    /// An annotation location is not wrapped in the `epubcfi( … )` envelope.
    #[error("CFI format error: {0}")]
    Cfi(String),

    /// An invalid argument was supplied (unknown format name, bad option, etc.).
    #[error("Invalid argument: {0}")]
    Argument(String),
}
