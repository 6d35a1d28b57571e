//! CLI subcommand implementations for the `ibooks` binary.
//!
//! CLI argument parsing uses clap derive macros, with the top-level
//! [`app::Cli`] struct and [`app::Commands`] enum defined in [`app`] and
//! shared between `main.rs` and `build.rs` (for man page generation) via
//! `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a `pub fn execute(opts, writer) ->
//! Result<(), IbkError>` entry point. The `writer: &mut dyn Write`
//! parameter allows output to be captured in tests or redirected to a file
//! via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `ibooks books` | [`books`] | List library assets with title, author, and state flags |
//! | `ibooks annotations` | [`annotations`] | List annotations, sorted into reading order by CFI |
//! | `ibooks export` | [`export`] | Dump books with nested annotations as JSON or CSV |
//! | `ibooks info` | [`info`] | Show resolved store paths and row counts |
//!
//! # Common patterns
//!
//! - **`--json`** — structured output via `#[derive(Serialize)]` structs and
//!   `serde_json`.
//! - **`--library` / `--store`** — explicit store paths; without them the
//!   stores are auto-discovered under the Apple Books container.
//! - **`--color`** (global) — colored terminal output (`auto`, `always`,
//!   `never`).
//! - **`--output` / `-o`** (global) — redirect output to a file.
//!
//! The `wprintln!` and `wprint!` macros wrap `writeln!`/`write!` to convert
//! `io::Error` into `IbkError`.

pub mod annotations;
pub mod app;
pub mod books;
pub mod export;
pub mod info;

/// Write a line to the given writer, converting io::Error to IbkError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::IbkError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::IbkError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to IbkError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::IbkError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

use crate::books::library::Library;
use crate::IbkError;

/// Open the stores, preferring explicit paths over discovery.
///
/// Both paths must be given together or not at all; mixing an explicit
/// library with a discovered annotation store would silently pair
/// mismatched databases.
pub(crate) fn open_library(
    library: &Option<String>,
    store: &Option<String>,
) -> Result<Library, IbkError> {
    match (library, store) {
        (Some(books), Some(annotations)) => Library::open(books, annotations),
        (None, None) => Library::discover(),
        _ => Err(IbkError::Argument(
            "--library and --store must be given together".to_string(),
        )),
    }
}
