/// Apple Books store locations and schema constants.
///
/// Container paths and table names are those used by the sandboxed desktop
/// application (`com.apple.iBooksX`) on macOS. Column names follow the
/// Core Data convention of a `Z` prefix on every entity attribute.
// Store container directories, relative to the user's home directory.
// Each holds one or more .sqlite files; the first (sorted) one is the
// live store, the rest are WAL/backup siblings.
pub const BOOKS_CONTAINER: &str =
    "Library/Containers/com.apple.iBooksX/Data/Documents/BKLibrary";
pub const ANNOTATIONS_CONTAINER: &str =
    "Library/Containers/com.apple.iBooksX/Data/Documents/AEAnnotation";

/// File extension of both stores.
pub const STORE_EXTENSION: &str = "sqlite";

// Core Data entity tables.
pub const BOOKS_TABLE: &str = "ZBKLIBRARYASSET";
pub const ANNOTATIONS_TABLE: &str = "ZAEANNOTATION";

/// Seconds between the Unix epoch (1970-01-01T00:00:00Z) and the Core Data
/// reference date (2001-01-01T00:00:00Z). Every TIMESTAMP column in both
/// stores is a float of seconds past the reference date.
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

/// Mandatory envelope around every CFI location string.
pub const CFI_PREFIX: &str = "epubcfi(";
pub const CFI_SUFFIX: char = ')';
