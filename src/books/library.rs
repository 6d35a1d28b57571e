//! Store discovery, connections, and fixed queries.
//!
//! A [`Library`] holds read-only connections to the two SQLite stores. The
//! queries are fixed; row mapping lives with the record types in
//! [`book`](crate::books::book) and [`annotation`](crate::books::annotation).

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::books::annotation::{Annotation, ANNOTATION_COLUMNS};
use crate::books::book::{Book, BOOK_COLUMNS};
use crate::books::constants::{
    ANNOTATIONS_CONTAINER, ANNOTATIONS_TABLE, BOOKS_CONTAINER, BOOKS_TABLE, STORE_EXTENSION,
};
use crate::util::fs::find_store_files;
use crate::IbkError;

/// Open handles to the book library and annotation stores.
pub struct Library {
    books_path: PathBuf,
    annotations_path: PathBuf,
    books_db: Connection,
    annotations_db: Connection,
}

impl Library {
    /// Open both stores from explicit paths.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        books_path: P,
        annotations_path: Q,
    ) -> Result<Self, IbkError> {
        let books_path = books_path.as_ref().to_path_buf();
        let annotations_path = annotations_path.as_ref().to_path_buf();

        Ok(Library {
            books_db: open_store(&books_path)?,
            annotations_db: open_store(&annotations_path)?,
            books_path,
            annotations_path,
        })
    }

    /// Locate and open the stores under the user's Apple Books container.
    ///
    /// Each container directory may hold several `.sqlite` files; the first
    /// in sorted order is the live store, matching the application's own
    /// naming (`BKLibrary-1-…`, `AEAnnotation_v10312011_…`).
    pub fn discover() -> Result<Self, IbkError> {
        let home = dirs::home_dir()
            .ok_or_else(|| IbkError::Io("cannot determine home directory".to_string()))?;
        let books_path = first_store(&home.join(BOOKS_CONTAINER))?;
        let annotations_path = first_store(&home.join(ANNOTATIONS_CONTAINER))?;
        Library::open(books_path, annotations_path)
    }

    /// Path of the book library store.
    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    /// Path of the annotation store.
    pub fn annotations_path(&self) -> &Path {
        &self.annotations_path
    }

    /// Every asset in the library.
    pub fn books(&self) -> Result<Vec<Book>, IbkError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM {BOOKS_TABLE}");
        collect_rows(&self.books_db, &sql, params![], Book::from_row)
    }

    /// Look up a single asset by store asset id.
    pub fn book(&self, asset_id: &str) -> Result<Option<Book>, IbkError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM {BOOKS_TABLE} WHERE ZASSETID = ?1");
        let books = collect_rows(&self.books_db, &sql, params![asset_id], Book::from_row)?;
        Ok(books.into_iter().next())
    }

    /// Every annotation in the store, across all books.
    pub fn annotations(&self) -> Result<Vec<Annotation>, IbkError> {
        let sql = format!("SELECT {ANNOTATION_COLUMNS} FROM {ANNOTATIONS_TABLE}");
        collect_rows(&self.annotations_db, &sql, params![], Annotation::from_row)
    }

    /// Annotations belonging to one book.
    pub fn annotations_for(&self, asset_id: &str) -> Result<Vec<Annotation>, IbkError> {
        let sql = format!(
            "SELECT {ANNOTATION_COLUMNS} FROM {ANNOTATIONS_TABLE} WHERE ZANNOTATIONASSETID = ?1"
        );
        collect_rows(
            &self.annotations_db,
            &sql,
            params![asset_id],
            Annotation::from_row,
        )
    }

    /// Row counts for both stores, cheap enough for `ibooks info`.
    pub fn counts(&self) -> Result<(u64, u64), IbkError> {
        Ok((
            count_rows(&self.books_db, BOOKS_TABLE)?,
            count_rows(&self.annotations_db, ANNOTATIONS_TABLE)?,
        ))
    }
}

fn open_store(path: &Path) -> Result<Connection, IbkError> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| IbkError::Database(format!("cannot open {}: {}", path.display(), e)))
}

/// Pick the live store file out of a container directory.
fn first_store(dir: &Path) -> Result<PathBuf, IbkError> {
    find_store_files(dir, &[STORE_EXTENSION])?
        .into_iter()
        .next()
        .ok_or_else(|| IbkError::Io(format!("no .sqlite store found in {}", dir.display())))
}

/// Run a query and map every row, stopping at the first mapping error.
fn collect_rows<T>(
    db: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
    from_row: impl Fn(&rusqlite::Row<'_>) -> Result<T, IbkError>,
) -> Result<Vec<T>, IbkError> {
    let mut stmt = db
        .prepare(sql)
        .map_err(|e| IbkError::Database(format!("prepare failed: {e}")))?;
    let mut rows = stmt
        .query(params)
        .map_err(|e| IbkError::Database(format!("query failed: {e}")))?;

    let mut out = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|e| IbkError::Database(format!("row fetch failed: {e}")))?
    {
        out.push(from_row(row)?);
    }
    Ok(out)
}

fn count_rows(db: &Connection, table: &str) -> Result<u64, IbkError> {
    db.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get::<_, u64>(0)
    })
    .map_err(|e| IbkError::Database(format!("count on {table} failed: {e}")))
}
