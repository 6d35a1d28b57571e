//! Book record and row mapping.
//!
//! One [`Book`] per `ZBKLIBRARYASSET` row. Mapping is a direct copy of the
//! named columns; the only conversions are Core Data timestamps and the
//! integer state flags, which SQLite stores as nullable 0/1.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

use crate::books::timestamp::core_data_timestamp;
use crate::IbkError;

/// Column list shared by the `books()` and `book()` queries. Order matters:
/// [`Book::from_row`] reads by position.
pub(crate) const BOOK_COLUMNS: &str = "Z_PK, ZASSETID, ZTITLE, ZAUTHOR, ZGENRE, \
     ZLANGUAGE, ZPAGECOUNT, ZYEAR, ZBOOKDESCRIPTION, ZCOVERURL, ZPATH, \
     ZSTOREID, ZSTOREPLAYLISTID, ZCONTENTTYPE, ZRATING, ZCOMPUTEDRATING, \
     ZISFINISHED, ZISHIDDEN, ZISLOCKED, ZISNEW, ZISSAMPLE, ZISSTOREAUDIOBOOK, \
     ZISEXPLICIT, ZISEPHEMERAL, ZISDEVELOPMENT, ZISPROOF, \
     ZCREATIONDATE, ZMODIFICATIONDATE, ZRELEASEDATE, ZPURCHASEDATE";

/// One asset in the Apple Books library.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    /// Core Data primary key (`Z_PK`).
    pub rowid: i64,
    /// Store asset id (`ZASSETID`); annotations reference this.
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i64>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    /// On-disk path of the book file, when the asset is downloaded.
    pub path: Option<String>,
    pub store_id: Option<String>,
    pub store_playlist_id: Option<String>,
    pub content_type: Option<i64>,
    pub rating: Option<i64>,
    pub computed_rating: Option<i64>,
    pub is_finished: bool,
    pub is_hidden: bool,
    pub is_locked: bool,
    pub is_new: bool,
    pub is_sample: bool,
    pub is_store_audiobook: bool,
    pub is_explicit: bool,
    pub is_ephemeral: bool,
    pub is_development: bool,
    pub is_proof: bool,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
    pub release_date: Option<DateTime<Utc>>,
    pub purchase_date: Option<DateTime<Utc>>,
}

impl Book {
    /// Construct a book from a row of [`BOOK_COLUMNS`].
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, IbkError> {
        let get_flag = |idx: usize| -> Result<bool, IbkError> {
            let v: Option<i64> = column(row, idx)?;
            Ok(v.unwrap_or(0) != 0)
        };
        let get_date = |idx: usize| -> Result<Option<DateTime<Utc>>, IbkError> {
            Ok(core_data_timestamp(column(row, idx)?))
        };

        Ok(Book {
            rowid: column(row, 0)?,
            id: column(row, 1)?,
            title: column(row, 2)?,
            author: column(row, 3)?,
            genre: column(row, 4)?,
            language: column(row, 5)?,
            page_count: column(row, 6)?,
            year: column(row, 7)?,
            description: column(row, 8)?,
            cover_url: column(row, 9)?,
            path: column(row, 10)?,
            store_id: column(row, 11)?,
            store_playlist_id: column(row, 12)?,
            content_type: column(row, 13)?,
            rating: column(row, 14)?,
            computed_rating: column(row, 15)?,
            is_finished: get_flag(16)?,
            is_hidden: get_flag(17)?,
            is_locked: get_flag(18)?,
            is_new: get_flag(19)?,
            is_sample: get_flag(20)?,
            is_store_audiobook: get_flag(21)?,
            is_explicit: get_flag(22)?,
            is_ephemeral: get_flag(23)?,
            is_development: get_flag(24)?,
            is_proof: get_flag(25)?,
            creation_date: get_date(26)?,
            modification_date: get_date(27)?,
            release_date: get_date(28)?,
            purchase_date: get_date(29)?,
        })
    }

    /// Title for display, falling back to the asset id for pathological rows.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Author for display.
    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown Author")
    }
}

/// Read one column, wrapping the rusqlite error with its position.
pub(crate) fn column<T: rusqlite::types::FromSql>(
    row: &Row<'_>,
    idx: usize,
) -> Result<T, IbkError> {
    row.get(idx)
        .map_err(|e| IbkError::Database(format!("column {idx}: {e}")))
}
