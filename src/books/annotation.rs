//! Annotation record, row mapping, and reading-order sort.
//!
//! One [`Annotation`] per `ZAEANNOTATION` row. The location column is
//! parsed into an [`EpubCfi`] at load time; a NULL location (bookmarks,
//! PDF assets) maps to `None`, while a non-NULL value that lacks the
//! `epubcfi( … )` envelope fails the whole load — the row is not returned
//! half-mapped.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

use crate::books::book::column;
use crate::books::cfi::EpubCfi;
use crate::books::style::HighlightStyle;
use crate::books::timestamp::core_data_timestamp;
use crate::IbkError;

/// Column list shared by the annotation queries. Order matters:
/// [`Annotation::from_row`] reads by position.
pub(crate) const ANNOTATION_COLUMNS: &str = "ZANNOTATIONUUID, ZANNOTATIONASSETID, \
     ZANNOTATIONCREATORIDENTIFIER, ZANNOTATIONLOCATION, ZANNOTATIONNOTE, \
     ZANNOTATIONREPRESENTATIVETEXT, ZANNOTATIONSELECTEDTEXT, ZANNOTATIONTYPE, \
     ZANNOTATIONSTYLE, ZANNOTATIONDELETED, ZANNOTATIONISUNDERLINE, \
     ZPLABSOLUTEPHYSICALLOCATION, ZPLLOCATIONRANGEEND, ZPLLOCATIONRANGESTART, \
     ZANNOTATIONCREATIONDATE, ZANNOTATIONMODIFICATIONDATE, ZPLSTORAGEUUID, \
     ZPLUSERDATA";

/// One highlight, note, or bookmark from the annotation store.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// Annotation uuid (`ZANNOTATIONUUID`).
    pub id: String,
    /// Asset id of the owning book (`ZANNOTATIONASSETID`).
    pub asset_id: Option<String>,
    pub creator_identifier: Option<String>,
    /// Parsed CFI location within the book, when the row carries one.
    pub location: Option<EpubCfi>,
    /// User-typed note text.
    pub note: Option<String>,
    pub representative_text: Option<String>,
    /// The highlighted passage.
    pub selected_text: Option<String>,
    /// Raw `ZANNOTATIONTYPE` code.
    pub kind: Option<i64>,
    pub style: HighlightStyle,
    pub deleted: bool,
    pub is_underline: bool,
    pub absolute_physical_location: Option<i64>,
    pub location_range_end: Option<i64>,
    pub location_range_start: Option<i64>,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
    pub storage_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Vec<u8>>,
}

impl Annotation {
    /// Construct an annotation from a row of [`ANNOTATION_COLUMNS`].
    ///
    /// A malformed (non-`epubcfi`) location propagates as a CFI format
    /// error, untouched.
    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, IbkError> {
        let raw_location: Option<String> = column(row, 3)?;
        let location = raw_location.as_deref().map(EpubCfi::parse).transpose()?;

        Ok(Annotation {
            id: column(row, 0)?,
            asset_id: column(row, 1)?,
            creator_identifier: column(row, 2)?,
            location,
            note: column(row, 4)?,
            representative_text: column(row, 5)?,
            selected_text: column(row, 6)?,
            kind: column(row, 7)?,
            style: HighlightStyle::from_code(column::<Option<i64>>(row, 8)?.unwrap_or(0)),
            deleted: column::<Option<i64>>(row, 9)?.unwrap_or(0) != 0,
            is_underline: column::<Option<i64>>(row, 10)?.unwrap_or(0) != 0,
            absolute_physical_location: column(row, 11)?,
            location_range_end: column(row, 12)?,
            location_range_start: column(row, 13)?,
            creation_date: core_data_timestamp(column(row, 14)?),
            modification_date: core_data_timestamp(column(row, 15)?),
            storage_uuid: column(row, 16)?,
            user_data: column(row, 17)?,
        })
    }

    /// True when the row carries note text.
    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Sort annotations into reading order.
///
/// Locations compare by CFI document order; annotations with no location
/// (bookmarks, PDF assets) sort first, in their incoming relative order —
/// the sort is stable.
pub fn sort_by_location(annotations: &mut [Annotation]) {
    annotations.sort_by(|a, b| a.location.cmp(&b.location));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_location(raw: Option<&str>) -> Annotation {
        Annotation {
            id: "test".to_string(),
            asset_id: None,
            creator_identifier: None,
            location: raw.map(|r| EpubCfi::parse(r).unwrap()),
            note: None,
            representative_text: None,
            selected_text: None,
            kind: None,
            style: HighlightStyle::Yellow,
            deleted: false,
            is_underline: false,
            absolute_physical_location: None,
            location_range_end: None,
            location_range_start: None,
            creation_date: None,
            modification_date: None,
            storage_uuid: None,
            user_data: None,
        }
    }

    #[test]
    fn test_sort_by_location_reading_order() {
        let mut anns = vec![
            with_location(Some("epubcfi(/6/8!/4/2:10)")),
            with_location(None),
            with_location(Some("epubcfi(/6/4!/4/2:99)")),
            with_location(Some("epubcfi(/6/8!/4/2)")),
        ];
        sort_by_location(&mut anns);

        let order: Vec<Option<&str>> = anns
            .iter()
            .map(|a| a.location.as_ref().map(|l| l.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                None,
                Some("epubcfi(/6/4!/4/2:99)"),
                Some("epubcfi(/6/8!/4/2)"),
                Some("epubcfi(/6/8!/4/2:10)"),
            ]
        );
    }
}
