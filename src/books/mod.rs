//! Apple Books on-disk store parsing.
//!
//! This module contains types and functions for reading the two SQLite
//! databases used by the desktop Apple Books application: the book library
//! (`ZBKLIBRARYASSET` table) and the annotation store (`ZAEANNOTATION`
//! table), plus the EPUB CFI location format that anchors each annotation
//! to a position inside its book.
//!
//! Start with [`library::Library`] to open the stores, then use
//! [`cfi::EpubCfi`] to order annotations by document position.

pub mod annotation;
pub mod book;
pub mod cfi;
pub mod constants;
pub mod library;
pub mod style;
pub mod timestamp;
