//! header reads the 8-or-12-byte b-tree page header. Grounded on the
//! teacher's `btree/header.rs` `check_header`, converted from panicking
//! `.expect()` calls to `Result`, and fixing a typo where a zero
//! `cell_content_start` field decoded to `655365` instead of the correct
//! `65536` (spec.md §3 references SQLite's own "zero means 65536"
//! convention, shared with the page-size field in the file header).

use super::PageKind;
use crate::page::{Page, Whence};
use crate::Error;

#[derive(Debug, Clone)]
pub struct Header {
    pub kind: PageKind,
    pub freeblock_start: u32,
    pub num_cells: u32,
    pub cell_content_start: u32,
    pub rightmost_pointer: Option<u32>,
}

/// Parses the b-tree page header starting at `header_offset` (100 for
/// page 1, 0 otherwise -- the page-1 file header precedes the b-tree
/// header only on that page).
pub fn parse(page: &mut Page, header_offset: usize) -> Result<Header, Error> {
    page.seek(header_offset as i64, Whence::Start)?;

    let kind = PageKind::from_byte(page.read_u8()?)?;
    let freeblock_start = page.read_u16()? as u32;
    let num_cells = page.read_u16()? as u32;
    let cell_content_start = match page.read_u16()? {
        0 => 65536,
        x => x as u32,
    };
    let _num_fragmented_free_bytes = page.read_u8()?;

    let rightmost_pointer = if kind.is_interior() {
        Some(page.read_u32()?)
    } else {
        None
    };

    Ok(Header {
        kind,
        freeblock_start,
        num_cells,
        cell_content_start,
        rightmost_pointer,
    })
}

/// Byte length of the b-tree header itself (not including the database
/// file header that precedes it on page 1).
pub fn header_len(kind: PageKind) -> usize {
    if kind.is_interior() {
        12
    } else {
        8
    }
}
