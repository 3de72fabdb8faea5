//! interior decodes table-b-tree interior cells: a 4-byte left child
//! page number followed by a varint integer key. Grounded on the
//! teacher's `btree/interior.rs` `ScanIterator`, which did the same
//! decode inline per-cell; collapsed here into a single `load` function
//! that returns a `Cell::Interior` rather than an iterator item, to match
//! the rest of this module's "one cell in, one `Cell` out" shape.

use super::Cell;
use crate::page::{Page, Whence};
use crate::Error;

/// Loads the interior cell at `cell_offset`.
pub fn load(page: &mut Page, cell_offset: u16) -> Result<Cell, Error> {
    page.seek(cell_offset as i64, Whence::Start)?;
    let left_child = page.read_u32()? as crate::pager::PageNum;
    let rowid = page.read_varint().map_err(|_| Error::InvalidRecord)?;
    Ok(Cell::Interior { left_child, rowid })
}
