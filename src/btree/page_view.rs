//! page_view ties together a single b-tree page's header, cell pointer
//! array, and per-kind cell decoding behind one type. Grounded on the
//! teacher's pattern of combining header + cell pointer reads at the top
//! of each of its `btree/*.rs` iterators; collected here into one struct
//! so `table::visit_table` has a single entry point per page rather than
//! re-deriving `header_offset`/cell count at each call site.

use super::{cell::CellPointerArray, header, interior, leaf, Cell, PageKind};
use crate::page::Page;
use crate::Error;

pub struct BTreePage {
    pub kind: PageKind,
    pub rightmost_pointer: Option<crate::pager::PageNum>,
    cells: CellPointerArray,
}

impl BTreePage {
    /// Parses the b-tree header and cell pointer array of `page`. Page 1
    /// carries the 100-byte database file header before its own b-tree
    /// header; every other page's b-tree header starts at offset 0.
    pub fn parse(page: &mut Page) -> Result<Self, Error> {
        let header_offset = if page.page_id() == 1 { 100 } else { 0 };
        let h = header::parse(page, header_offset)?;
        let cells = CellPointerArray::parse(page, header_offset, &h)?;
        Ok(BTreePage {
            kind: h.kind,
            rightmost_pointer: h.rightmost_pointer.map(|p| p as crate::pager::PageNum),
            cells,
        })
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Decodes the cell at `index`, dispatching on this page's kind.
    /// Returns `Error::UnsupportedBTreeKind` for index pages, which this
    /// crate does not traverse.
    pub fn load_cell(&self, page: &mut Page, index: usize, usable_page_size: u32) -> Result<Cell, Error> {
        let offset = self.cells.offset(index);
        match self.kind {
            PageKind::LeafTable => leaf::load(page, offset, usable_page_size),
            PageKind::InteriorTable => interior::load(page, offset),
            PageKind::LeafIndex | PageKind::InteriorIndex => Err(Error::UnsupportedBTreeKind),
        }
    }
}
