//! table drives the recursive, in-order walk of a table b-tree: parse a
//! page, visit each cell in left-to-right key order, descending into
//! child pages for interior cells and reassembling overflow payloads for
//! leaf cells. Grounded on the teacher's `btree/table.rs`, which drove
//! the same walk with a hand-rolled `EitherIter` stack iterator over
//! borrowed pages; rewritten as plain recursion over owned, per-call
//! `Pager::page()` views (see `page.rs`/`pager.rs`), since nothing here
//! needs to hold two pages' borrows alive across a single call.

use super::leaf::reassemble_overflow;
use super::{BTreePage, Cell, PageKind};
use crate::pager::{PageNum, Pager};
use crate::Error;
use std::io::{Read, Seek};

/// One fully materialized row: its rowid and its complete (local +
/// reassembled overflow) payload bytes.
pub struct Row {
    pub rowid: i64,
    pub payload: Vec<u8>,
}

/// Recursively visits every row of the table b-tree rooted at
/// `root_page`, in ascending rowid order, calling `visitor` once per row.
/// `visitor` returning `Err` stops the walk immediately -- no further
/// cells are visited and the error propagates to the caller.
pub fn visit_table<R, F>(pager: &mut Pager<R>, root_page: PageNum, visitor: &mut F) -> Result<(), Error>
where
    R: Read + Seek,
    F: FnMut(Row) -> Result<(), Error>,
{
    let mut page = pager.page(root_page)?;
    let view = BTreePage::parse(&mut page)?;
    let usable = pager.usable_page_size();
    log::trace!(
        "visiting page {} ({:?}, {} cell(s))",
        root_page,
        view.kind,
        view.num_cells()
    );

    match view.kind {
        PageKind::LeafTable => {
            for i in 0..view.num_cells() {
                let cell = view.load_cell(&mut page, i, usable)?;
                visit_leaf_cell(pager, cell, visitor)?;
            }
            Ok(())
        }
        PageKind::InteriorTable => {
            let mut children = Vec::with_capacity(view.num_cells());
            for i in 0..view.num_cells() {
                let cell = view.load_cell(&mut page, i, usable)?;
                if let Cell::Interior { left_child, .. } = cell {
                    children.push(left_child);
                }
            }
            for child in children {
                log::debug!("page {} descending into child page {}", root_page, child);
                visit_table(pager, child, visitor)?;
            }
            if let Some(rightmost) = view.rightmost_pointer {
                log::debug!(
                    "page {} descending into right-most child page {}",
                    root_page,
                    rightmost
                );
                visit_table(pager, rightmost, visitor)?;
            }
            Ok(())
        }
        PageKind::LeafIndex | PageKind::InteriorIndex => Err(Error::UnsupportedBTreeKind),
    }
}

fn visit_leaf_cell<R, F>(pager: &mut Pager<R>, cell: Cell, visitor: &mut F) -> Result<(), Error>
where
    R: Read + Seek,
    F: FnMut(Row) -> Result<(), Error>,
{
    match cell {
        Cell::Leaf {
            rowid,
            payload_length,
            mut local,
            overflow_page,
        } => {
            if let Some(first) = overflow_page {
                let remaining = payload_length as usize - local.len();
                reassemble_overflow(pager, first, &mut local, remaining)?;
            }
            visitor(Row {
                rowid,
                payload: local,
            })
        }
        Cell::Interior { .. } => Err(Error::UnsupportedBTreeKind),
    }
}
