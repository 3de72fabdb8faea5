//! cell reads the cell pointer array that immediately follows a b-tree
//! page header: K 2-byte offsets into the page, left-to-right in key
//! order. Grounded on the teacher's `btree/cell.rs` `Iterator`, which
//! combined header parsing and pointer-array reading; split apart here
//! now that `header.rs` owns header parsing.

use super::header::Header;
use crate::page::{Page, Whence};
use crate::Error;

pub struct CellPointerArray {
    offsets: Vec<u16>,
}

impl CellPointerArray {
    /// Reads the `header.num_cells`-entry pointer array immediately
    /// following the b-tree header at `header_offset`.
    pub fn parse(page: &mut Page, header_offset: usize, header: &Header) -> Result<Self, Error> {
        let array_start = header_offset + super::header::header_len(header.kind);
        page.seek(array_start as i64, Whence::Start)?;
        let mut offsets = Vec::with_capacity(header.num_cells as usize);
        for _ in 0..header.num_cells {
            offsets.push(page.read_u16()?);
        }
        Ok(CellPointerArray { offsets })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offset(&self, index: usize) -> u16 {
        self.offsets[index]
    }
}

// From command: xxd resources/test/multipage-512B-page.db
#[cfg(test)]
const TEST_PAGE: &str = "0d00 0000 0a01 ce00 01fb 01f6 01f1 01ec
01e7 01e2 01dd 01d8 01d3 01ce 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 0000
0000 0000 0000 0000 0000 0000 0000 030a
020f 4a03 0902 0f49 0308 020f 4803 0702
0f47 0306 020f 4603 0502 0f45 0304 020f
4403 0302 0f43 0302 020f 4203 0102 0f41";
