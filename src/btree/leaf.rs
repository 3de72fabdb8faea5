//! leaf decodes table-b-tree leaf cells: `payload_length` and `rowid`
//! varints followed by the local portion of the payload and, if the
//! payload spills, the first overflow page number. Grounded on the
//! teacher's `btree/leaf.rs`, which explicitly left overflow payloads
//! unimplemented (`unimplemented!("Spilled payloads not implemented.")`);
//! the local/overflow split formula here is grounded instead on
//! `examples/other_examples/033cb188_i64-sqlite3-dump__src-model.rs.rs`'s
//! `LeafPageHeader::local_and_overflow_size`, reimplemented with this
//! crate's `Page`/`Pager` rather than introducing its `winnow`/`simdutf8`
//! stack. The overflow-chain walk follows the format description directly
//! (4-byte next-page pointer, up to `U - 4` payload bytes per page).

use super::Cell;
use crate::page::{Page, Whence};
use crate::pager::{PageNum, Pager};
use crate::Error;
use std::io::{Read, Seek};

/// Computes `(local_length, overflow_length)` for a cell whose total
/// payload is `payload_length` bytes, per spec.md §3:
/// `X = U - 35`, `M = ((U - 12) * 32 / 255) - 23`,
/// `K = M + ((P - M) mod (U - 4))`.
pub fn local_overflow_split(payload_length: u64, usable_page_size: u32) -> (usize, Option<usize>) {
    let u = usable_page_size as i64;
    let p = payload_length as i64;
    let x = u - 35;
    if p <= x {
        return (p as usize, None);
    }
    let m = ((u - 12) * 32 / 255) - 23;
    let k = m + ((p - m) % (u - 4));
    let local_length = if k <= x { k } else { m };
    (local_length as usize, Some((p - local_length) as usize))
}

/// Loads the leaf cell at `cell_offset`, reading only the local portion
/// of the payload. The caller is responsible for following
/// `overflow_page` (see `reassemble_overflow`) when it is `Some`.
pub fn load(page: &mut Page, cell_offset: u16, usable_page_size: u32) -> Result<Cell, Error> {
    page.seek(cell_offset as i64, Whence::Start)?;
    let payload_length = page
        .read_varint()
        .map_err(|_| Error::InvalidRecord)? as u64;
    let rowid = page.read_varint().map_err(|_| Error::InvalidRecord)?;

    let (local_length, overflow_length) = local_overflow_split(payload_length, usable_page_size);
    let local = page.read(local_length)?.to_vec();

    let overflow_page = if overflow_length.is_some() {
        Some(page.read_u32()? as PageNum)
    } else {
        None
    };

    Ok(Cell::Leaf {
        rowid,
        payload_length,
        local,
        overflow_page,
    })
}

/// Follows the overflow chain starting at `first`, appending bytes to
/// `buf` until `remaining_len` bytes have been collected. Returns
/// `Error::OverflowChainBroken` if the chain ends too early or continues
/// past the expected length.
pub fn reassemble_overflow<R: Read + Seek>(
    pager: &mut Pager<R>,
    first: PageNum,
    buf: &mut Vec<u8>,
    remaining_len: usize,
) -> Result<(), Error> {
    let usable = pager.usable_page_size();
    let mut next = first;
    let mut remaining = remaining_len;
    while remaining > 0 {
        if next == 0 {
            return Err(Error::OverflowChainBroken);
        }
        let mut page = pager.page(next)?;
        let next_ptr = page.read_u32()?;
        let chunk = (usable as usize - 4).min(remaining);
        let bytes = page.read(chunk)?;
        buf.extend_from_slice(bytes);
        remaining -= chunk;
        next = next_ptr as PageNum;
    }
    if next != 0 {
        return Err(Error::OverflowChainBroken);
    }
    Ok(())
}
