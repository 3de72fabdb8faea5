//! dbheader reads the 100-byte file header. Grounded on the teacher's own
//! `dbheader.rs` for the byteorder/Cursor decode style, but relaxed to
//! validate only what the core actually needs (magic, page size, text
//! encoding) rather than hard-failing on freelist/autovacuum/schema-cookie
//! fields the teacher checked -- that over-strict validation would reject
//! real-world files such as `chrome-history.sqlite` and
//! `firefox-history.sqlite`. See `examples/original_source/file.go`'s
//! `dbHeader`/`File.Open` for the fields a reader actually consumes.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

use crate::Error;

pub const SQLITE_DB_HEADER_BYTES: usize = 100;
const SQLITE3_MAGIC_STRING: &[u8; 16] = b"SQLite format 3\0";

/// Text encodings named in the file header. Only `Utf8` is supported for
/// decoding; the others are recognized so `encoding()` can report them
/// before a record decode surfaces `Error::UnsupportedEncoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8 = 1,
    Utf16Le = 2,
    Utf16Be = 3,
}

impl TextEncoding {
    fn from_u32(v: u32) -> Result<Self, Error> {
        match v {
            1 => Ok(TextEncoding::Utf8),
            2 => Ok(TextEncoding::Utf16Le),
            3 => Ok(TextEncoding::Utf16Be),
            _ => Err(Error::UnsupportedEncoding),
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// The parsed fields of the 100-byte file header that the core consumes.
#[derive(Debug, Clone)]
pub struct DbfileHeader {
    pub page_size: u32,
    pub reserved_per_page: u8,
    pub db_size_in_pages: u32,
    pub text_encoding: TextEncoding,
    pub sqlite_version_number: u32,
}

fn decode_page_size(raw: u16) -> Result<u32, Error> {
    match raw {
        1 => Ok(65536),
        512 | 1024 | 2048 | 4096 | 8192 | 16384 | 32768 => Ok(raw as u32),
        _ => Err(Error::InvalidMagic),
    }
}

/// Reads and validates the file header from a seekable reader. `file_len`
/// is used to compute `db_size_in_pages` when the in-header size is zero
/// (spec.md §3: "a file of any nonzero length counted as at least one
/// page").
pub fn get_header<R: Read + Seek>(f: &mut R, file_len: u64) -> Result<DbfileHeader, Error> {
    f.seek(SeekFrom::Start(0)).map_err(Error::Io)?;

    let mut magic = [0u8; 16];
    f.read_exact(&mut magic).map_err(Error::Io)?;
    if &magic != SQLITE3_MAGIC_STRING {
        return Err(Error::InvalidMagic);
    }

    let page_size = decode_page_size(f.read_u16::<BigEndian>().map_err(Error::Io)?)?;

    // file format write/read version, reserved space, payload fractions:
    // not validated, carried through to nothing (spec.md doesn't require
    // checking them, and real-world files vary here).
    let _write_version = f.read_u8().map_err(Error::Io)?;
    let _read_version = f.read_u8().map_err(Error::Io)?;
    let reserved_per_page = f.read_u8().map_err(Error::Io)?;
    let _max_payload_fraction = f.read_u8().map_err(Error::Io)?;
    let _min_payload_fraction = f.read_u8().map_err(Error::Io)?;
    let _leaf_payload_fraction = f.read_u8().map_err(Error::Io)?;

    let _change_counter = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let db_size_in_header = f.read_u32::<BigEndian>().map_err(Error::Io)?;

    let _first_freelist_trunk_page = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _total_freelist_pages = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _schema_cookie = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _schema_format_number = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _default_page_cache_size = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _largest_root_btree_page = f.read_u32::<BigEndian>().map_err(Error::Io)?;

    let text_encoding = TextEncoding::from_u32(f.read_u32::<BigEndian>().map_err(Error::Io)?)?;

    let _user_version = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _incremental_vacuum = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let _application_id = f.read_u32::<BigEndian>().map_err(Error::Io)?;

    let mut _reserved_for_expansion = [0u8; 20];
    f.read_exact(&mut _reserved_for_expansion).map_err(Error::Io)?;

    let _version_valid_for = f.read_u32::<BigEndian>().map_err(Error::Io)?;
    let sqlite_version_number = f.read_u32::<BigEndian>().map_err(Error::Io)?;

    let db_size_in_pages = if db_size_in_header != 0 {
        db_size_in_header
    } else if file_len == 0 {
        0
    } else {
        ((file_len + page_size as u64 - 1) / page_size as u64) as u32
    };

    Ok(DbfileHeader {
        page_size,
        reserved_per_page,
        db_size_in_pages,
        text_encoding,
        sqlite_version_number,
    })
}
