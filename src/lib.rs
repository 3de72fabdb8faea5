//! A read-only SQLite file-format reader: open a `.sqlite` file, list the
//! tables its schema describes, and walk each table's rows as decoded
//! column values. Grounded on the teacher's `lib.rs`, which wired a
//! pager, schema lookup, and a small SQL query engine together behind
//! free functions (`get_creation_sql_and_root_pagenum`, `new_table_iterator`,
//! `print_schema`, `run_query`); this crate keeps the pager/schema/b-tree
//! wiring and drops the query engine, replacing the free functions with
//! a `Database` handle.

pub mod btree;
pub mod dbheader;
pub mod page;
pub mod pager;
pub mod record;
pub mod schema;
pub mod serial_type;
pub mod sql_value;
pub mod table;
pub mod varint;

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use dbheader::{DbfileHeader, TextEncoding};
use pager::Pager;
use table::Table;

/// Every way this crate's operations can fail. Mirrors the file format's
/// own failure points one-to-one rather than nesting a per-module
/// hierarchy: a caller that wants to react to "this looked like garbage"
/// differently from "the file was too short" can match on a single enum.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read: expected more bytes than were available")]
    ShortRead,

    #[error("not a SQLite database: bad magic header string")]
    InvalidMagic,

    #[error("seek or offset fell outside the bounds of a page")]
    BadPageOffset,

    #[error("page number is out of range for this database")]
    PageOutOfRange,

    #[error("only table b-trees are supported, not index b-trees")]
    UnsupportedBTreeKind,

    #[error("varint did not terminate within 9 bytes")]
    InvalidVarint,

    #[error("record header or body was malformed")]
    InvalidRecord,

    #[error("overflow page chain ended early or continued past the expected length")]
    OverflowChainBroken,

    #[error("text encoding is not supported")]
    UnsupportedEncoding,

    #[error("no table with that name exists in the schema")]
    UnknownTable,
}

/// A file-backed SQLite database, opened read-only. Holds the database
/// file header and the schema's table list; page access goes through the
/// pager, which caches pages but never evicts them (spec.md §5).
pub struct Database<R> {
    pager: Pager<R>,
    header: DbfileHeader,
    tables: Vec<Table>,
}

impl Database<File> {
    /// Opens `path`, validates the 100-byte file header, and loads the
    /// schema table (page 1) to build the table list.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }
}

impl<R: Read + Seek> Database<R> {
    /// Builds a `Database` from an already-open reader. Exposed
    /// separately from `open` so callers (and tests) can use an
    /// in-memory `Cursor<Vec<u8>>` instead of a real file.
    pub fn from_reader(mut reader: R) -> Result<Self, Error> {
        let file_len = reader.seek(std::io::SeekFrom::End(0))?;
        reader.seek(std::io::SeekFrom::Start(0))?;
        let header = dbheader::get_header(&mut reader, file_len)?;
        log::debug!(
            "opened database: page_size={} reserved_per_page={} pages={}",
            header.page_size,
            header.reserved_per_page,
            header.db_size_in_pages
        );

        let mut pager = Pager::new(
            reader,
            header.page_size,
            header.reserved_per_page,
            header.db_size_in_pages,
        );
        let tables = schema::load_tables(&mut pager, header.text_encoding)?;
        log::trace!("loaded {} table(s) from schema", tables.len());

        Ok(Database {
            pager,
            header,
            tables,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.header.page_size
    }

    pub fn num_pages(&self) -> u32 {
        self.header.db_size_in_pages
    }

    pub fn version(&self) -> u32 {
        self.header.sqlite_version_number
    }

    pub fn encoding(&self) -> TextEncoding {
        self.header.text_encoding
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Walks every row of `table_name` in ascending rowid order, decoding
    /// each row's payload and calling `visitor` with the rowid and
    /// decoded column values. Stops immediately if `visitor` returns an
    /// error.
    pub fn visit_table_records<F>(&mut self, table_name: &str, mut visitor: F) -> Result<(), Error>
    where
        F: FnMut(i64, &[sql_value::Value]) -> Result<(), Error>,
    {
        let root_page = self
            .table(table_name)
            .ok_or(Error::UnknownTable)?
            .root_page();
        let encoding = self.header.text_encoding;
        btree::table::visit_table(&mut self.pager, root_page, &mut |row| {
            let record = record::decode(&row.payload, encoding)?;
            visitor(row.rowid, &record.values)
        })
    }

    /// Releases cached pages and drops the backing reader (spec.md §5).
    /// Further page access through this `Database` fails with
    /// `Error::Io`.
    pub fn close(&mut self) {
        self.pager.close();
    }
}
