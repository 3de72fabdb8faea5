//! End-to-end coverage approximating the "test-1.sqlite" fixture
//! described in the project's test matrix: a two-page, 1024-byte-page
//! database with a single user table `tbl1(one, two)` rooted at page 2.
//! The bytes are assembled by hand here rather than shipped as a binary
//! fixture, since no `.sqlite` file ships with this crate.

use std::io::Cursor;

use sqlite_reader::sql_value::Value;
use sqlite_reader::Database;

const PAGE_SIZE: usize = 1024;

fn put_u16(buf: &mut [u8], offset: usize, v: u16) {
    buf[offset..offset + 2].copy_from_slice(&v.to_be_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, v: u32) {
    buf[offset..offset + 4].copy_from_slice(&v.to_be_bytes());
}

/// A varint for values in 0..128 is always a single byte (spec.md §3).
/// Every value this test encodes fits that range.
fn small_varint(v: i64) -> u8 {
    assert!((0..128).contains(&v));
    v as u8
}

fn build_file_header(db_size_in_pages: u32) -> [u8; 100] {
    let mut h = [0u8; 100];
    h[0..16].copy_from_slice(b"SQLite format 3\0");
    put_u16(&mut h, 16, PAGE_SIZE as u16);
    h[18] = 1; // write version
    h[19] = 1; // read version
    h[20] = 0; // reserved space per page
    h[21] = 64; // max embedded payload fraction
    h[22] = 32; // min embedded payload fraction
    h[23] = 32; // leaf payload fraction
    put_u32(&mut h, 28, db_size_in_pages);
    put_u32(&mut h, 56, 1); // utf-8
    put_u32(&mut h, 96, 3_008_006); // sqlite_version_number
    h
}

/// Builds the sqlite_schema row for `CREATE TABLE tbl1(one varchar(10),
/// two smallint)`, rooted at page 2, matching spec.md §8 scenario 1.
fn schema_row_cell() -> Vec<u8> {
    let sql = "CREATE TABLE tbl1(one varchar(10), two smallint)";
    let name = b"tbl1";
    let kind = b"table";

    let serial_types = [
        2 * kind.len() as i64 + 13, // "table"
        2 * name.len() as i64 + 13, // name
        2 * name.len() as i64 + 13, // tbl_name
        1,                          // rootpage: 1-byte int
        2 * sql.len() as i64 + 13,  // sql
    ];

    let mut body = Vec::new();
    body.extend_from_slice(kind);
    body.extend_from_slice(name);
    body.extend_from_slice(name);
    body.push(small_varint(2)); // rootpage = 2
    body.extend_from_slice(sql.as_bytes());

    let mut header_bytes: Vec<u8> = serial_types.iter().map(|&t| small_varint(t)).collect();
    let header_length = 1 + header_bytes.len(); // +1 for the header_length varint itself
    assert!(header_length < 128);
    let mut payload = vec![small_varint(header_length as i64)];
    payload.append(&mut header_bytes);
    payload.extend_from_slice(&body);

    let payload_length = payload.len() as i64;
    assert!(payload_length < 128, "test payload must fit a 1-byte varint");

    let mut cell = vec![small_varint(payload_length), small_varint(1)]; // rowid = 1
    cell.extend_from_slice(&payload);
    cell
}

/// Builds a leaf table page. `header_offset` is 100 for page 1 (which
/// carries the 100-byte file header before its own b-tree header) and 0
/// for every other page. Cell content is placed working backward from
/// the end of the page regardless of `header_offset`, matching how
/// real SQLite pages lay out their cell content area.
fn leaf_page_with_cells(header_offset: usize, cells: &[Vec<u8>]) -> [u8; PAGE_SIZE] {
    let mut page = [0u8; PAGE_SIZE];
    page[header_offset] = 0x0d; // leaf table page

    let mut cursor = PAGE_SIZE;
    let mut offsets = Vec::with_capacity(cells.len());
    for cell in cells {
        cursor -= cell.len();
        page[cursor..cursor + cell.len()].copy_from_slice(cell);
        offsets.push(cursor as u16);
    }

    put_u16(&mut page, header_offset + 3, cells.len() as u16); // num_cells
    put_u16(&mut page, header_offset + 5, cursor as u16); // cell_content_start
    page[header_offset + 7] = 0; // fragmented free bytes

    for (i, offset) in offsets.iter().enumerate() {
        put_u16(&mut page, header_offset + 8 + i * 2, *offset);
    }
    page
}

fn build_test_database() -> Vec<u8> {
    let header = build_file_header(2);
    let schema_cell = schema_row_cell();
    let mut page1 = leaf_page_with_cells(100, &[schema_cell]);
    page1[0..100].copy_from_slice(&header);

    let page2 = leaf_page_with_cells(0, &[]); // tbl1 itself: no rows needed for this test.

    let mut bytes = page1.to_vec();
    bytes.extend_from_slice(&page2);
    bytes
}

/// Builds a `sqlite_schema` row describing a table named `name`, rooted at
/// `root_page`, with the given `CREATE TABLE` SQL -- the same shape as
/// `schema_row_cell` but parameterized for the two-table test below
/// (spec.md §8 scenario 2).
fn schema_row_cell_for(name: &str, root_page: i64, sql: &str) -> Vec<u8> {
    let kind = b"table";
    let name_bytes = name.as_bytes();

    let serial_types = [
        2 * kind.len() as i64 + 13,
        2 * name_bytes.len() as i64 + 13,
        2 * name_bytes.len() as i64 + 13,
        1,
        2 * sql.len() as i64 + 13,
    ];

    let mut body = Vec::new();
    body.extend_from_slice(kind);
    body.extend_from_slice(name_bytes);
    body.extend_from_slice(name_bytes);
    body.push(small_varint(root_page));
    body.extend_from_slice(sql.as_bytes());

    let mut header_bytes: Vec<u8> = serial_types.iter().map(|&t| small_varint(t)).collect();
    let header_length = 1 + header_bytes.len();
    assert!(header_length < 128);
    let mut payload = vec![small_varint(header_length as i64)];
    payload.append(&mut header_bytes);
    payload.extend_from_slice(&body);

    let payload_length = payload.len() as i64;
    assert!(payload_length < 128, "test payload must fit a 1-byte varint");

    let mut cell = vec![small_varint(payload_length), small_varint(1)];
    cell.extend_from_slice(&payload);
    cell
}

/// Encodes a record payload of plain 1-byte signed integer columns (serial
/// type 1), for rows small enough to stay inside a 1-byte varint header.
fn int_row_payload(values: &[i64]) -> Vec<u8> {
    let header_len = 1 + values.len();
    assert!(header_len < 128);
    let mut payload = vec![small_varint(header_len as i64)];
    payload.extend(std::iter::repeat(1u8).take(values.len()));
    payload.extend(values.iter().map(|&v| v as i64 as u8));
    payload
}

fn leaf_cell(rowid: i64, payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() < 128);
    let mut cell = vec![small_varint(payload.len() as i64), small_varint(rowid)];
    cell.extend_from_slice(payload);
    cell
}

/// A three-page database: page 1 is the schema (two tables: `tbl1` at page
/// 2 with three rows, `tbl2` at page 3 with no rows), matching the shape of
/// spec.md §8 scenario 2.
fn build_two_table_database() -> Vec<u8> {
    let header = build_file_header(3);

    let tbl1_schema = schema_row_cell_for("tbl1", 2, "CREATE TABLE tbl1(one varchar(10), two smallint)");
    let tbl2_schema = schema_row_cell_for("tbl2", 3, "CREATE TABLE tbl2(f1 int, f2 int, f3 int)");
    let mut page1 = leaf_page_with_cells(100, &[tbl1_schema, tbl2_schema]);
    page1[0..100].copy_from_slice(&header);

    let row1 = leaf_cell(1, &int_row_payload(&[10, 20]));
    let row2 = leaf_cell(5, &int_row_payload(&[30, 40]));
    let row3 = leaf_cell(7, &int_row_payload(&[50, 60]));
    let page2 = leaf_page_with_cells(0, &[row1, row2, row3]);

    let page3 = leaf_page_with_cells(0, &[]);

    let mut bytes = page1.to_vec();
    bytes.extend_from_slice(&page2);
    bytes.extend_from_slice(&page3);
    bytes
}

#[test]
fn opens_database_and_reports_header_fields() {
    let bytes = build_test_database();
    let db = Database::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(db.page_size(), 1024);
    assert_eq!(db.num_pages(), 2);
    assert_eq!(db.version(), 3_008_006);
}

#[test]
fn schema_lists_the_single_user_table() {
    let bytes = build_test_database();
    let db = Database::from_reader(Cursor::new(bytes)).unwrap();
    assert_eq!(db.tables().len(), 1);

    let tbl1 = db.table("tbl1").expect("tbl1 should be in the schema");
    assert_eq!(tbl1.root_page(), 2);
    assert_eq!(tbl1.columns().len(), 2);
    assert_eq!(tbl1.columns()[0].name(), "one");
    assert_eq!(tbl1.columns()[0].declared_type(), "varchar(10)");
    assert_eq!(tbl1.columns()[1].name(), "two");
    assert_eq!(tbl1.columns()[1].declared_type(), "smallint");
}

#[test]
fn visiting_an_empty_table_yields_no_rows() {
    let bytes = build_test_database();
    let mut db = Database::from_reader(Cursor::new(bytes)).unwrap();
    let mut seen = Vec::new();
    db.visit_table_records("tbl1", |rowid, values| {
        seen.push((rowid, values.to_vec()));
        Ok(())
    })
    .unwrap();
    assert!(seen.is_empty());
}

#[test]
fn unknown_table_name_is_rejected() {
    let bytes = build_test_database();
    let mut db = Database::from_reader(Cursor::new(bytes)).unwrap();
    let result = db.visit_table_records("does_not_exist", |_, _: &[Value]| Ok(()));
    assert!(result.is_err());
}

/// spec.md §8 scenario 2: two tables in one schema, each independently
/// addressable, with `tbl1`'s rows walked in ascending rowid order
/// (spec.md §8 property 2 and §3's rowid-ordering invariant).
#[test]
fn two_tables_are_both_listed_and_rows_come_back_in_rowid_order() {
    let bytes = build_two_table_database();
    let mut db = Database::from_reader(Cursor::new(bytes)).unwrap();

    assert_eq!(db.tables().len(), 2);
    assert!(db.table("tbl1").is_some());
    let tbl2 = db.table("tbl2").expect("tbl2 should be in the schema");
    assert_eq!(tbl2.columns().len(), 3);
    assert_eq!(tbl2.columns()[0].name(), "f1");
    assert_eq!(tbl2.columns()[2].name(), "f3");

    let mut seen = Vec::new();
    db.visit_table_records("tbl1", |rowid, values| {
        seen.push((rowid, values.to_vec()));
        Ok(())
    })
    .unwrap();

    assert_eq!(seen.len(), 3);
    let rowids: Vec<i64> = seen.iter().map(|(r, _)| *r).collect();
    assert_eq!(rowids, vec![1, 5, 7]);
    assert_eq!(seen[0].1, vec![Value::Int(10), Value::Int(20)]);
    assert_eq!(seen[1].1, vec![Value::Int(30), Value::Int(40)]);
    assert_eq!(seen[2].1, vec![Value::Int(50), Value::Int(60)]);

    // Increasing strictly, not merely non-decreasing.
    for w in rowids.windows(2) {
        assert!(w[1] > w[0]);
    }
}

#[test]
fn visiting_tbl2_independently_yields_no_rows() {
    let bytes = build_two_table_database();
    let mut db = Database::from_reader(Cursor::new(bytes)).unwrap();
    let mut seen = Vec::new();
    db.visit_table_records("tbl2", |rowid, values| {
        seen.push((rowid, values.to_vec()));
        Ok(())
    })
    .unwrap();
    assert!(seen.is_empty());
}
