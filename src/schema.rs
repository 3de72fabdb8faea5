//! schema loads `sqlite_schema` (page 1): walks its rows, keeps the
//! `table` rows, and extracts column names/declared types from each
//! table's stored `CREATE TABLE` text. Grounded on the teacher's
//! `get_creation_sql_and_root_pagenum` (which located a single named
//! table's row) and `pt_to_ast::parse_create_statement` (which used a
//! `pest` grammar to pull column names out of CREATE TABLE text); this
//! crate replaces the grammar with a direct splitter, since the only
//! thing read from a CREATE TABLE statement here is column names and
//! declared types, not a full expression AST.

use crate::btree::table::{visit_table, Row};
use crate::dbheader::TextEncoding;
use crate::pager::Pager;
use crate::sql_value::Value;
use crate::table::{Column, Table};
use crate::Error;
use std::io::{Read, Seek};

/// Walks the schema table on page 1 and returns every user table it
/// describes, in the order their rows appear. Views, indexes, triggers,
/// and `sqlite_`-prefixed internal tables are skipped.
pub fn load_tables<R: Read + Seek>(pager: &mut Pager<R>, encoding: TextEncoding) -> Result<Vec<Table>, Error> {
    let mut tables = Vec::new();

    visit_table(pager, 1, &mut |row: Row| {
        // A decode failure here is a corrupt schema cell; propagate it
        // immediately rather than deferring past the walk (spec.md §4.4,
        // §7: corrupt cells fail the whole traversal, no partial results).
        let record = crate::record::decode(&row.payload, encoding)?;
        if let Some(table) = schema_row_to_table(&record.values) {
            log::trace!(
                "schema: table {:?} rooted at page {}",
                table.name(),
                table.root_page()
            );
            tables.push(table);
        }
        Ok(())
    })?;

    Ok(tables)
}

/// A `sqlite_schema` row is `(type, name, tbl_name, rootpage, sql)`.
/// Returns `None` for rows this reader doesn't keep -- skipping a view,
/// index, trigger, or internal `sqlite_`-prefixed table is routine and
/// not logged, but a `table` row that doesn't otherwise look like a valid
/// table entry is unusual enough to warn about.
fn schema_row_to_table(values: &[Value]) -> Option<Table> {
    if values.len() < 5 {
        log::warn!(
            "schema: skipping a row with only {} column(s), expected 5",
            values.len()
        );
        return None;
    }
    let kind = as_text(&values[0])?;
    if kind != "table" {
        return None;
    }
    let name = match as_text(&values[1]) {
        Some(n) => n,
        None => {
            log::warn!("schema: skipping a table row whose name column isn't text");
            return None;
        }
    };
    if name.starts_with("sqlite_") {
        return None;
    }
    let root_page = match &values[3] {
        Value::Int(n) if *n > 0 => *n as crate::pager::PageNum,
        _ => {
            log::warn!("schema: skipping table {:?}, its root page isn't a positive integer", name);
            return None;
        }
    };
    let sql = match as_text(&values[4]) {
        Some(s) => s,
        None => {
            log::warn!("schema: skipping table {:?}, its CREATE TABLE sql isn't text", name);
            return None;
        }
    };
    let columns = parse_columns(sql);
    Some(Table::new(name.to_string(), root_page, columns))
}

fn as_text(v: &Value) -> Option<&str> {
    match v {
        Value::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Naive CREATE TABLE column extractor: find the parenthesized column
/// list, split it on top-level commas (tracking nested parens so a
/// column like `n NUMERIC(10,2)` isn't split mid-type), drop entries
/// that are table-level constraints rather than column definitions, and
/// take each remaining entry's first whitespace-delimited token as the
/// column name and the rest (if any) as its declared type.
fn parse_columns(sql: &str) -> Vec<Column> {
    let open = match sql.find('(') {
        Some(i) => i,
        None => return Vec::new(),
    };
    let close = match sql.rfind(')') {
        Some(i) if i > open => i,
        _ => return Vec::new(),
    };
    let body = &sql[open + 1..close];

    let mut entries = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                entries.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(body[start..].trim());

    const CONSTRAINT_KEYWORDS: [&str; 5] = ["PRIMARY", "UNIQUE", "CHECK", "FOREIGN", "CONSTRAINT"];

    entries
        .into_iter()
        .filter(|e| !e.is_empty())
        .filter(|e| {
            let first_word = e.split_whitespace().next().unwrap_or("").to_uppercase();
            !CONSTRAINT_KEYWORDS.contains(&first_word.as_str())
        })
        .map(|e| {
            let mut parts = e.splitn(2, char::is_whitespace);
            let name = parts.next().unwrap_or("").trim_matches(|c| c == '"' || c == '`' || c == '\'' || c == '[' || c == ']');
            let declared_type = parts.next().unwrap_or("").trim().to_string();
            Column::new(name.to_string(), declared_type)
        })
        .collect()
}
