//! record decodes a payload's header (serial-type list) and column
//! values. Grounded on the teacher's `record.rs` `HeaderIterator`/
//! `ValueIterator` -- which iterate a record's serial-type header and
//! value slices -- collapsed here into a single fallible `decode`
//! function so errors (malformed header length, truncated body) can be
//! propagated with `Result` rather than relying on the `sqlite_varint`
//! crate's infallible tuple return the teacher's iterators assumed.

use crate::dbheader::TextEncoding;
use crate::sql_value::Value;
use crate::varint::read_varint;
use crate::Error;

#[derive(Debug, Clone)]
pub struct Record {
    pub header_length: usize,
    pub serial_types: Vec<i64>,
    pub values: Vec<Value>,
}

/// Decodes a full (possibly overflow-reassembled) payload into a record.
///
/// An empty payload is legal (spec.md §4.5, §8 scenario 6) and decodes to
/// a record with no columns rather than raising `InvalidRecord`.
pub fn decode(payload: &[u8], encoding: TextEncoding) -> Result<Record, Error> {
    if payload.is_empty() {
        return Ok(Record {
            header_length: 0,
            serial_types: Vec::new(),
            values: Vec::new(),
        });
    }

    let (header_length, hl_len) = read_varint(payload).ok_or(Error::InvalidRecord)?;
    let header_length = header_length as usize;
    if header_length < hl_len || header_length > payload.len() {
        return Err(Error::InvalidRecord);
    }

    let mut offset = hl_len;
    let mut serial_types = Vec::new();
    while offset < header_length {
        let (serial_type, n) = read_varint(&payload[offset..]).ok_or(Error::InvalidRecord)?;
        serial_types.push(serial_type);
        offset += n;
    }
    if offset != header_length {
        return Err(Error::InvalidRecord);
    }

    let mut values = Vec::with_capacity(serial_types.len());
    let mut value_offset = header_length;
    for &serial_type in &serial_types {
        let size = crate::serial_type::body_size(serial_type);
        if value_offset + size > payload.len() {
            return Err(Error::InvalidRecord);
        }
        let body = &payload[value_offset..value_offset + size];
        values.push(crate::serial_type::decode_value(serial_type, body, encoding)?);
        value_offset += size;
    }

    Ok(Record {
        header_length,
        serial_types,
        values,
    })
}
