//! serial_type classifies and decodes the per-column value types a record
//! body may hold. Grounded on the teacher's `serial_type.rs` `to_sql_value`
//! for the byteorder/Cursor decode style and the i24 sign-extension
//! algorithm, with the SQL type-affinity casting machinery
//! (`cast_to_schema_type`, `value_to_sql_typed_value`) dropped -- this
//! reader does no SQL type inference, only raw serial-type decode -- and
//! with serial type 5 (i48) implemented, which the teacher left as
//! `Err(Error::Unimplemented)`.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::sql_value::Value;
use crate::Error;

/// Returns the fixed or derived body size in bytes for `serial_type`,
/// per spec.md §3's table. Does not itself classify serial types 10/11
/// as an error -- callers decoding a body do that.
pub fn body_size(serial_type: i64) -> usize {
    match serial_type {
        0 | 8 | 9 => 0,
        1 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        5 => 6,
        6 | 7 => 8,
        n if n >= 12 && n % 2 == 0 => ((n - 12) / 2) as usize,
        n if n >= 13 => ((n - 13) / 2) as usize,
        _ => 0,
    }
}

/// Decodes the body bytes for one column, given its serial type.
/// `encoding` governs TEXT decoding; only UTF-8 is supported.
pub fn decode_value(
    serial_type: i64,
    data: &[u8],
    encoding: crate::dbheader::TextEncoding,
) -> Result<Value, Error> {
    use crate::dbheader::TextEncoding;

    let mut c = Cursor::new(data);
    match serial_type {
        0 => Ok(Value::Null),
        1 => Ok(Value::Int(c.read_i8().map_err(Error::Io)? as i64)),
        2 => Ok(Value::Int(c.read_i16::<BigEndian>().map_err(Error::Io)? as i64)),
        3 => {
            let mut bytes = [0u8; 4];
            c.read_exact(&mut bytes[1..]).map_err(Error::Io)?;
            bytes[0] = if bytes[1] & 0x80 != 0 { 0xff } else { 0 };
            Ok(Value::Int(i32::from_be_bytes(bytes) as i64))
        }
        4 => Ok(Value::Int(c.read_i32::<BigEndian>().map_err(Error::Io)? as i64)),
        5 => {
            let mut bytes = [0u8; 8];
            c.read_exact(&mut bytes[2..]).map_err(Error::Io)?;
            bytes[0] = if bytes[2] & 0x80 != 0 { 0xff } else { 0 };
            bytes[1] = bytes[0];
            Ok(Value::Int(i64::from_be_bytes(bytes)))
        }
        6 => Ok(Value::Int(c.read_i64::<BigEndian>().map_err(Error::Io)?)),
        7 => Ok(Value::Real(c.read_f64::<BigEndian>().map_err(Error::Io)?)),
        8 => Ok(Value::Int(0)),
        9 => Ok(Value::Int(1)),
        10 | 11 => Err(Error::InvalidRecord),
        n if n >= 12 && n % 2 == 0 => {
            let mut buf = vec![0u8; ((n - 12) / 2) as usize];
            c.read_exact(&mut buf).map_err(Error::Io)?;
            Ok(Value::Blob(buf))
        }
        n if n >= 13 => {
            let mut buf = vec![0u8; ((n - 13) / 2) as usize];
            c.read_exact(&mut buf).map_err(Error::Io)?;
            match encoding {
                TextEncoding::Utf8 => {
                    let s = String::from_utf8(buf).map_err(|_| Error::InvalidRecord)?;
                    Ok(Value::Text(s))
                }
                TextEncoding::Utf16Le | TextEncoding::Utf16Be => Err(Error::UnsupportedEncoding),
            }
        }
        _ => Err(Error::InvalidRecord),
    }
}
