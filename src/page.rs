//! page is the fixed-size byte buffer with a cursor that every other layer
//! reads through. A `Page` is a cheap, owned view (an `Rc` clone of the
//! pager's cached bytes plus a private cursor) -- see `pager::Pager::page`.

use byteorder::{BigEndian, ByteOrder};
use std::rc::Rc;

use crate::pager::PageNum;
use crate::Error;

/// Origin for `Page::seek`.
#[derive(Debug, Clone, Copy)]
pub enum Whence {
    Start,
    Current,
    End,
}

/// An owned, page_size-byte big-endian blob with an internal read cursor.
#[derive(Clone)]
pub struct Page {
    id: PageNum,
    bytes: Rc<[u8]>,
    pos: usize,
}

impl Page {
    pub(crate) fn new(id: PageNum, bytes: Rc<[u8]>) -> Self {
        Page { id, bytes, pos: 0 }
    }

    pub fn page_id(&self) -> PageNum {
        self.id
    }

    pub fn page_size(&self) -> u32 {
        self.bytes.len() as u32
    }

    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<usize, Error> {
        let base: i64 = match whence {
            Whence::Start => 0,
            Whence::Current => self.pos as i64,
            Whence::End => self.bytes.len() as i64,
        };
        let new_pos = base + offset;
        if new_pos < 0 || new_pos as usize > self.bytes.len() {
            return Err(Error::BadPageOffset);
        }
        self.pos = new_pos as usize;
        Ok(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads `n` bytes and advances the cursor, returning a borrowed view.
    pub fn read(&mut self, n: usize) -> Result<&[u8], Error> {
        if self.pos + n > self.bytes.len() {
            return Err(Error::ShortRead);
        }
        let s = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.read(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(BigEndian::read_u16(self.read(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(BigEndian::read_i16(self.read(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(BigEndian::read_u32(self.read(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(BigEndian::read_i32(self.read(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(BigEndian::read_i64(self.read(8)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(BigEndian::read_f64(self.read(8)?))
    }

    /// Invokes the varint codec at the current cursor, advancing on
    /// success. Surfaces `Error::InvalidVarint` directly -- callers
    /// parsing record or cell structure remap this to `Error::InvalidRecord`
    /// per the varint codec's own underflow contract.
    pub fn read_varint(&mut self) -> Result<i64, Error> {
        match crate::varint::read_varint(&self.bytes[self.pos..]) {
            Some((v, n)) => {
                self.pos += n;
                Ok(v)
            }
            None => Err(Error::InvalidVarint),
        }
    }
}
