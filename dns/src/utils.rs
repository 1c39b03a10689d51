// Bounds-checked reads over the reply buffer. Every failure reports the
// offset the read started at.

use crate::error::{Error, Result};
use byteorder::{ReadBytesExt, BE};
use std::io::Cursor;

pub type Reader<'a> = Cursor<&'a [u8]>;

pub fn offset(rdr: &Reader) -> usize {
    rdr.position() as usize
}

pub fn read_u16(rdr: &mut Reader) -> Result<u16> {
    let at = offset(rdr);
    rdr.read_u16::<BE>()
        .map_err(|_| Error::UnexpectedEof { offset: at })
}

pub fn read_u32(rdr: &mut Reader) -> Result<u32> {
    let at = offset(rdr);
    rdr.read_u32::<BE>()
        .map_err(|_| Error::UnexpectedEof { offset: at })
}

/// Moves the cursor forward by `count` bytes, failing if that runs past the end.
pub fn skip(rdr: &mut Reader, count: usize) -> Result<()> {
    let end = offset(rdr) + count;
    if end > rdr.get_ref().len() {
        return Err(Error::UnexpectedEof {
            offset: rdr.get_ref().len(),
        });
    }
    rdr.set_position(end as u64);

    Ok(())
}
