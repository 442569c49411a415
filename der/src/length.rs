use crate::cursor::ByteCursor;
use crate::error::Error;

/// Decode a DER length field.
///
/// Short form covers 0..=127 in one byte. In long form the first byte keeps
/// a count of following big-endian length bytes in its low seven bits. The
/// reserved indefinite-length marker (0x80) is always rejected.
pub fn decode_length(cursor: &mut ByteCursor<'_>) -> Result<usize, Error> {
    let byte = cursor.read_byte()?;
    if byte < 0x80 {
        return Ok(byte as usize);
    }
    if byte == 0x80 {
        return Err(Error::IndefiniteLength);
    }

    let count = (byte & 0x7f) as usize;
    if count > size_of::<usize>() {
        return Err(Error::InvalidEncoding(format!(
            "length field of {} bytes is not supported",
            count
        )));
    }
    let mut length = 0usize;
    for _ in 0..count {
        length = (length << 8) | cursor.read_byte()? as usize;
    }
    Ok(length)
}

/// Encode a DER length field in minimal form.
///
/// Content lengths that do not fit in two length bytes are outside the
/// supported range and a caller contract violation.
pub fn encode_length(length: usize) -> Vec<u8> {
    assert!(length < 0x10000, "length out of supported range");

    if length < 0x80 {
        vec![length as u8]
    } else if length < 0x100 {
        vec![0x81, length as u8]
    } else {
        vec![0x82, (length >> 8) as u8, length as u8]
    }
}
