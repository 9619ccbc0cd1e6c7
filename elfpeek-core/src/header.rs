pub mod elf;
pub mod ident;

use std::io::{self, Read};

use crate::error::DecodeError;
use elf::Elf64Ehdr;

/// Size in bytes of a 64-bit ELF file header.
pub const HEADER_SIZE: usize = goblin::elf64::header::SIZEOF_EHDR;

/// Reads exactly [`HEADER_SIZE`] bytes from `source` and decodes them.
///
/// The magic signature is not checked here; a non-ELF input decodes just as
/// well and callers ask [`Elf64Ehdr::is_valid_magic`] afterwards. Multi-byte
/// fields are taken in host byte order whatever the ident's data encoding says.
pub fn decode<R: Read>(source: &mut R) -> Result<Elf64Ehdr, DecodeError> {
    let raw = read_header_bytes(source)?;
    let header = Elf64Ehdr::from_bytes(&raw)?;

    if header.is_valid_magic() {
        log::debug!("decoded ELF header, type {:#x}", header.object_type());
    } else {
        log::warn!("magic mismatch: {:02x?}", header.ident().magic());
    }
    Ok(header)
}

/// Same as [`decode`], for data already in memory. Only the first
/// [`HEADER_SIZE`] bytes of `bytes` are looked at.
pub fn decode_bytes(bytes: &[u8]) -> Result<Elf64Ehdr, DecodeError> {
    decode(&mut io::Cursor::new(bytes))
}

fn read_header_bytes<R: Read>(source: &mut R) -> Result<[u8; HEADER_SIZE], DecodeError> {
    let mut buf = [0u8; HEADER_SIZE];
    let mut filled = 0;

    while filled < HEADER_SIZE {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if filled < HEADER_SIZE {
        log::warn!("source ended after {filled} of {HEADER_SIZE} header bytes");
        return Err(DecodeError::Truncated { read: filled });
    }

    log::trace!("read {HEADER_SIZE} header bytes");
    Ok(buf)
}
