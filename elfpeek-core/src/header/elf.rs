use super::ident::Elf64Ident;
use super::HEADER_SIZE;
use crate::error::DecodeError;
use byteorder::{NativeEndian, ReadBytesExt};
use goblin::elf::header::{ELFCLASS64, ET_EXEC, SIZEOF_IDENT};
use std::io::Cursor;

/// Represents the ELF (Executable and Linkable Format) header for a 64-bit object file.
///
/// This is a decoded snapshot of the standard `Elf64_Ehdr`: once built it never
/// goes back to its source. Every field is kept exactly as read, in host byte
/// order.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf64Ehdr {
    e_ident: Elf64Ident,
    e_type: u16,
    e_machine: u16,
    e_version: u32,
    e_entry: u64,
    e_phoff: u64,
    e_shoff: u64,
    e_flags: u32,
    e_ehsize: u16,
    e_phentsize: u16,
    e_phnum: u16,
    e_shentsize: u16,
    e_shnum: u16,
    e_shstrndx: u16,
}

impl Elf64Ehdr {
    pub fn from_bytes(raw: &[u8; HEADER_SIZE]) -> Result<Elf64Ehdr, DecodeError> {
        let mut e_ident = [0u8; SIZEOF_IDENT];
        e_ident.copy_from_slice(&raw[..SIZEOF_IDENT]);

        let mut cur = Cursor::new(&raw[SIZEOF_IDENT..]);
        Ok(Elf64Ehdr {
            e_ident: Elf64Ident::from_bytes(&e_ident),
            e_type: cur.read_u16::<NativeEndian>()?,
            e_machine: cur.read_u16::<NativeEndian>()?,
            e_version: cur.read_u32::<NativeEndian>()?,
            e_entry: cur.read_u64::<NativeEndian>()?,
            e_phoff: cur.read_u64::<NativeEndian>()?,
            e_shoff: cur.read_u64::<NativeEndian>()?,
            e_flags: cur.read_u32::<NativeEndian>()?,
            e_ehsize: cur.read_u16::<NativeEndian>()?,
            e_phentsize: cur.read_u16::<NativeEndian>()?,
            e_phnum: cur.read_u16::<NativeEndian>()?,
            e_shentsize: cur.read_u16::<NativeEndian>()?,
            e_shnum: cur.read_u16::<NativeEndian>()?,
            e_shstrndx: cur.read_u16::<NativeEndian>()?,
        })
    }

    /// ELF identification bytes (magic number, class, encoding, ABI).
    pub fn ident(&self) -> &Elf64Ident {
        &self.e_ident
    }

    /// True when the first four bytes are `0x7F`, `'E'`, `'L'`, `'F'`.
    pub fn is_valid_magic(&self) -> bool {
        self.e_ident.is_valid_magic()
    }

    /// Returns true if the ident declares a 64-bit class.
    pub fn is_64(&self) -> bool {
        self.e_ident.class() == ELFCLASS64
    }

    /// Returns true if the object type is `ET_EXEC`.
    pub fn is_executable(&self) -> bool {
        self.e_type == ET_EXEC
    }

    /// Object file type (e.g. relocatable, executable, shared, core).
    ///
    /// Common values:
    /// - `ET_NONE` (0): No file type
    /// - `ET_REL` (1): Relocatable file
    /// - `ET_EXEC` (2): Executable file
    /// - `ET_DYN` (3): Shared object
    /// - `ET_CORE` (4): Core dump
    pub fn object_type(&self) -> u16 {
        self.e_type
    }

    /// Target architecture (e.g., `EM_X86_64` = 62, `EM_AARCH64` = 183).
    pub fn machine(&self) -> u16 {
        self.e_machine
    }

    /// ELF version (usually set to `EV_CURRENT` = 1).
    pub fn version(&self) -> u32 {
        self.e_version
    }

    /// Virtual address of the program entry point.
    pub fn entry_point(&self) -> u64 {
        self.e_entry
    }

    /// File offset of the program header table.
    pub fn program_header_offset(&self) -> u64 {
        self.e_phoff
    }

    /// File offset of the section header table.
    pub fn section_header_offset(&self) -> u64 {
        self.e_shoff
    }

    /// Processor-specific flags.
    pub fn flags(&self) -> u32 {
        self.e_flags
    }

    /// Size of the ELF header as recorded in the file (`64` for ELF64).
    pub fn header_size(&self) -> u16 {
        self.e_ehsize
    }

    pub fn program_header_entry_size(&self) -> u16 {
        self.e_phentsize
    }

    pub fn program_header_entry_count(&self) -> u16 {
        self.e_phnum
    }

    pub fn section_header_entry_size(&self) -> u16 {
        self.e_shentsize
    }

    pub fn section_header_entry_count(&self) -> u16 {
        self.e_shnum
    }

    /// Index of the section header string table.
    pub fn section_name_table_index(&self) -> u16 {
        self.e_shstrndx
    }
}
