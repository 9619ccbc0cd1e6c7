//! Opt-in consistency checks on a decoded header.
//!
//! Decoding never looks at these; a caller asks for them explicitly.

use std::fmt;

use goblin::elf::section_header::SHN_UNDEF;
use goblin::elf64::program_header::SIZEOF_PHDR;
use goblin::elf64::section_header::SIZEOF_SHDR;

use crate::header::elf::Elf64Ehdr;
use crate::HEADER_SIZE;

/// Which header table a [`Violation`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    ProgramHeaders,
    SectionHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    HeaderSize { actual: u16 },
    EntrySize { table: Table, expected: usize, actual: u16 },
    PastEndOfFile { table: Table, end: u128, file_len: u64 },
    StringTableIndex { index: u16, count: u16 },
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::ProgramHeaders => "program header table",
            Table::SectionHeaders => "section header table",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HeaderSize { actual } => {
                write!(f, "header size is {actual:#x}, expected {HEADER_SIZE:#x}")
            }
            Violation::EntrySize {
                table,
                expected,
                actual,
            } => write!(f, "{table} entry size is {actual:#x}, expected {expected:#x}"),
            Violation::PastEndOfFile {
                table,
                end,
                file_len,
            } => write!(f, "{table} ends at {end:#x}, past end of file ({file_len:#x})"),
            Violation::StringTableIndex { index, count } => write!(
                f,
                "section name table index {index} out of range ({count} sections)"
            ),
        }
    }
}

/// Cross-checks the size fields and table bounds of `header`.
///
/// Only 64-bit headers with a valid magic are checked; anything else yields no
/// violations. Bounds are checked against `file_len` when it is known. An
/// empty result means the header is consistent.
pub fn check(header: &Elf64Ehdr, file_len: Option<u64>) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !header.is_valid_magic() || !header.is_64() {
        log::debug!("skipping consistency checks for non-ELF64 input");
        return violations;
    }

    if usize::from(header.header_size()) != HEADER_SIZE {
        violations.push(Violation::HeaderSize {
            actual: header.header_size(),
        });
    }

    let tables = [
        (
            Table::ProgramHeaders,
            SIZEOF_PHDR,
            header.program_header_offset(),
            header.program_header_entry_size(),
            header.program_header_entry_count(),
        ),
        (
            Table::SectionHeaders,
            SIZEOF_SHDR,
            header.section_header_offset(),
            header.section_header_entry_size(),
            header.section_header_entry_count(),
        ),
    ];

    for (table, expected, offset, entry_size, count) in tables {
        if count == 0 {
            continue;
        }
        if usize::from(entry_size) != expected {
            violations.push(Violation::EntrySize {
                table,
                expected,
                actual: entry_size,
            });
        }
        if let Some(file_len) = file_len {
            // u128 so a bogus offset near u64::MAX cannot overflow.
            let end = u128::from(offset) + u128::from(entry_size) * u128::from(count);
            if end > u128::from(file_len) {
                violations.push(Violation::PastEndOfFile {
                    table,
                    end,
                    file_len,
                });
            }
        }
    }

    let index = header.section_name_table_index();
    let count = header.section_header_entry_count();
    if count > 0 && u32::from(index) != SHN_UNDEF && index >= count {
        violations.push(Violation::StringTableIndex { index, count });
    }

    for v in &violations {
        log::info!("consistency check failed: {v}");
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::decode_bytes;
    use crate::header::tests::sample_bytes;

    fn consistent_bytes() -> [u8; HEADER_SIZE] {
        let mut bytes = sample_bytes();
        bytes[32..40].copy_from_slice(&64u64.to_ne_bytes());
        bytes[40..48].copy_from_slice(&0x1000u64.to_ne_bytes());
        bytes[52..54].copy_from_slice(&64u16.to_ne_bytes());
        bytes[54..56].copy_from_slice(&56u16.to_ne_bytes());
        bytes[56..58].copy_from_slice(&2u16.to_ne_bytes());
        bytes[58..60].copy_from_slice(&64u16.to_ne_bytes());
        bytes[60..62].copy_from_slice(&4u16.to_ne_bytes());
        bytes[62..64].copy_from_slice(&3u16.to_ne_bytes());
        bytes
    }

    #[test]
    fn consistent_header_passes() {
        let header = decode_bytes(&consistent_bytes()).unwrap();
        assert!(check(&header, Some(0x1100)).is_empty());
        assert!(check(&header, None).is_empty());
    }

    #[test]
    fn wrong_sizes_are_flagged() {
        let mut bytes = consistent_bytes();
        bytes[52..54].copy_from_slice(&52u16.to_ne_bytes());
        bytes[54..56].copy_from_slice(&32u16.to_ne_bytes());
        bytes[58..60].copy_from_slice(&40u16.to_ne_bytes());

        let violations = check(&decode_bytes(&bytes).unwrap(), None);
        assert_eq!(
            violations,
            vec![
                Violation::HeaderSize { actual: 52 },
                Violation::EntrySize {
                    table: Table::ProgramHeaders,
                    expected: 56,
                    actual: 32
                },
                Violation::EntrySize {
                    table: Table::SectionHeaders,
                    expected: 64,
                    actual: 40
                },
            ]
        );
        assert_eq!(
            violations[1].to_string(),
            "program header table entry size is 0x20, expected 0x38"
        );
    }

    #[test]
    fn tables_past_end_of_file() {
        let header = decode_bytes(&consistent_bytes()).unwrap();
        let violations = check(&header, Some(0x1000));
        assert_eq!(
            violations,
            vec![Violation::PastEndOfFile {
                table: Table::SectionHeaders,
                end: 0x1100,
                file_len: 0x1000
            }]
        );
    }

    #[test]
    fn huge_offset_does_not_overflow() {
        let mut bytes = consistent_bytes();
        bytes[32..40].copy_from_slice(&u64::MAX.to_ne_bytes());
        let violations = check(&decode_bytes(&bytes).unwrap(), Some(u64::MAX));
        assert!(matches!(
            violations.as_slice(),
            [Violation::PastEndOfFile {
                table: Table::ProgramHeaders,
                ..
            }]
        ));
    }

    #[test]
    fn string_table_index_out_of_range() {
        let mut bytes = consistent_bytes();
        bytes[62..64].copy_from_slice(&4u16.to_ne_bytes());
        let violations = check(&decode_bytes(&bytes).unwrap(), None);
        assert_eq!(
            violations,
            vec![Violation::StringTableIndex { index: 4, count: 4 }]
        );
    }

    #[test]
    fn non_elf_is_not_checked() {
        let header = decode_bytes(&[0u8; HEADER_SIZE]).unwrap();
        assert!(check(&header, Some(0)).is_empty());

        let mut bytes = consistent_bytes();
        bytes[4] = 1;
        bytes[52..54].copy_from_slice(&52u16.to_ne_bytes());
        assert!(check(&decode_bytes(&bytes).unwrap(), None).is_empty());
    }
}
