use std::fmt::Write;

use goblin::elf::header::SIZEOF_IDENT;
use serde::Serialize;

use crate::header::elf::Elf64Ehdr;
use crate::label::FieldKind;

/// Text used for any enumerated value that has no label.
pub const FALLBACK: &str = "unrecognized";

/// Label for `raw`, or [`FALLBACK`].
pub fn label_or_fallback(kind: FieldKind, raw: u32) -> &'static str {
    kind.label(raw).unwrap_or(FALLBACK)
}

/// `"elf"` when the magic matches, `"not elf"` otherwise.
pub fn verdict(header: &Elf64Ehdr) -> &'static str {
    if header.is_valid_magic() {
        "elf"
    } else {
        "not elf"
    }
}

/// Renders the full multi-line report for `header`.
///
/// Output is a pure function of the header. Enumerated fields show their
/// label, everything else is shown as `{:#x}` hex, except the ABI version and
/// the ident size which are decimal.
pub fn render(header: &Elf64Ehdr) -> String {
    let ident = header.ident();
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "hdr: {{\n\
         \x20 ident: {{\n\
         \x20   class:      '{class}',\n\
         \x20   data:       '{data}',\n\
         \x20   version:    '{ident_version}',\n\
         \x20   OSABI:      '{os_abi}',\n\
         \x20   ABIVersion: '{abi_version}',\n\
         \x20   size:       '{ident_size}',\n\
         \x20 }},\n\
         \x20 type: '{object_type}',\n\
         \n\
         \x20 // processor specific\n\
         \x20 machine: '{machine:#x}',\n\
         \n\
         \x20 version:             '{version}',\n\
         \x20 entry:               '{entry:#x}',\n\
         \x20 programHeaderOffset: '{phoff:#x}',\n\
         \x20 sectionHeaderOffset: '{shoff:#x}',\n\
         \n\
         \x20 // processor specific\n\
         \x20 flags: '{flags:#x}',\n\
         \n\
         \x20 size:                        '{ehsize:#x}',\n\
         \x20 programHeaderEntrySize:      '{phentsize:#x}',\n\
         \x20 programHeaderEntryNum:       '{phnum:#x}',\n\
         \x20 sectionHeaderEntrySize:      '{shentsize:#x}',\n\
         \x20 sectionHeaderEntryNum:       '{shnum:#x}',\n\
         \x20 sectionNameStringTableIndex: '{shstrndx:#x}'\n\
         }}\n",
        class = label_or_fallback(FieldKind::Class, ident.class().into()),
        data = label_or_fallback(FieldKind::DataEncoding, ident.data_encoding().into()),
        ident_version = label_or_fallback(FieldKind::IdentVersion, ident.version().into()),
        os_abi = label_or_fallback(FieldKind::OsAbi, ident.os_abi().into()),
        abi_version = ident.abi_version(),
        ident_size = SIZEOF_IDENT,
        object_type = label_or_fallback(FieldKind::ObjectType, header.object_type().into()),
        machine = header.machine(),
        version = label_or_fallback(FieldKind::HeaderVersion, header.version()),
        entry = header.entry_point(),
        phoff = header.program_header_offset(),
        shoff = header.section_header_offset(),
        flags = header.flags(),
        ehsize = header.header_size(),
        phentsize = header.program_header_entry_size(),
        phnum = header.program_header_entry_count(),
        shentsize = header.section_header_entry_size(),
        shnum = header.section_header_entry_count(),
        shstrndx = header.section_name_table_index(),
    );
    out
}

/// A raw value next to its rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Labeled<T> {
    pub raw: T,
    pub label: &'static str,
}

impl<T: Copy + Into<u32>> Labeled<T> {
    fn new(kind: FieldKind, raw: T) -> Self {
        Self {
            raw,
            label: label_or_fallback(kind, raw.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentReport {
    pub magic: [u8; 4],
    pub class: Labeled<u8>,
    pub data: Labeled<u8>,
    pub version: Labeled<u8>,
    pub os_abi: Labeled<u8>,
    pub abi_version: u8,
    pub size: usize,
}

/// Machine-readable form of the same information [`render`] prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub elf: bool,
    pub ident: IdentReport,
    #[serde(rename = "type")]
    pub object_type: Labeled<u16>,
    pub machine: u16,
    pub version: Labeled<u32>,
    pub entry: u64,
    pub program_header_offset: u64,
    pub section_header_offset: u64,
    pub flags: u32,
    pub size: u16,
    pub program_header_entry_size: u16,
    pub program_header_entry_num: u16,
    pub section_header_entry_size: u16,
    pub section_header_entry_num: u16,
    pub section_name_string_table_index: u16,
}

impl Report {
    pub fn new(header: &Elf64Ehdr) -> Self {
        let ident = header.ident();
        Self {
            elf: header.is_valid_magic(),
            ident: IdentReport {
                magic: ident.magic(),
                class: Labeled::new(FieldKind::Class, ident.class()),
                data: Labeled::new(FieldKind::DataEncoding, ident.data_encoding()),
                version: Labeled::new(FieldKind::IdentVersion, ident.version()),
                os_abi: Labeled::new(FieldKind::OsAbi, ident.os_abi()),
                abi_version: ident.abi_version(),
                size: SIZEOF_IDENT,
            },
            object_type: Labeled::new(FieldKind::ObjectType, header.object_type()),
            machine: header.machine(),
            version: Labeled::new(FieldKind::HeaderVersion, header.version()),
            entry: header.entry_point(),
            program_header_offset: header.program_header_offset(),
            section_header_offset: header.section_header_offset(),
            flags: header.flags(),
            size: header.header_size(),
            program_header_entry_size: header.program_header_entry_size(),
            program_header_entry_num: header.program_header_entry_count(),
            section_header_entry_size: header.section_header_entry_size(),
            section_header_entry_num: header.section_header_entry_count(),
            section_name_string_table_index: header.section_name_table_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::decode_bytes;
    use crate::header::tests::sample_bytes;
    use crate::HEADER_SIZE;

    const SAMPLE_REPORT: &str = "\
hdr: {
  ident: {
    class:      '64 bit',
    data:       'little endian',
    version:    'current',
    OSABI:      'System V',
    ABIVersion: '0',
    size:       '16',
  },
  type: 'executable',

  // processor specific
  machine: '0x0',

  version:             'unrecognized',
  entry:               '0x0',
  programHeaderOffset: '0x0',
  sectionHeaderOffset: '0x0',

  // processor specific
  flags: '0x0',

  size:                        '0x0',
  programHeaderEntrySize:      '0x0',
  programHeaderEntryNum:       '0x0',
  sectionHeaderEntrySize:      '0x0',
  sectionHeaderEntryNum:       '0x0',
  sectionNameStringTableIndex: '0x0'
}
";

    #[test]
    fn golden_sample() {
        let header = decode_bytes(&sample_bytes()).unwrap();
        assert_eq!(render(&header), SAMPLE_REPORT);
        assert_eq!(verdict(&header), "elf");
    }

    #[test]
    fn sample_mentions_every_label() {
        let report = render(&decode_bytes(&sample_bytes()).unwrap());
        for needle in ["64 bit", "little endian", "current", "System V", "executable"] {
            assert!(report.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut bytes = sample_bytes();
        for (i, b) in bytes.iter_mut().enumerate().skip(16) {
            *b = (i * 7) as u8;
        }
        let first = render(&decode_bytes(&bytes).unwrap());
        let second = render(&decode_bytes(&bytes).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_values_use_fallback_everywhere() {
        let mut bytes = sample_bytes();
        bytes[4] = 3;
        bytes[5] = 0;
        bytes[6] = 7;
        bytes[7] = 2;
        bytes[16..18].copy_from_slice(&0x1234u16.to_ne_bytes());
        bytes[20..24].copy_from_slice(&9u32.to_ne_bytes());

        let report = render(&decode_bytes(&bytes).unwrap());
        assert!(report.contains("class:      'unrecognized'"));
        assert!(report.contains("data:       'unrecognized'"));
        assert!(report.contains("    version:    'unrecognized'"));
        assert!(report.contains("OSABI:      'unrecognized'"));
        assert!(report.contains("type: 'unrecognized'"));
        assert!(report.contains("version:             'unrecognized'"));
    }

    #[test]
    fn numeric_fields_render_as_hex() {
        let mut bytes = sample_bytes();
        bytes[8] = 12;
        bytes[16..18].copy_from_slice(&0xff10u16.to_ne_bytes());
        bytes[18..20].copy_from_slice(&0x3eu16.to_ne_bytes());
        bytes[20..24].copy_from_slice(&1u32.to_ne_bytes());
        bytes[24..32].copy_from_slice(&0x401000u64.to_ne_bytes());
        bytes[52..54].copy_from_slice(&64u16.to_ne_bytes());

        let report = render(&decode_bytes(&bytes).unwrap());
        assert!(report.contains("ABIVersion: '12'"));
        assert!(report.contains("type: 'reserved for processor specific'"));
        assert!(report.contains("machine: '0x3e'"));
        assert!(report.contains("version:             'current'"));
        assert!(report.contains("entry:               '0x401000'"));
        assert!(report.contains("size:                        '0x40'"));
    }

    #[test]
    fn zeroes_are_not_elf() {
        let header = decode_bytes(&[0u8; HEADER_SIZE]).unwrap();
        assert_eq!(verdict(&header), "not elf");
        assert!(render(&header).contains("type: 'none'"));
    }

    #[test]
    fn report_carries_raw_and_label() {
        let mut bytes = sample_bytes();
        bytes[16..18].copy_from_slice(&0xfe80u16.to_ne_bytes());
        let report = Report::new(&decode_bytes(&bytes).unwrap());

        assert!(report.elf);
        assert_eq!(report.ident.magic, [0x7f, b'E', b'L', b'F']);
        assert_eq!(report.ident.class, Labeled { raw: 2, label: "64 bit" });
        assert_eq!(report.ident.size, 16);
        assert_eq!(report.object_type.raw, 0xfe80);
        assert_eq!(report.object_type.label, "reserved for OS specific");
        assert_eq!(report.version.label, FALLBACK);
    }
}
