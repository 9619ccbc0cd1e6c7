use goblin::elf::header::{
    ELFCLASS32, ELFCLASS64, ELFDATA2LSB, ELFDATA2MSB, ELFOSABI_HPUX, ELFOSABI_STANDALONE,
    ELFOSABI_SYSV, ET_CORE, ET_DYN, ET_EXEC, ET_HIOS, ET_HIPROC, ET_LOOS, ET_LOPROC, ET_NONE,
    ET_REL, EV_CURRENT,
};

/// The header fields that carry an enumerated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Class,
    DataEncoding,
    IdentVersion,
    OsAbi,
    ObjectType,
    HeaderVersion,
}

struct Table {
    names: &'static [(u32, &'static str)],
    reserved: &'static [(u32, u32, &'static str)],
}

static CLASS: Table = Table {
    names: &[(ELFCLASS32 as u32, "32 bit"), (ELFCLASS64 as u32, "64 bit")],
    reserved: &[],
};

static DATA_ENCODING: Table = Table {
    names: &[
        (ELFDATA2LSB as u32, "little endian"),
        (ELFDATA2MSB as u32, "big endian"),
    ],
    reserved: &[],
};

static VERSION: Table = Table {
    names: &[(EV_CURRENT as u32, "current")],
    reserved: &[],
};

// Only the three ABIs below get names; the rest of 0..=255 stays unrecognized.
static OS_ABI: Table = Table {
    names: &[
        (ELFOSABI_SYSV as u32, "System V"),
        (ELFOSABI_HPUX as u32, "HP UX"),
        (ELFOSABI_STANDALONE as u32, "embedded"),
    ],
    reserved: &[],
};

static OBJECT_TYPE: Table = Table {
    names: &[
        (ET_NONE as u32, "none"),
        (ET_REL as u32, "relocatable"),
        (ET_EXEC as u32, "executable"),
        (ET_DYN as u32, "dynamic"),
        (ET_CORE as u32, "core"),
    ],
    reserved: &[
        (ET_LOOS as u32, ET_HIOS as u32, "reserved for OS specific"),
        (ET_LOPROC as u32, ET_HIPROC as u32, "reserved for processor specific"),
    ],
};

impl FieldKind {
    fn table(self) -> &'static Table {
        match self {
            FieldKind::Class => &CLASS,
            FieldKind::DataEncoding => &DATA_ENCODING,
            FieldKind::IdentVersion | FieldKind::HeaderVersion => &VERSION,
            FieldKind::OsAbi => &OS_ABI,
            FieldKind::ObjectType => &OBJECT_TYPE,
        }
    }

    /// Canonical name of `raw` for this field.
    ///
    /// Values inside a reserved range get the range's description. Anything
    /// else that is not in the table yields `None`.
    pub fn label(self, raw: u32) -> Option<&'static str> {
        let table = self.table();
        table
            .names
            .iter()
            .find(|(value, _)| *value == raw)
            .map(|(_, name)| *name)
            .or_else(|| {
                table
                    .reserved
                    .iter()
                    .find(|(lo, hi, _)| (*lo..=*hi).contains(&raw))
                    .map(|(_, _, name)| *name)
            })
    }
}
