use goblin::elf::header::{
    EI_ABIVERSION, EI_CLASS, EI_DATA, EI_OSABI, EI_VERSION, ELFMAG, SELFMAG, SIZEOF_IDENT,
};

const EI_PAD: usize = EI_ABIVERSION + 1;
const PAD_LEN: usize = SIZEOF_IDENT - EI_PAD;

/// The `e_ident` block at the start of every ELF file.
///
/// Values are kept raw; turning them into names is the job of
/// [`FieldKind::label`](crate::FieldKind::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf64Ident {
    magic: [u8; SELFMAG],
    class: u8,
    data_encoding: u8,
    version: u8,
    os_abi: u8,
    abi_version: u8,
    padding: [u8; PAD_LEN],
}

impl Elf64Ident {
    pub fn from_bytes(raw: &[u8; SIZEOF_IDENT]) -> Self {
        let mut magic = [0u8; SELFMAG];
        magic.copy_from_slice(&raw[..SELFMAG]);
        let mut padding = [0u8; PAD_LEN];
        padding.copy_from_slice(&raw[EI_PAD..]);

        Self {
            magic,
            class: raw[EI_CLASS],
            data_encoding: raw[EI_DATA],
            version: raw[EI_VERSION],
            os_abi: raw[EI_OSABI],
            abi_version: raw[EI_ABIVERSION],
            padding,
        }
    }

    /// Reassembles the 16 bytes this ident was decoded from.
    pub fn to_bytes(&self) -> [u8; SIZEOF_IDENT] {
        let mut raw = [0u8; SIZEOF_IDENT];
        raw[..SELFMAG].copy_from_slice(&self.magic);
        raw[EI_CLASS] = self.class;
        raw[EI_DATA] = self.data_encoding;
        raw[EI_VERSION] = self.version;
        raw[EI_OSABI] = self.os_abi;
        raw[EI_ABIVERSION] = self.abi_version;
        raw[EI_PAD..].copy_from_slice(&self.padding);
        raw
    }

    pub fn is_valid_magic(&self) -> bool {
        &self.magic == ELFMAG
    }

    pub fn magic(&self) -> [u8; SELFMAG] {
        self.magic
    }

    pub fn class(&self) -> u8 {
        self.class
    }

    pub fn data_encoding(&self) -> u8 {
        self.data_encoding
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn os_abi(&self) -> u8 {
        self.os_abi
    }

    pub fn abi_version(&self) -> u8 {
        self.abi_version
    }

    /// Reserved bytes; never interpreted.
    pub fn padding(&self) -> [u8; PAD_LEN] {
        self.padding
    }
}
