use crate::error::LoadError;
use crate::header::decode;
use crate::header::elf::Elf64Ehdr;
use crate::validate::{self, Violation};
use std::fs::File;
use std::path::Path;

/// A file on disk together with its decoded header.
#[derive(Debug)]
pub struct Binary {
    pub path: String,
    pub file_len: Option<u64>,
    pub header: Elf64Ehdr,
}

impl Binary {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // Pipes and character devices have no meaningful length.
        let file_len = file
            .metadata()
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len());
        log::info!("Opened {} ({:?} bytes)", path.display(), file_len);

        let header = decode(&mut file)?;
        if !header.is_valid_magic() {
            log::warn!("{} is not an ELF file", path.display());
        }

        Ok(Self {
            path: path.display().to_string(),
            file_len,
            header,
        })
    }

    pub fn is_elf(&self) -> bool {
        self.header.is_valid_magic()
    }

    /// Runs the opt-in consistency checks against this file's real length.
    pub fn check(&self) -> Vec<Violation> {
        validate::check(&self.header, self.file_len)
    }
}
