use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning raw bytes into an [`Elf64Ehdr`](crate::Elf64Ehdr).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The source ran dry before a full 64-byte header could be read.
    #[error("truncated header: expected {expected} bytes, got {read}", expected = crate::HEADER_SIZE)]
    Truncated { read: usize },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Failure while opening a file and decoding its header.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
