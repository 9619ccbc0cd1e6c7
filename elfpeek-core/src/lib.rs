pub mod binary;
pub mod error;
mod header;
pub mod label;
pub mod render;
pub mod validate;

pub use binary::*;
pub use error::*;
pub use header::elf::Elf64Ehdr;
pub use header::ident::Elf64Ident;
pub use header::{decode, decode_bytes, HEADER_SIZE};
pub use label::FieldKind;
pub use render::{render, verdict, Report};
