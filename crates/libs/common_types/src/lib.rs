#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod database;
mod media_kind;
mod memory;
mod payloads;

pub use database::*;
pub use media_kind::*;
pub use memory::*;
pub use payloads::*;
