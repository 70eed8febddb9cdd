mod error;
mod memory_store;
mod metadata_store;
mod postgres_store;
mod utils;

pub use error::*;
pub use memory_store::*;
pub use metadata_store::*;
pub use postgres_store::*;
pub use utils::*;
