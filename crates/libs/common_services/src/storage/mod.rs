mod error;
mod local;
mod memory;
mod object_store;
mod supabase;

pub use error::*;
pub use local::*;
pub use memory::*;
pub use object_store::*;
pub use supabase::*;
