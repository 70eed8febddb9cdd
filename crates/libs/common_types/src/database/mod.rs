mod media_row;

pub use media_row::*;
