#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod client;
pub mod dashboard;
mod error;
mod login;
mod route;
pub mod slideshow;
mod store;
#[cfg(test)]
mod testing;

pub use client::*;
pub use error::*;
pub use login::*;
pub use route::*;
pub use store::*;
