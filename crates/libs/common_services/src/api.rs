pub mod auth;
pub mod legacy;
pub mod memories;
pub mod music;
pub mod upload;
