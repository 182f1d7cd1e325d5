//! CLI command modules

pub mod crd;
pub mod info;
pub mod init;
pub mod kinds;
pub mod sample;
pub mod validate;
