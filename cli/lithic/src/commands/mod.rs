//! CLI command implementations.

pub mod doctor;
pub mod emit;
pub mod init;
pub mod probe;
pub mod resolve;
pub mod scaffold;
pub mod target;
