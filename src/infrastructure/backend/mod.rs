//! Compiler backend implementations

mod command;

pub use command::{CommandBackend, CommandSpec};
