pub mod result;

pub mod cli;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod interpreter;
pub mod io;

pub use cli::*;
pub use compiler::lower::{lower, Lowered};
pub use compiler::reader::read_source;
pub use compiler::rom::RomImage;
pub use config::TargetConfig;
pub use interpreter::{execute, Flavor, Halt};
