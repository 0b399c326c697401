pub mod actions;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod escape;
pub mod process;
pub mod release;
pub mod sink;
pub mod value;

pub use actions::{Actions, GroupGuard};
pub use command::{Directive, MISSING_COMMAND, Params};
pub use error::{Error, Result};
pub use sink::{CommandSink, MemorySink, StdoutSink, WriterSink};
pub use value::Value;
