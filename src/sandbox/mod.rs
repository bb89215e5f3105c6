pub mod command;
pub mod path;

pub use command::{AllowlistPolicy, CommandGate, DEFAULT_TIMEOUT_SECS, MAX_OUTPUT_BYTES};
pub use path::PathResolver;
