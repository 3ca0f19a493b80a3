pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, InspectArgs, TargetArgs};
pub use handlers::{handle_generate, handle_inspect};
pub use output::{OutputFormat, OutputFormatter};
