pub mod commands;
pub mod handlers;

pub use commands::command_argument_builder;
pub use handlers::{ViewOptions, ViewSummary, load_input, run_view};
