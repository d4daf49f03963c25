//! Command output: JSON envelopes, colored text and the live log stream.

mod format;
mod model;
mod result_builder;
mod stream;
mod text;

pub use format::OutputFormat;
pub use model::{CommandError, CommandResult, ErrorCode};
pub use result_builder::{ResultBuilder, TextView, print_error, print_result};
pub use stream::LogStream;
pub use text::human_size;
