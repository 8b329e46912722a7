//! Shell command execution
//!
//! Runs a single command string through the host shell under a timeout and
//! renders the outcome into the text block the model reads back.

mod error;
mod executor;
mod result;

pub use error::ShellError;
pub use executor::ShellExecutor;
pub use result::{EMPTY_PLACEHOLDER, ShellResult};
