//! chromapick host shell
//!
//! Terminal front end that stands in for a picker's presentational layer:
//! it turns typed commands into engine events and prints the resulting
//! color and swatches.

pub mod clipboard;
pub mod commands;
pub mod session;

pub use commands::{Command, CommandError, CommandRegistry};
pub use session::{Outcome, Session};
