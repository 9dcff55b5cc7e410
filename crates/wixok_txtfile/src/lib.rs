/* 📖 # What is wixok_txtfile?

A small accessor for plain text files: load the whole file, load it as
trimmed lines, append a line, clear it. File access goes through the
`wixok_base` PAL, so the accessor works the same on the real filesystem and
on `MockPal`.
*/

pub mod config;
pub mod diagnostics;
pub mod failure;
pub mod lines;
mod txtfile;

pub use config::{TxtFileConfig, load_config, parse_config};
pub use diagnostics::{DiagnosticOutput, Operation};
pub use failure::FailureKind;
pub use txtfile::{ClearOutcome, TxtFile};
