/* 📖 # What lives in wixok_base?

The error type, the tracing setup and the Platform Abstraction Layer shared by
every wixok crate. Higher-level crates never touch `std::fs` directly.
*/

pub mod error;
pub mod pal;
pub mod tracing;

pub use error::{ErrorKind, ResultExt, WixokError, WixokResult};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
