/// Shared kernel - error types, result alias and security helpers
/// used across every layer.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
