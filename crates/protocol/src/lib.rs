//! Wire types for the remote filesystem service.
//!
//! This crate contains the serde types exchanged with the filesystem service
//! over its JSON/HTTP API. They are the shapes of data as they appear on the
//! wire and carry no behavior beyond (de)serialization.
//!
//! Field names follow the service's camelCase convention. The service is
//! lenient about what it sends (missing fields, `null` arrays), so every
//! response type tolerates absent members and falls back to defaults.
//!
//! Higher-level operations over these types live in `smia-rs`.

mod de;
pub mod disk;
pub mod execute;
pub mod files;
pub mod journal;
pub mod session;

pub use disk::*;
pub use execute::*;
pub use files::*;
pub use journal::*;
pub use session::*;
