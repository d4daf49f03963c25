//! Client-side orchestration for a remote filesystem service.
//!
//! The service interprets filesystem-administration commands (`mkdisk`,
//! `mount`, `mkdir`, `chown`, ...) one line at a time over a small JSON/HTTP
//! API and keeps the authenticated session on its side. This crate owns the
//! client half of that contract:
//!
//! - [`runner`]: runs a multi-line script in order, gating it on login and
//!   isolating per-command failures in the [`log::OutputLog`].
//! - [`reconcile`] and [`connect`]: seed the local [`session::Session`] from
//!   the service's authoritative view whenever connectivity is established.
//! - [`access`]: decides whether a session may browse a partition.
//! - [`journal`]: turns raw journal records into display-ready entries.
//! - [`browse`] and [`auth`]: the remaining operations the service exposes.
//!
//! All mutable client state lives in one [`state::ClientState`] that callers
//! pass by `&mut`; the remote side is reached only through the
//! [`service::FsService`] trait.

pub mod access;
pub mod auth;
pub mod browse;
pub mod classifier;
pub mod connect;
pub mod error;
pub mod journal;
pub mod log;
pub mod reconcile;
pub mod runner;
pub mod script;
pub mod service;
pub mod session;
pub mod state;

pub use error::{Result, SmiaError};
pub use log::{CommandOutcome, EntryStatus, LogEntry, LogEvent, OutputLog};
pub use runner::{RunOutcome, RunSummary, ScriptRunner};
pub use service::{FsService, HttpFsService, TransportError};
pub use session::{Session, SessionStore};
pub use smia_protocol as protocol;
pub use state::{ClientState, Connectivity};
