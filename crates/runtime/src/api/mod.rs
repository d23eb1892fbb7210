//! Public runtime API surface.
//!
//! Error types exposed to request handlers; the operations themselves live on
//! [`ArenaRuntime`](crate::ArenaRuntime).

pub mod errors;

pub use errors::{RepositoryError, Result, StateConflict, ValidationError, WarError};
